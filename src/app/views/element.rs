//! # Host Elements
//!
//! The narrow contract views use to touch the page. A real host maps
//! these calls onto its own widgets; [`MemoryElement`] keeps everything
//! in memory so views can be driven and inspected headless.

use anyhow::{bail, Result};
use std::str::FromStr;
use std::time::Duration;

/// Duration of a show/hide transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    #[default]
    Immediate,
    Fast,
    Slow,
    Millis(u64),
}

impl Speed {
    pub fn duration(self) -> Duration {
        match self {
            Speed::Immediate => Duration::ZERO,
            Speed::Fast => Duration::from_millis(200),
            Speed::Slow => Duration::from_millis(600),
            Speed::Millis(ms) => Duration::from_millis(ms),
        }
    }
}

impl FromStr for Speed {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "" | "immediate" | "0" => Ok(Speed::Immediate),
            "fast" => Ok(Speed::Fast),
            "slow" => Ok(Speed::Slow),
            other => match other.parse::<u64>() {
                Ok(ms) => Ok(Speed::Millis(ms)),
                Err(_) => bail!("unknown transition speed '{s}'"),
            },
        }
    }
}

/// A visibility change recorded by [`MemoryElement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub visible: bool,
    pub duration: Duration,
}

/// Operations a view may perform on its host element
pub trait Element {
    fn tag(&self) -> &str;

    fn id(&self) -> Option<&str>;

    /// Append markup after the existing content
    fn append(&mut self, markup: &str);

    /// Remove all content
    fn empty(&mut self);

    /// Replace all content with `markup`
    fn set_html(&mut self, markup: &str) {
        self.empty();
        self.append(markup);
    }

    fn inner_html(&self) -> String;

    /// Number of top-level appended fragments
    fn child_count(&self) -> usize;

    fn fade_in(&mut self, speed: Speed);

    fn fade_out(&mut self, speed: Speed);

    fn is_visible(&self) -> bool;

    fn outer_html(&self) -> String {
        match self.id() {
            Some(id) => format!(
                "<{tag} id=\"{id}\">{inner}</{tag}>",
                tag = self.tag(),
                inner = self.inner_html()
            ),
            None => format!(
                "<{tag}>{inner}</{tag}>",
                tag = self.tag(),
                inner = self.inner_html()
            ),
        }
    }
}

/// In-memory element that records every transition it goes through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryElement {
    tag: String,
    id: Option<String>,
    children: Vec<String>,
    visible: bool,
    transitions: Vec<Transition>,
}

impl MemoryElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            children: Vec::new(),
            visible: true,
            transitions: Vec::new(),
        }
    }

    pub fn with_id(tag: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new(tag)
        }
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn last_transition(&self) -> Option<Transition> {
        self.transitions.last().copied()
    }

    fn transition(&mut self, visible: bool, speed: Speed) {
        self.visible = visible;
        self.transitions.push(Transition {
            visible,
            duration: speed.duration(),
        });
    }
}

impl Element for MemoryElement {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn append(&mut self, markup: &str) {
        self.children.push(markup.to_string());
    }

    fn empty(&mut self) {
        self.children.clear();
    }

    fn inner_html(&self) -> String {
        self.children.concat()
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn fade_in(&mut self, speed: Speed) {
        self.transition(true, speed);
    }

    fn fade_out(&mut self, speed: Speed) {
        self.transition(false, speed);
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
