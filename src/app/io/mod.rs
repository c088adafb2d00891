//! # I/O Abstraction Layer
//!
//! Host input arrives as [`HostEvent`]s through the [`EventStream`]
//! trait, so the controller never depends on where they come from.
//!
//! ```text
//! Production:  AppController ──▶ LineEventStream ──▶ stdin lines
//! Testing:     AppController ──▶ MockEventStream ──▶ VecDeque<HostEvent>
//! ```

use anyhow::{bail, Context, Result};
use std::str::FromStr;

pub mod mock;
pub mod terminal;

pub use mock::MockEventStream;
pub use terminal::LineEventStream;

use crate::app::models::RecordId;

/// Something the user did in the host environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Typed or pasted a fragment into the address bar
    Navigate(String),
    /// Clicked the row for a movie
    Click(RecordId),
    Back,
    Forward,
    /// Asked for the screen to be drawn again
    Render,
    Quit,
}

impl FromStr for HostEvent {
    type Err = anyhow::Error;

    /// Parse one line of user input
    ///
    /// `go <fragment>`, `#<fragment>`, `click <id>`, `back`, `forward`,
    /// `show`, `quit`. A lone `#` or `home` goes to the root route.
    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        if let Some(fragment) = line.strip_prefix('#') {
            return Ok(HostEvent::Navigate(fragment.to_string()));
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_ascii_lowercase().as_str() {
            "go" | "open" => Ok(HostEvent::Navigate(rest.to_string())),
            "home" => Ok(HostEvent::Navigate(String::new())),
            "click" => {
                let id = rest
                    .parse::<RecordId>()
                    .with_context(|| format!("'{rest}' is not a movie id"))?;
                Ok(HostEvent::Click(id))
            }
            "back" | "b" => Ok(HostEvent::Back),
            "forward" | "f" => Ok(HostEvent::Forward),
            "show" | "render" | "ls" => Ok(HostEvent::Render),
            "quit" | "q" | "exit" => Ok(HostEvent::Quit),
            "" => bail!("empty input"),
            other => bail!("unknown command '{other}'"),
        }
    }
}

/// Input event stream abstraction
pub trait EventStream {
    /// Next event, or `None` once the input is exhausted
    fn read(&mut self) -> Result<Option<HostEvent>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_event_should_parse_navigation_forms() {
        assert_eq!(
            "go movies/2".parse::<HostEvent>().unwrap(),
            HostEvent::Navigate("movies/2".into())
        );
        assert_eq!(
            "#movies/3".parse::<HostEvent>().unwrap(),
            HostEvent::Navigate("movies/3".into())
        );
        assert_eq!(
            "#".parse::<HostEvent>().unwrap(),
            HostEvent::Navigate(String::new())
        );
        assert_eq!(
            "  HOME ".parse::<HostEvent>().unwrap(),
            HostEvent::Navigate(String::new())
        );
    }

    #[test]
    fn host_event_should_parse_commands() {
        assert_eq!("click 1".parse::<HostEvent>().unwrap(), HostEvent::Click(1));
        assert_eq!("back".parse::<HostEvent>().unwrap(), HostEvent::Back);
        assert_eq!("f".parse::<HostEvent>().unwrap(), HostEvent::Forward);
        assert_eq!("show".parse::<HostEvent>().unwrap(), HostEvent::Render);
        assert_eq!("q".parse::<HostEvent>().unwrap(), HostEvent::Quit);
    }

    #[test]
    fn host_event_should_reject_garbage() {
        assert!("".parse::<HostEvent>().is_err());
        assert!("fly away".parse::<HostEvent>().is_err());
        let err = "click star-wars".parse::<HostEvent>().unwrap_err();
        assert_eq!(err.to_string(), "'star-wars' is not a movie id");
    }
}
