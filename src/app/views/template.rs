//! # Templates
//!
//! Turns a record's plain key/value data into markup. Views only know
//! the [`Template`] trait and look templates up by id in a
//! [`TemplateStore`].

use minijinja::Environment;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Id under which the movie row template is registered
pub const MOVIES_TEMPLATE_ID: &str = "moviesTemplate";

/// Row markup used when no template is configured
pub const DEFAULT_ROW_TEMPLATE: &str = "<td>{{ name }}</td><td>{{ rating }}</td>";

/// Name the template is registered under; the `.html` suffix turns on
/// HTML auto-escaping
const TEMPLATE_NAME: &str = "row.html";

/// Extra name under which the whole record is visible, so keys that are
/// not identifiers stay reachable as `record["movie-name"]`
const RECORD_VAR: &str = "record";

pub trait Template {
    fn render(&self, data: &Map<String, Value>) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("no template registered with id '{0}'")]
    NotFound(String),

    #[error("invalid template: {0}")]
    Syntax(String),
}

/// Jinja-style HTML template
///
/// `{{ key }}` inserts the HTML-escaped value, `{{ key|safe }}` inserts
/// it raw and `{{ a.b }}` walks nested objects. Missing keys render as
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTemplate {
    source: String,
}

impl HtmlTemplate {
    /// Parse `source`, rejecting syntax errors up front
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let template = Self {
            source: source.to_string(),
        };
        template
            .environment()
            .map_err(|e| TemplateError::Syntax(e.to_string()))?;
        Ok(template)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn environment(&self) -> Result<Environment<'_>, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, &self.source)?;
        Ok(env)
    }
}

impl Template for HtmlTemplate {
    fn render(&self, data: &Map<String, Value>) -> anyhow::Result<String> {
        let mut context = data.clone();
        context
            .entry(RECORD_VAR)
            .or_insert_with(|| Value::Object(data.clone()));

        let env = self.environment()?;
        let html = env.get_template(TEMPLATE_NAME)?.render(&context)?;
        Ok(html)
    }
}

/// Templates addressable by id, like script blocks in a host page
#[derive(Default, Clone)]
pub struct TemplateStore {
    templates: HashMap<String, Rc<dyn Template>>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the movie row template compiled from `row_source`
    pub fn with_row_template(row_source: &str) -> Result<Self, TemplateError> {
        let mut store = Self::new();
        store.register(MOVIES_TEMPLATE_ID, HtmlTemplate::compile(row_source)?);
        Ok(store)
    }

    pub fn register(&mut self, id: impl Into<String>, template: impl Template + 'static) {
        self.templates.insert(id.into(), Rc::new(template));
    }

    pub fn get(&self, id: &str) -> Result<Rc<dyn Template>, TemplateError> {
        self.templates
            .get(id)
            .cloned()
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }
}

impl fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.templates.keys().collect();
        ids.sort();
        f.debug_struct("TemplateStore").field("ids", &ids).finish()
    }
}
