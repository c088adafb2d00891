//! # Route Tables
//!
//! Hash-style route patterns compiled to regular expressions:
//!
//! - `:name` captures one path segment
//! - `*name` captures everything up to the query string
//! - `( ... )` marks an optional part
//!
//! A trailing `?query` is accepted by every route and captured
//! separately.

use regex::{Captures, Regex};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("history has already been started")]
    AlreadyStarted,
}

/// Parameters extracted from a matched fragment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteMatch {
    /// One entry per `:name` / `*name`, `None` when an optional part was absent
    pub params: Vec<Option<String>>,
    pub query: Option<String>,
}

impl RouteMatch {
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).and_then(|p| p.as_deref())
    }
}

#[derive(Debug, Clone)]
pub struct Route<A> {
    pattern: String,
    regex: Regex,
    action: A,
}

impl<A: Copy> Route<A> {
    pub fn new(pattern: &str, action: A) -> Result<Self, RouterError> {
        Ok(Self {
            pattern: pattern.to_string(),
            regex: compile_pattern(pattern)?,
            action,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn action(&self) -> A {
        self.action
    }

    pub fn matches(&self, fragment: &str) -> Option<RouteMatch> {
        let caps = self.regex.captures(fragment)?;
        // Group 0 is the whole match; the last group is the query string
        let groups = caps.len();
        let params = (1..groups - 1)
            .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
            .collect();
        let query = caps.get(groups - 1).map(|m| m.as_str().to_string());
        Some(RouteMatch { params, query })
    }
}

/// Ordered routes; the first matching pattern wins
#[derive(Debug, Clone)]
pub struct RouteTable<A> {
    routes: Vec<Route<A>>,
}

impl<A: Copy> RouteTable<A> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn route(mut self, pattern: &str, action: A) -> Result<Self, RouterError> {
        self.routes.push(Route::new(pattern, action)?);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn patterns(&self) -> Vec<&str> {
        self.routes.iter().map(Route::pattern).collect()
    }

    pub fn recognize(&self, fragment: &str) -> Option<(A, RouteMatch)> {
        self.routes
            .iter()
            .find_map(|route| route.matches(fragment).map(|m| (route.action(), m)))
    }
}

impl<A: Copy> Default for RouteTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\-{}\[\]+?.,\\\^$|#\s]").expect("escape pattern is valid"))
}

fn optional_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((.*?)\)").expect("optional pattern is valid"))
}

fn named_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\(\?)?:\w+").expect("named pattern is valid"))
}

fn splat_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\w+").expect("splat pattern is valid"))
}

/// Translate a route pattern into an anchored regular expression
pub fn compile_pattern(pattern: &str) -> Result<Regex, RouterError> {
    let escaped = escape_regex().replace_all(pattern, |caps: &Captures<'_>| format!("\\{}", &caps[0]));
    let optional = optional_regex().replace_all(&escaped, |caps: &Captures<'_>| format!("(?:{})?", &caps[1]));
    let named = named_regex().replace_all(&optional, |caps: &Captures<'_>| {
        if caps.get(1).is_some() {
            caps[0].to_string()
        } else {
            "([^/?]+)".to_string()
        }
    });
    let body = splat_regex().replace_all(&named, "([^?]*?)");

    let source = format!(r"^{body}(?:\?([\s\S]*))?$");
    Regex::new(&source).map_err(|e| RouterError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Page {
        Home,
        Movie,
        File,
        Docs,
    }

    fn table() -> RouteTable<Page> {
        RouteTable::new()
            .route("", Page::Home)
            .unwrap()
            .route("movies/:id", Page::Movie)
            .unwrap()
            .route("files/*path", Page::File)
            .unwrap()
            .route("docs(/:section)", Page::Docs)
            .unwrap()
    }

    #[test]
    fn empty_pattern_should_match_only_root() {
        let table = table();
        assert_eq!(table.recognize("").map(|(a, _)| a), Some(Page::Home));
        assert_eq!(table.recognize("nowhere"), None);
    }

    #[test]
    fn named_param_should_capture_one_segment() {
        let (action, matched) = table().recognize("movies/2").unwrap();
        assert_eq!(action, Page::Movie);
        assert_eq!(matched.param(0), Some("2"));
        assert_eq!(matched.query, None);

        assert!(table().recognize("movies/2/extra").is_none());
        assert!(table().recognize("movies/").is_none());
    }

    #[test]
    fn query_string_should_be_split_off() {
        let (_, matched) = table().recognize("movies/3?sort=name").unwrap();
        assert_eq!(matched.param(0), Some("3"));
        assert_eq!(matched.query.as_deref(), Some("sort=name"));
    }

    #[test]
    fn splat_should_capture_the_rest() {
        let (action, matched) = table().recognize("files/a/b/c.txt").unwrap();
        assert_eq!(action, Page::File);
        assert_eq!(matched.param(0), Some("a/b/c.txt"));
    }

    #[test]
    fn optional_part_may_be_absent() {
        let (action, matched) = table().recognize("docs").unwrap();
        assert_eq!(action, Page::Docs);
        assert_eq!(matched.params, vec![None]);

        let (_, matched) = table().recognize("docs/intro").unwrap();
        assert_eq!(matched.param(0), Some("intro"));
    }

    #[test]
    fn regex_metacharacters_should_be_literal() {
        let table = RouteTable::new().route("a.b+c", Page::Home).unwrap();
        assert!(table.recognize("a.b+c").is_some());
        assert!(table.recognize("axbbc").is_none());
    }

    #[test]
    fn first_matching_route_should_win() {
        let table = RouteTable::new()
            .route("movies/:id", Page::Movie)
            .unwrap()
            .route("movies/*rest", Page::File)
            .unwrap();

        assert_eq!(table.recognize("movies/1").map(|(a, _)| a), Some(Page::Movie));
        assert_eq!(table.recognize("movies/1/2").map(|(a, _)| a), Some(Page::File));
        assert_eq!(table.patterns(), vec!["movies/:id", "movies/*rest"]);
    }
}
