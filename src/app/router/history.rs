//! # Navigation History
//!
//! Tracks the current route fragment plus back/forward stacks. History
//! decides *whether* a fragment should be routed; the router decides
//! *what* routing it means.

use super::route::RouterError;

/// A request to move to another fragment
///
/// Views return these instead of calling the router, which keeps them
/// unaware of whatever handles the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub fragment: String,
    /// Run the matching route handler, not just record the fragment
    pub trigger: bool,
}

impl NavigationRequest {
    pub fn new(fragment: impl Into<String>, trigger: bool) -> Self {
        Self {
            fragment: fragment.into(),
            trigger,
        }
    }
}

/// Strip one leading `#` or `/` and any trailing whitespace
pub fn normalize_fragment(fragment: &str) -> String {
    let fragment = fragment
        .strip_prefix('#')
        .or_else(|| fragment.strip_prefix('/'))
        .unwrap_or(fragment);
    fragment.trim_end().to_string()
}

#[derive(Debug, Default)]
pub struct History {
    current: Option<String>,
    back: Vec<String>,
    forward: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Begin tracking at `fragment`, returning the fragment to route
    pub fn start(&mut self, fragment: &str) -> Result<String, RouterError> {
        if self.is_started() {
            return Err(RouterError::AlreadyStarted);
        }
        let fragment = normalize_fragment(fragment);
        tracing::debug!("History started at '{}'", fragment);
        self.current = Some(fragment.clone());
        Ok(fragment)
    }

    /// Record a navigation. Returns the fragment to route, if any.
    ///
    /// Navigating to the current fragment, or before `start`, does
    /// nothing.
    pub fn navigate(&mut self, request: &NavigationRequest) -> Option<String> {
        let fragment = normalize_fragment(&request.fragment);
        let Some(current) = self.current.as_ref() else {
            tracing::debug!("Ignoring navigation to '{}' before start", fragment);
            return None;
        };
        if *current == fragment {
            return None;
        }

        if let Some(previous) = self.current.replace(fragment.clone()) {
            self.back.push(previous);
        }
        self.forward.clear();

        request.trigger.then_some(fragment)
    }

    /// Step back one entry, returning the fragment to route
    pub fn back(&mut self) -> Option<String> {
        let previous = self.back.pop()?;
        if let Some(current) = self.current.replace(previous.clone()) {
            self.forward.push(current);
        }
        Some(previous)
    }

    /// Step forward one entry, returning the fragment to route
    pub fn forward(&mut self) -> Option<String> {
        let next = self.forward.pop()?;
        if let Some(current) = self.current.replace(next.clone()) {
            self.back.push(current);
        }
        Some(next)
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go(fragment: &str) -> NavigationRequest {
        NavigationRequest::new(fragment, true)
    }

    #[test]
    fn normalize_should_strip_one_leading_marker_and_trailing_space() {
        assert_eq!(normalize_fragment("#movies/2"), "movies/2");
        assert_eq!(normalize_fragment("/movies/2  "), "movies/2");
        assert_eq!(normalize_fragment("//x"), "/x");
        assert_eq!(normalize_fragment(""), "");
    }

    #[test]
    fn start_should_only_succeed_once() {
        let mut history = History::new();
        assert_eq!(history.start("#").unwrap(), "");
        assert_eq!(history.start(""), Err(RouterError::AlreadyStarted));
    }

    #[test]
    fn navigate_should_skip_current_fragment_and_unstarted_history() {
        let mut history = History::new();
        assert_eq!(history.navigate(&go("movies/1")), None);

        history.start("").unwrap();
        assert_eq!(history.navigate(&go("movies/1")), Some("movies/1".into()));
        assert_eq!(history.navigate(&go("#movies/1")), None);
        assert_eq!(history.current(), Some("movies/1"));
    }

    #[test]
    fn silent_navigation_should_record_without_routing() {
        let mut history = History::new();
        history.start("").unwrap();

        assert_eq!(history.navigate(&NavigationRequest::new("movies/3", false)), None);
        assert_eq!(history.current(), Some("movies/3"));
        assert!(history.can_go_back());
    }

    #[test]
    fn back_and_forward_should_walk_the_stacks() {
        let mut history = History::new();
        history.start("").unwrap();
        history.navigate(&go("movies/1"));
        history.navigate(&go("movies/2"));

        assert_eq!(history.back(), Some("movies/1".into()));
        assert_eq!(history.back(), Some("".into()));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some("movies/1".into()));
        assert!(history.can_go_forward());

        history.navigate(&go("movies/3"));
        assert!(!history.can_go_forward());
        assert_eq!(history.current(), Some("movies/3"));
    }
}
