//! # Router Module
//!
//! Maps URL fragments onto view transitions.
//!
//! ```text
//! HostEvent / NavigationRequest ──▶ History ──fragment──▶ Routable::route
//!                                                            │
//!                                         RouteTable::recognize ──▶ execute(action)
//! ```

pub mod history;
pub mod movie_router;
pub mod route;

pub use history::{normalize_fragment, History, NavigationRequest};
pub use movie_router::{MovieOutcome, MovieRoute, MovieRouter};
pub use route::{compile_pattern, Route, RouteMatch, RouteTable, RouterError};

use anyhow::Result;
use std::fmt::Debug;

/// Capability of owning a route table and dispatching fragments to it
pub trait Routable {
    type Action: Copy + Debug;
    type Outcome;

    fn routes(&self) -> &RouteTable<Self::Action>;

    /// Run the handler for a recognised route
    fn execute(&mut self, action: Self::Action, matched: RouteMatch) -> Result<Self::Outcome>;

    /// Dispatch `fragment`; `Ok(None)` when no route matches
    fn route(&mut self, fragment: &str) -> Result<Option<Self::Outcome>> {
        match self.routes().recognize(fragment) {
            Some((action, matched)) => {
                tracing::debug!("Routing '{}' to {:?}", fragment, action);
                self.execute(action, matched).map(Some)
            }
            None => {
                tracing::debug!("No route matches '{}'", fragment);
                Ok(None)
            }
        }
    }
}
