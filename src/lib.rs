//! # cinelist - Movie List/Detail Browser on an Event Mediator
//!
//! A small list/detail application whose parts never hold references to
//! each other's internals. Collections announce changes on an event bus,
//! views listen, and a hash-style router decides which view is visible.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  fetch   ┌──────────────┐ reset/add ┌──────────────┐
//! │ DataSource  │─────────▶│  Collection  │──────────▶│MoviesListView│
//! └─────────────┘          └──────────────┘  EventBus └──────────────┘
//!                                 ▲                          │ click
//!                                 │ get(id)                  ▼
//! ┌─────────────┐ HostEvent┌──────────────┐ fragment  ┌──────────────┐
//! │ EventStream │─────────▶│AppController │──────────▶│ MovieRouter  │
//! └─────────────┘          │  + History   │◀──────────│              │
//!                          └──────────────┘ Navigation└──────────────┘
//!                                                 Request    │
//!                                                            ▼
//!                                                   ┌─────────────────┐
//!                                                   │ MovieDetailView │
//!                                                   └─────────────────┘
//! ```

pub mod app;
pub mod cmd_args;
pub mod config;

// Re-export main types for easy access
pub use app::*;
