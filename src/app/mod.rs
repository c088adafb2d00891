//! # Application Components
//!
//! Everything the movie browser is made of, bottom up: the event
//! mediator, records and collections, data sources, views, the router
//! and the controller that drives them from host input.

pub mod airport;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod router;
pub mod services;
pub mod views;

// Re-export core types
pub use controllers::AppController;
pub use events::{BusError, EventBus, SubscriptionId};
pub use io::{EventStream, HostEvent, LineEventStream, MockEventStream};
pub use models::{Collection, CollectionError, FetchMode, FetchOptions, Movie, Record, RecordId};
pub use router::{History, MovieOutcome, MovieRouter, NavigationRequest, Routable, RouterError};
pub use services::{ConfiguredSource, DataSource, HttpDataSource, StaticDataSource};
pub use views::{
    Element, MemoryElement, MovieDetailView, MovieItemView, MoviesListView, Renderable, Speed,
};
