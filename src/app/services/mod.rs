//! # Services Layer
//!
//! Abstractions over external resources. Collections only see the
//! [`DataSource`] trait; the concrete source is chosen at start-up.

pub mod data_source;

pub use data_source::{ConfiguredSource, DataSource, HttpDataSource, StaticDataSource};
