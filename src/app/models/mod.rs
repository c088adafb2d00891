//! # Models
//!
//! Domain records and the collection that owns them.

pub mod collection;
pub mod fixtures;
pub mod movie;

pub use collection::{Collection, CollectionError, FetchMode, FetchOptions, FetchSummary};
pub use fixtures::{MOVIES_JSON, MOVIES_URL};
pub use movie::{Movie, Record, RecordId};
