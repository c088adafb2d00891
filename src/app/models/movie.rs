//! Movie record for the list/detail flow
//!
//! Records are plain data: a unique id plus the fields the views show.
//! They are built once (from a fetch payload or in code) and never
//! mutated afterwards.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique identifier of a record within its collection
pub type RecordId = i64;

/// Anything a [`Collection`](super::Collection) can hold
pub trait Record: Clone + Serialize + DeserializeOwned + 'static {
    fn id(&self) -> RecordId;

    /// Plain key/value representation handed to templates and event
    /// listeners
    fn attributes(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    id: RecordId,
    name: String,
    rating: String,
    description: String,
}

impl Movie {
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        rating: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            rating: rating.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating(&self) -> &str {
        &self.rating
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Route fragment that shows this movie in the detail view
    pub fn fragment(&self) -> String {
        format!("movies/{}", self.id)
    }
}

impl Record for Movie {
    fn id(&self) -> RecordId {
        self.id
    }
}
