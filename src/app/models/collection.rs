//! Ordered, id-unique record collection
//!
//! A collection owns its records and an [`EventBus`] that announces
//! changes: [`RESET`] when the contents are replaced wholesale and [`ADD`]
//! for each appended record. Collections are shared through `Rc`, and the
//! record list sits behind a `RefCell` that is never held while events
//! are published, so listeners are free to read the collection back.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashSet;

use super::movie::{Record, RecordId};
use crate::app::events::{BusError, EventBus, ADD, RESET};
use crate::app::services::DataSource;

/// How a fetched payload is merged into the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Replace the contents and publish a single `reset`
    #[default]
    Reset,
    /// Append unseen records, publishing `add` for each one
    Add,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    pub mode: FetchMode,
}

impl FetchOptions {
    pub fn reset() -> Self {
        Self {
            mode: FetchMode::Reset,
        }
    }

    pub fn add() -> Self {
        Self {
            mode: FetchMode::Add,
        }
    }
}

/// What a fetch did to the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub mode: FetchMode,
    /// Records in the payload
    pub received: usize,
    /// Records now in the collection that came from this payload
    pub added: usize,
    /// Ids that were already present (add mode only)
    pub skipped: Vec<RecordId>,
}

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("duplicate record id {0}")]
    DuplicateId(RecordId),

    #[error("failed to fetch '{url}'")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Events(#[from] BusError),
}

#[derive(Debug)]
pub struct Collection<T: Record> {
    url: String,
    records: RefCell<Vec<T>>,
    events: EventBus,
}

impl<T: Record> Collection<T> {
    /// Create an empty collection that fetches from `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_events(url, EventBus::new())
    }

    /// Create an empty collection announcing changes on `events`
    pub fn with_events(url: impl Into<String>, events: EventBus) -> Self {
        Self {
            url: url.into(),
            records: RefCell::new(Vec::new()),
            events,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Bus on which `reset` and `add` are published
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Snapshot of all records in insertion order
    pub fn records(&self) -> Vec<T> {
        self.records.borrow().clone()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.records.borrow().iter().map(Record::id).collect()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.borrow().iter().any(|r| r.id() == id)
    }

    pub fn get(&self, id: RecordId) -> Option<T> {
        self.find(|record| record.id() == id)
    }

    /// First record, in insertion order, for which `predicate` holds
    pub fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.borrow().iter().find(|r| predicate(r)).cloned()
    }

    /// Replace the contents wholesale and publish `reset` with the new
    /// record count
    ///
    /// The payload is validated first; on a duplicate id the collection
    /// is left untouched.
    pub fn reset(&self, records: Vec<T>) -> Result<usize, CollectionError> {
        ensure_unique(&records)?;
        let count = records.len();
        *self.records.borrow_mut() = records;

        tracing::debug!("Collection '{}' reset with {} record(s)", self.url, count);
        self.events.publish(RESET, &[Value::from(count)])?;
        Ok(count)
    }

    /// Append one record and publish `add` with its attributes
    pub fn add(&self, record: T) -> Result<(), CollectionError> {
        let id = record.id();
        let attributes = {
            let mut records = self.records.borrow_mut();
            if records.iter().any(|r| r.id() == id) {
                return Err(CollectionError::DuplicateId(id));
            }
            let attributes = record.attributes();
            records.push(record);
            attributes
        };

        tracing::debug!("Collection '{}' added record {}", self.url, id);
        self.events.publish(ADD, &[Value::Object(attributes)])?;
        Ok(())
    }

    /// Load records from `source` and merge them according to `options`
    ///
    /// Listener failures never stop the merge: every record is stored and
    /// the failures are returned together afterwards.
    pub async fn fetch<S>(
        &self,
        source: &S,
        options: FetchOptions,
    ) -> Result<FetchSummary, CollectionError>
    where
        S: DataSource<T>,
    {
        tracing::debug!("Fetching '{}' ({:?})", self.url, options.mode);
        let records = source
            .fetch(&self.url)
            .await
            .map_err(|source| CollectionError::Fetch {
                url: self.url.clone(),
                source,
            })?;
        let received = records.len();

        let summary = match options.mode {
            FetchMode::Reset => {
                let added = self.reset(records)?;
                FetchSummary {
                    mode: FetchMode::Reset,
                    received,
                    added,
                    skipped: Vec::new(),
                }
            }
            FetchMode::Add => {
                ensure_unique(&records)?;
                let mut added = 0;
                let mut skipped = Vec::new();
                let mut failures = Vec::new();
                for record in records {
                    let id = record.id();
                    if self.contains(id) {
                        tracing::debug!("Record {} already in '{}', skipping", id, self.url);
                        skipped.push(id);
                        continue;
                    }
                    // `add` stores the record before announcing it
                    match self.add(record) {
                        Ok(()) => added += 1,
                        Err(CollectionError::Events(e)) => {
                            added += 1;
                            failures.push(e);
                        }
                        Err(e) => return Err(e),
                    }
                }
                if let Some(error) = combine_failures(failures) {
                    return Err(error.into());
                }
                FetchSummary {
                    mode: FetchMode::Add,
                    received,
                    added,
                    skipped,
                }
            }
        };

        tracing::info!(
            "Fetched {} record(s) from '{}', {} added",
            summary.received,
            self.url,
            summary.added
        );
        Ok(summary)
    }
}

/// Fold the errors of several publishes into one
fn combine_failures(errors: Vec<BusError>) -> Option<BusError> {
    let mut errors = errors.into_iter();
    let mut combined = errors.next()?;
    for error in errors {
        combined = match (combined, error) {
            (
                BusError::ListenerFailed {
                    event,
                    invoked,
                    mut failures,
                },
                BusError::ListenerFailed {
                    invoked: more,
                    failures: extra,
                    ..
                },
            ) => {
                failures.extend(extra);
                BusError::ListenerFailed {
                    event,
                    invoked: invoked + more,
                    failures,
                }
            }
            (depth @ BusError::DepthExceeded { .. }, _) => depth,
            (_, depth @ BusError::DepthExceeded { .. }) => depth,
        };
    }
    Some(combined)
}

fn ensure_unique<T: Record>(records: &[T]) -> Result<(), CollectionError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(CollectionError::DuplicateId(record.id()));
        }
    }
    Ok(())
}
