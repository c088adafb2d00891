//! # Mock I/O Implementations for Testing

use super::{EventStream, HostEvent};
use anyhow::Result;
use std::collections::VecDeque;

/// Replays a fixed queue of events, then reports exhaustion
#[derive(Debug, Default)]
pub struct MockEventStream {
    events: VecDeque<HostEvent>,
}

impl MockEventStream {
    pub fn new(events: Vec<HostEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: HostEvent) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn read(&mut self) -> Result<Option<HostEvent>> {
        Ok(self.events.pop_front())
    }
}
