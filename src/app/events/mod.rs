//! # Events Module
//!
//! Named-event mediator plus the event names the rest of the
//! application agrees on.

pub mod event_bus;
pub mod types;

pub use event_bus::{
    BusError, EventBus, EventHandler, ListenerFailure, SubscriptionId, DEFAULT_MAX_DEPTH,
};
pub use types::{ADD, ALL, CLEAR_FOR_LANDING, RESET};
