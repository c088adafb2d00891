//! # Event Names
//!
//! Well-known event names shared between publishers and subscribers.

/// A collection's contents were replaced wholesale
pub const RESET: &str = "reset";

/// One record was appended to a collection
pub const ADD: &str = "add";

/// Catch-all channel: listeners receive every event, name first
pub const ALL: &str = "all";

/// A control tower cleared one flight number for landing
pub const CLEAR_FOR_LANDING: &str = "clear-for-landing";
