//! # Controllers Module
//!
//! Wires the collection, views, router and history together and drives
//! them from a host event stream.

pub mod app_controller;

pub use app_controller::AppController;
