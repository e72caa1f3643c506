//! Scan session lifecycle management.
//!
//! The [`SessionController`] drives one scan from submission through
//! completion, failure, or timeout, polling the backend on a fixed
//! interval under a wall-clock budget.

mod config;
mod controller;
mod state;

pub use config::SessionConfig;
pub use controller::{SessionController, SessionControllerBuilder};
