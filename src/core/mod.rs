//! Core types and traits for the scanwatch library.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`types`] - Common types like `ScanRequest`, `Finding`, `SessionPhase`
//! - [`protocol`] - Wire shapes of the backend scan API, validated at the boundary
//! - [`traits`] - The `ScanApi` trait
//! - [`error`] - Structured error types
//! - [`events`] - Presentation events and sinks

pub mod error;
pub mod events;
pub mod protocol;
pub mod traits;
pub mod types;

// Re-export commonly used types at the core level
pub use error::{ApiError, SessionError};
pub use events::{ChannelSink, EventSink, NullSink, SessionEvent};
pub use protocol::{ResultsBody, ScanCreated, ScanStatus, StatusBody, VulnerabilityRecord};
pub use traits::{ArcScanApi, ScanApi};
pub use types::{
    Finding, FindingCategory, FindingSeverity, FindingStatus, ScanRequest, SessionPhase,
    SessionSnapshot,
};
