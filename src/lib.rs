//! # Scanwatch
//!
//! A client-side controller for security scan sessions: submission,
//! status polling, timeout enforcement, results retrieval, and
//! presentation events.
//!
//! ## Overview
//!
//! Scanwatch drives one scan session against a backend scan API,
//! allowing you to:
//!
//! - Submit a scan request and track its identity
//! - Poll scan status on a fixed interval with serialized ticks
//! - Enforce a wall-clock budget per scan attempt
//! - Map scan results into ordered, typed findings
//! - Subscribe a presentation layer to progress and terminal events
//! - Retry a failed scan with the identical request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scanwatch::backends::{HttpApiConfig, HttpScanApi};
//! use scanwatch::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create the API client
//!     let api = HttpScanApi::new(HttpApiConfig::new("http://localhost:8000/api"))?;
//!
//!     // Subscribe the UI to session events
//!     let (sink, mut events) = ChannelSink::channel();
//!
//!     // Build the controller
//!     let controller = SessionController::builder()
//!         .with_api(api)
//!         .with_event_sink(sink)
//!         .build()?;
//!
//!     // Start a scan
//!     controller.start(ScanRequest::full().with_repository_id("r1")).await?;
//!
//!     while let Some(event) = events.recv().await {
//!         match event {
//!             SessionEvent::Progress { progress, .. } => println!("{}%", progress),
//!             SessionEvent::Completed { findings } => {
//!                 println!("found {} issues", findings.len());
//!                 break;
//!             }
//!             SessionEvent::Failed { message } => {
//!                 eprintln!("{}", message);
//!                 break;
//!             }
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `default` - Includes the HTTP backend
//! - `http` - REST backend for the scan API via reqwest
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Core**: Fundamental types, wire shapes, traits, errors, events
//! - **Backends**: Scan API clients (HTTP, scripted mock)
//! - **Auth**: Explicit credential store with a load/save/clear lifecycle
//! - **Session**: The controller and its timers
//! - **Audit**: Structured logging of session transitions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod auth;
pub mod backends;
pub mod core;
pub mod session;

// Re-export commonly used types at the crate root
pub use crate::core::{
    ApiError, ArcScanApi, ChannelSink, EventSink, Finding, FindingCategory, FindingSeverity,
    FindingStatus, NullSink, ScanApi, ScanRequest, SessionError, SessionEvent, SessionPhase,
    SessionSnapshot,
};

pub use crate::auth::{CredentialStore, Credentials, MemoryCredentialStore};
pub use crate::session::{SessionConfig, SessionController, SessionControllerBuilder};

/// Prelude module for convenient imports.
///
/// ```rust
/// use scanwatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{CredentialStore, Credentials, MemoryCredentialStore};
    pub use crate::core::{
        ApiError, ArcScanApi, ChannelSink, EventSink, Finding, FindingCategory, FindingSeverity,
        FindingStatus, NullSink, ScanApi, ScanRequest, SessionError, SessionEvent, SessionPhase,
        SessionSnapshot,
    };
    pub use crate::session::{SessionConfig, SessionController, SessionControllerBuilder};
}
