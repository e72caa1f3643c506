//! Scan API backend implementations.
//!
//! This module contains implementations of the `ScanApi` trait.
//!
//! ## Available Backends
//!
//! - [`mock`] - A scripted mock for tests and demos
//! - [`http`] - The REST backend (requires the `http` feature)
//!
//! ## Implementing a Custom Backend
//!
//! To point the controller at a different transport, implement the
//! `ScanApi` trait:
//!
//! ```rust,ignore
//! use scanwatch::core::{ApiError, ResultsBody, ScanApi, ScanCreated, ScanRequest, StatusBody};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! pub struct MyBackend;
//!
//! #[async_trait]
//! impl ScanApi for MyBackend {
//!     async fn start_scan(&self, request: &ScanRequest) -> Result<ScanCreated, ApiError> {
//!         todo!()
//!     }
//!
//!     async fn scan_status(&self, scan_id: &str) -> Result<StatusBody, ApiError> {
//!         todo!()
//!     }
//!
//!     async fn scan_results(&self, scan_id: &str) -> Result<ResultsBody, ApiError> {
//!         todo!()
//!     }
//! }
//! ```

pub mod mock;

#[cfg(feature = "http")]
pub mod http;

// Re-exports
pub use mock::MockScanApi;

#[cfg(feature = "http")]
pub use http::{HttpApiConfig, HttpScanApi};
