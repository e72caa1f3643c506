//! The `ScanApi` trait: the seam between the session controller and
//! the backend scan API.
//!
//! The controller only ever talks to the backend through this trait,
//! so tests drive the full workflow against a scripted mock and the
//! HTTP backend stays swappable.

use crate::core::error::ApiError;
use crate::core::protocol::{ResultsBody, ScanCreated, StatusBody};
use crate::core::types::ScanRequest;

use async_trait::async_trait;
use std::fmt::Debug;

/// Client interface to the backend scan API.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync` for use in async contexts.
/// - Implementations should never panic; all failures are `ApiError`s.
/// - Responses are validated into the [`crate::core::protocol`] shapes
///   before they are returned; the controller never sees raw bodies.
#[async_trait]
pub trait ScanApi: Send + Sync + Debug {
    /// Submits a scan request and returns the created scan's identity.
    ///
    /// # Errors
    ///
    /// - `Connection` - the request could not be sent.
    /// - `Status` - the API rejected the request.
    /// - `Decode` - the response body was not a creation response.
    async fn start_scan(&self, request: &ScanRequest) -> Result<ScanCreated, ApiError>;

    /// Fetches the current status of a scan.
    async fn scan_status(&self, scan_id: &str) -> Result<StatusBody, ApiError>;

    /// Fetches the results of a completed scan.
    async fn scan_results(&self, scan_id: &str) -> Result<ResultsBody, ApiError>;
}

/// An arc-wrapped scan API client for shared ownership.
pub type ArcScanApi = std::sync::Arc<dyn ScanApi>;
