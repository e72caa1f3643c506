//! Mock scan API for testing.
//!
//! The mock is scripted per endpoint: pushed responses are consumed in
//! order, and when a queue runs dry the endpoint answers with a benign
//! default (a fresh scan id, a `running`/0 status, empty results). All
//! calls are recorded so tests can assert payload identity and that a
//! cancelled session stops polling.

use crate::core::{ApiError, ResultsBody, ScanApi, ScanCreated, ScanRequest, StatusBody};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::RwLock;

/// A scripted mock of the backend scan API.
#[derive(Debug, Default)]
pub struct MockScanApi {
    start_responses: RwLock<VecDeque<Result<ScanCreated, ApiError>>>,
    status_responses: RwLock<VecDeque<Result<StatusBody, ApiError>>>,
    results_responses: RwLock<VecDeque<Result<ResultsBody, ApiError>>>,
    started_requests: RwLock<Vec<ScanRequest>>,
    status_scan_ids: RwLock<Vec<String>>,
    results_scan_ids: RwLock<Vec<String>>,
}

impl MockScanApi {
    /// Creates a mock with empty scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a scan-creation response.
    pub fn push_start(&self, response: Result<ScanCreated, ApiError>) {
        self.start_responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
    }

    /// Queues a status response.
    pub fn push_status(&self, response: Result<StatusBody, ApiError>) {
        self.status_responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
    }

    /// Queues a results response.
    pub fn push_results(&self, response: Result<ResultsBody, ApiError>) {
        self.results_responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
    }

    /// Queues a `running` status with the given progress and label.
    pub fn push_running(&self, progress: u8, phase_label: &str) {
        self.push_status(Ok(StatusBody::running(progress, phase_label)));
    }

    /// Returns the scan requests submitted so far.
    pub fn started_requests(&self) -> Vec<ScanRequest> {
        self.started_requests
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the scan ids whose status has been polled, in order.
    pub fn status_scan_ids(&self) -> Vec<String> {
        self.status_scan_ids
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the number of status polls issued.
    pub fn status_call_count(&self) -> usize {
        self.status_scan_ids
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Returns the number of results fetches issued.
    pub fn results_call_count(&self) -> usize {
        self.results_scan_ids
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl ScanApi for MockScanApi {
    async fn start_scan(&self, request: &ScanRequest) -> Result<ScanCreated, ApiError> {
        self.started_requests
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        let scripted = self
            .start_responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        scripted.unwrap_or_else(|| {
            Ok(ScanCreated::new(
                format!("scan-{}", uuid::Uuid::new_v4()),
                "Initializing...",
            ))
        })
    }

    async fn scan_status(&self, scan_id: &str) -> Result<StatusBody, ApiError> {
        self.status_scan_ids
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(scan_id.to_string());

        let scripted = self
            .status_responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        scripted.unwrap_or_else(|| Ok(StatusBody::running(0, "Processing...")))
    }

    async fn scan_results(&self, scan_id: &str) -> Result<ResultsBody, ApiError> {
        self.results_scan_ids
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(scan_id.to_string());

        let scripted = self
            .results_responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();

        scripted.unwrap_or_else(|| Ok(ResultsBody::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScanStatus;

    #[tokio::test]
    async fn test_scripted_responses_consumed_in_order() {
        let mock = MockScanApi::new();
        mock.push_running(10, "Analyzing dependencies...");
        mock.push_status(Ok(StatusBody::completed()));

        let first = mock.scan_status("s1").await.unwrap();
        assert_eq!(first.progress, Some(10));

        let second = mock.scan_status("s1").await.unwrap();
        assert_eq!(second.status, ScanStatus::Completed);

        // Queue drained; default is a running status.
        let third = mock.scan_status("s1").await.unwrap();
        assert_eq!(third.status, ScanStatus::Running);
        assert_eq!(mock.status_call_count(), 3);
    }

    #[tokio::test]
    async fn test_default_start_assigns_fresh_ids() {
        let mock = MockScanApi::new();
        let a = mock.start_scan(&ScanRequest::full()).await.unwrap();
        let b = mock.start_scan(&ScanRequest::full()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(mock.started_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_scripted_error_is_returned() {
        let mock = MockScanApi::new();
        mock.push_start(Err(ApiError::connection("connection refused")));

        let result = mock.start_scan(&ScanRequest::full()).await;
        assert!(matches!(result, Err(ApiError::Connection { .. })));
    }
}
