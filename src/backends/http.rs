//! HTTP backend for the scan API.
//!
//! Talks to the backend over REST:
//!
//! - `POST {base_url}/scans/start` - submit a scan
//! - `GET {base_url}/scans/{id}/status` - poll status
//! - `GET {base_url}/scans/{id}/results` - fetch results
//!
//! A bearer credential is attached per request when the configured
//! store yields one; an empty store is tolerated and the request is
//! sent without an Authorization header.

use crate::auth::CredentialStore;
use crate::core::{ApiError, ResultsBody, ScanApi, ScanCreated, ScanRequest, StatusBody};

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// HTTP backend configuration.
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// Base URL of the scan API (e.g. `https://api.example.com/api`).
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpApiConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A [`ScanApi`] implementation over HTTP.
#[derive(Debug)]
pub struct HttpScanApi {
    config: HttpApiConfig,
    client: reqwest::Client,
    credentials: Option<Arc<dyn CredentialStore>>,
}

impl HttpScanApi {
    /// Creates a new HTTP backend with the given configuration.
    pub fn new(config: HttpApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            credentials: None,
        })
    }

    /// Attaches a credential store consulted on every request.
    pub fn with_credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &HttpApiConfig {
        &self.config
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.as_ref().and_then(|store| store.load()) {
            Some(credentials) => request.bearer_auth(credentials.bearer_token().expose_secret()),
            None => request,
        }
    }

    async fn read_body<T: DeserializeOwned>(
        response: reqwest::Response,
        scan_id: Option<&str>,
    ) -> Result<T, ApiError> {
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            if let Some(scan_id) = scan_id {
                return Err(ApiError::NotFound {
                    scan_id: scan_id.to_string(),
                });
            }
        }

        if !response.status().is_success() {
            return Err(ApiError::Status {
                code: response.status().as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))
    }
}

#[async_trait]
impl ScanApi for HttpScanApi {
    async fn start_scan(&self, request: &ScanRequest) -> Result<ScanCreated, ApiError> {
        let url = format!("{}/scans/start", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url).json(request))
            .send()
            .await
            .map_err(|e| ApiError::connection(e.to_string()))?;

        Self::read_body(response, None).await
    }

    async fn scan_status(&self, scan_id: &str) -> Result<StatusBody, ApiError> {
        let url = format!("{}/scans/{}/status", self.config.base_url, scan_id);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ApiError::connection(e.to_string()))?;

        Self::read_body(response, Some(scan_id)).await
    }

    async fn scan_results(&self, scan_id: &str) -> Result<ResultsBody, ApiError> {
        let url = format!("{}/scans/{}/results", self.config.base_url, scan_id);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ApiError::connection(e.to_string()))?;

        Self::read_body(response, Some(scan_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentialStore;

    #[test]
    fn test_config_strips_trailing_slash() {
        let config = HttpApiConfig::new("http://localhost:8000/api/");
        assert_eq!(config.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_config_builder() {
        let config =
            HttpApiConfig::new("http://localhost:8000/api").with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_backend_builds_with_and_without_credentials() {
        let api = HttpScanApi::new(HttpApiConfig::new("http://localhost:8000/api")).unwrap();
        assert!(api.credentials.is_none());

        let store = Arc::new(MemoryCredentialStore::with_token("token"));
        let api = api.with_credential_store(store);
        assert!(api.credentials.is_some());
    }
}
