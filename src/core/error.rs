//! Error types for the scanwatch library.
//!
//! Two layers of structured errors: [`ApiError`] for the transport
//! boundary (the backend scan API), and [`SessionError`] for the
//! controller's failure taxonomy. The library never panics; all errors
//! are returned as `Result` values.

use crate::core::types::SessionPhase;
use std::time::Duration;
use thiserror::Error;

/// Error from a call to the backend scan API.
///
/// Payloads are plain strings so the error is `Clone`, which lets mock
/// backends script failure responses.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request could not be sent or the connection dropped.
    #[error("connection to scan API failed: {message}")]
    Connection {
        /// Transport-level error message.
        message: String,
    },

    /// The API responded with a non-success HTTP status.
    #[error("scan API returned status {code}")]
    Status {
        /// HTTP status code.
        code: u16,
    },

    /// No scan exists with the given identifier.
    #[error("scan not found: {scan_id}")]
    NotFound {
        /// The scan identifier that was not found.
        scan_id: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("unexpected response from scan API: {message}")]
    Decode {
        /// Details about what failed to decode.
        message: String,
    },

    /// The API client could not be constructed.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl ApiError {
    /// Creates a `Connection` error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a `Decode` error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// The controller's failure taxonomy.
///
/// `Submission`, `Poll`, `Timeout`, and `BackendFailure` all collapse to
/// the same terminal failure display with a distinguishing message. None
/// are retried automatically; the only recovery path is the explicit
/// user-triggered retry, which restarts the whole workflow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The scan-creation call failed.
    #[error("failed to start scan: {message}")]
    Submission {
        /// What went wrong while submitting.
        message: String,
    },

    /// A status poll or the results fetch failed.
    #[error("scan status check failed: {message}")]
    Poll {
        /// What went wrong while polling.
        message: String,
    },

    /// The wall-clock budget elapsed before the scan finished.
    #[error("scan timed out after {budget:?} - please try again")]
    Timeout {
        /// The configured budget that was exceeded.
        budget: Duration,
    },

    /// The backend reported the scan as failed.
    #[error("scan failed")]
    BackendFailure,

    /// A retry was requested from a phase that does not allow it.
    #[error("cannot retry from phase '{phase}'")]
    NotRetryable {
        /// The phase the session was in.
        phase: SessionPhase,
    },

    /// The controller was misconfigured.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl SessionError {
    /// Creates a `Submission` error.
    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            message: message.into(),
        }
    }

    /// Creates a `Poll` error.
    pub fn poll(message: impl Into<String>) -> Self {
        Self::Poll {
            message: message.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns a short, stable name for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Submission { .. } => "submission",
            Self::Poll { .. } => "poll",
            Self::Timeout { .. } => "timeout",
            Self::BackendFailure => "backend",
            Self::NotRetryable { .. } => "not_retryable",
            Self::Configuration { .. } => "configuration",
        }
    }

    /// Returns `true` if this error puts the session in the terminal
    /// failure display (from which a retry is offered).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Submission { .. } | Self::Poll { .. } | Self::Timeout { .. } | Self::BackendFailure
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status { code: 503 };
        assert!(err.to_string().contains("503"));

        let err = ApiError::NotFound {
            scan_id: "s1".into(),
        };
        assert!(err.to_string().contains("s1"));
    }

    #[test]
    fn test_session_error_kinds() {
        assert_eq!(SessionError::submission("x").kind(), "submission");
        assert_eq!(SessionError::poll("x").kind(), "poll");
        assert_eq!(SessionError::BackendFailure.kind(), "backend");
        assert_eq!(
            SessionError::Timeout {
                budget: Duration::from_secs(300)
            }
            .kind(),
            "timeout"
        );
    }

    #[test]
    fn test_timeout_message_is_specific() {
        let err = SessionError::Timeout {
            budget: Duration::from_secs(300),
        };
        assert!(err.to_string().contains("timed out"));
        assert!(err.is_terminal());
    }

    #[test]
    fn test_not_retryable_is_not_terminal() {
        let err = SessionError::NotRetryable {
            phase: SessionPhase::Polling,
        };
        assert!(!err.is_terminal());
        assert!(err.to_string().contains("polling"));
    }
}
