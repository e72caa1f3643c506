//! Core types used throughout the scanwatch library.
//!
//! This module defines the fundamental data structures for representing
//! scan requests, session lifecycle phases, findings, and read-only
//! session snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request to scan a repository or path.
///
/// Immutable once submitted; the controller keeps a copy so an explicit
/// retry re-submits the identical payload. The fields serialize verbatim
/// as the body of the scan-creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Identifier of the repository to scan, if known.
    pub repository_id: Option<String>,

    /// Kind of scan to run (e.g. "full").
    pub scan_type: String,

    /// Optional path restricting the scan to a subtree.
    pub target_path: Option<String>,
}

impl ScanRequest {
    /// Creates a request with the given scan type.
    pub fn new(scan_type: impl Into<String>) -> Self {
        Self {
            repository_id: None,
            scan_type: scan_type.into(),
            target_path: None,
        }
    }

    /// Creates a full-scan request.
    pub fn full() -> Self {
        Self::new("full")
    }

    /// Sets the repository identifier.
    pub fn with_repository_id(mut self, id: impl Into<String>) -> Self {
        self.repository_id = Some(id.into());
        self
    }

    /// Sets the target path.
    pub fn with_target_path(mut self, path: impl Into<String>) -> Self {
        self.target_path = Some(path.into());
        self
    }
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self::full()
    }
}

/// Lifecycle phase of a scan session.
///
/// Transitions are one-directional except `Failed -> Submitting` on an
/// explicit retry; `close` returns any phase to `Idle`. `TimedOut` is
/// presented to the user as a failure with a timeout-specific message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No session is open.
    Idle,
    /// The scan-creation request is in flight.
    Submitting,
    /// The scan is running and being polled for status.
    Polling,
    /// The scan finished and results were retrieved.
    Completed,
    /// The scan failed (submission, poll, or backend-reported).
    Failed,
    /// The wall-clock budget elapsed before the scan finished.
    TimedOut,
}

impl SessionPhase {
    /// Returns `true` while the session has work in flight.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Submitting | Self::Polling)
    }

    /// Returns `true` for the terminal failure display states.
    ///
    /// `TimedOut` is included: it renders on the failure screen, so the
    /// retry action is available from it.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::TimedOut)
    }

    /// Returns `true` once no further transitions can occur without a
    /// user action.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::TimedOut)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Polling => "polling",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
        };
        write!(f, "{}", name)
    }
}

/// Category of a reported finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    /// A security vulnerability in source code.
    Vulnerability,
    /// A known-vulnerable or outdated dependency.
    Dependency,
    /// A code-quality issue with security impact.
    CodeQuality,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vulnerability => "vulnerability",
            Self::Dependency => "dependency",
            Self::CodeQuality => "code_quality",
        };
        write!(f, "{}", name)
    }
}

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    /// Low severity - lenient policies, minor weaknesses.
    Low,
    /// Medium severity - issues that should be scheduled for a fix.
    Medium,
    /// High severity - exploitable issues requiring prompt attention.
    High,
    /// Critical severity - issues requiring immediate action.
    Critical,
}

impl FindingSeverity {
    /// Returns the severity as a numeric rank (1-4, higher is worse).
    ///
    /// Used to order findings most-severe-first for display.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        write!(f, "{}", name)
    }
}

/// Presentation status of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    /// The issue was found by a completed scan.
    Found,
    /// The issue is still being analyzed.
    Scanning,
    /// The issue has been resolved.
    Completed,
}

/// One security issue surfaced by a completed scan.
///
/// Immutable once constructed from an API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Backend-assigned identifier.
    pub id: String,

    /// Category of the finding.
    pub category: FindingCategory,

    /// Severity of the finding.
    pub severity: FindingSeverity,

    /// Short human-readable title.
    pub title: String,

    /// Longer description; empty when the backend omitted one.
    pub description: String,

    /// Path of the affected file; empty when the backend omitted one.
    pub file_path: String,

    /// Line number in the affected file, if known.
    pub line: Option<u32>,

    /// Presentation status; always `Found` when mapped from results.
    pub status: FindingStatus,
}

/// Read-only view of a scan session handed to the presentation layer.
///
/// The presentation layer never mutates session state directly; it acts
/// through the controller's `start`/`retry`/`close` operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Backend-assigned scan identifier, once submission succeeded.
    pub scan_id: Option<String>,

    /// Current lifecycle phase.
    pub phase: SessionPhase,

    /// Progress percentage, 0 to 100. Monotonically non-decreasing
    /// while polling; reaches 100 only on completion.
    pub progress: u8,

    /// Human-readable label of the backend's current scan phase.
    pub phase_label: String,

    /// Findings of a completed scan, most severe first. Empty until
    /// the session completes.
    pub findings: Vec<Finding>,

    /// Human-readable error message for the failure display.
    pub error: Option<String>,

    /// When the session was started.
    pub started_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_request_builder() {
        let request = ScanRequest::full()
            .with_repository_id("repo-1")
            .with_target_path("src/");

        assert_eq!(request.scan_type, "full");
        assert_eq!(request.repository_id.as_deref(), Some("repo-1"));
        assert_eq!(request.target_path.as_deref(), Some("src/"));
    }

    #[test]
    fn test_scan_request_wire_shape() {
        let request = ScanRequest::full().with_repository_id("r1");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["repository_id"], "r1");
        assert_eq!(json["scan_type"], "full");
        assert!(json["target_path"].is_null());
    }

    #[test]
    fn test_phase_predicates() {
        assert!(SessionPhase::Submitting.is_active());
        assert!(SessionPhase::Polling.is_active());
        assert!(!SessionPhase::Idle.is_active());

        assert!(SessionPhase::Failed.is_terminal_failure());
        assert!(SessionPhase::TimedOut.is_terminal_failure());
        assert!(!SessionPhase::Completed.is_terminal_failure());
        assert!(SessionPhase::Completed.is_terminal());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(FindingSeverity::Low < FindingSeverity::Medium);
        assert!(FindingSeverity::Medium < FindingSeverity::High);
        assert!(FindingSeverity::High < FindingSeverity::Critical);
        assert_eq!(FindingSeverity::Critical.rank(), 4);
    }

    #[test]
    fn test_severity_wire_names() {
        let severity: FindingSeverity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(severity, FindingSeverity::Critical);

        let category: FindingCategory = serde_json::from_str("\"code_quality\"").unwrap();
        assert_eq!(category, FindingCategory::CodeQuality);
    }
}
