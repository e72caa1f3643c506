//! Wire types for the backend scan API.
//!
//! Each endpoint's response is deserialized into a small closed set of
//! tagged variants here, at the boundary, before anything enters the
//! session state machine. A body that does not fit these shapes is a
//! decode error, never a silently-absorbed value.

use crate::core::types::{Finding, FindingCategory, FindingSeverity, FindingStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of the scan-creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanCreated {
    /// Backend-assigned scan identifier.
    pub id: String,

    /// Initial status, if the backend reports one.
    #[serde(default)]
    pub status: Option<ScanStatus>,

    /// Initial progress percentage, if reported.
    #[serde(default)]
    pub progress: Option<u8>,

    /// Label of the backend's initial scan phase.
    #[serde(default)]
    pub current_phase: Option<String>,

    /// When the backend created the scan record.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ScanCreated {
    /// Creates a minimal response with the given id and phase label.
    pub fn new(id: impl Into<String>, current_phase: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: Some(ScanStatus::Running),
            progress: Some(0),
            current_phase: Some(current_phase.into()),
            created_at: None,
        }
    }
}

/// Backend-reported status of a scan.
///
/// Any status string the backend introduces that this client does not
/// know parses as `Other` and is treated as still-in-progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// The scan is in progress.
    Running,
    /// The scan finished; results can be fetched.
    Completed,
    /// The backend gave up on the scan.
    Failed,
    /// An unrecognized status string.
    #[serde(other)]
    Other,
}

/// Response of a status poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    /// Current status of the scan.
    pub status: ScanStatus,

    /// Progress percentage, if reported.
    #[serde(default)]
    pub progress: Option<u8>,

    /// Label of the backend's current scan phase.
    #[serde(default)]
    pub current_phase: Option<String>,
}

impl StatusBody {
    /// Creates a running status with the given progress and phase label.
    pub fn running(progress: u8, current_phase: impl Into<String>) -> Self {
        Self {
            status: ScanStatus::Running,
            progress: Some(progress),
            current_phase: Some(current_phase.into()),
        }
    }

    /// Creates a bare completed status.
    pub fn completed() -> Self {
        Self {
            status: ScanStatus::Completed,
            progress: None,
            current_phase: None,
        }
    }

    /// Creates a bare failed status.
    pub fn failed() -> Self {
        Self {
            status: ScanStatus::Failed,
            progress: None,
            current_phase: None,
        }
    }
}

/// One vulnerability record as returned by the results endpoint.
///
/// `confidence` and `status` ride the wire but do not map into a
/// [`Finding`]; the presentation layer has no use for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    /// Backend-assigned identifier.
    pub id: String,

    /// Category of the issue.
    #[serde(rename = "type")]
    pub kind: FindingCategory,

    /// Severity of the issue.
    pub severity: FindingSeverity,

    /// Short human-readable title.
    pub title: String,

    /// Longer description, if the backend recorded one.
    #[serde(default)]
    pub description: Option<String>,

    /// Path of the affected file, if recorded.
    #[serde(default)]
    pub file_path: Option<String>,

    /// Line number in the affected file, if recorded.
    #[serde(default)]
    pub line_number: Option<u32>,

    /// Scanner confidence in the finding, if reported.
    #[serde(default)]
    pub confidence: Option<f32>,

    /// Backend-side triage status, if reported.
    #[serde(default)]
    pub status: Option<String>,
}

impl VulnerabilityRecord {
    /// Maps this record into a [`Finding`].
    ///
    /// Category and severity are copied verbatim; a missing description
    /// or file path becomes the empty string; the status is pinned to
    /// `Found`.
    pub fn into_finding(self) -> Finding {
        Finding {
            id: self.id,
            category: self.kind,
            severity: self.severity,
            title: self.title,
            description: self.description.unwrap_or_default(),
            file_path: self.file_path.unwrap_or_default(),
            line: self.line_number,
            status: FindingStatus::Found,
        }
    }
}

/// Response of the results fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultsBody {
    /// The vulnerability records of the completed scan.
    #[serde(default)]
    pub vulnerabilities: Vec<VulnerabilityRecord>,
}

impl ResultsBody {
    /// Maps the records into findings, ordered most-severe-first.
    ///
    /// The sort is stable, so records of equal severity keep the
    /// backend's order.
    pub fn into_findings(self) -> Vec<Finding> {
        let mut findings: Vec<Finding> = self
            .vulnerabilities
            .into_iter()
            .map(VulnerabilityRecord::into_finding)
            .collect();
        findings.sort_by(|a, b| b.severity.cmp(&a.severity));
        findings
    }
}
