//! Audit event emission.
//!
//! Structured `tracing` events under the `scanwatch::audit` target, one
//! per session lifecycle transition. Consumers filter on the target to
//! build an activity log of scan sessions.

use crate::core::ScanRequest;
use std::time::Duration;

/// Emits an audit event for a session being started.
pub fn emit_session_started(request: &ScanRequest, generation: u64) {
    tracing::info!(
        target: "scanwatch::audit",
        event_type = "session_started",
        repository_id = ?request.repository_id,
        scan_type = %request.scan_type,
        target_path = ?request.target_path,
        generation = generation,
        "Scan session started"
    );
}

/// Emits an audit event once the backend accepted the scan.
pub fn emit_scan_submitted(scan_id: &str, generation: u64) {
    tracing::info!(
        target: "scanwatch::audit",
        event_type = "scan_submitted",
        scan_id = %scan_id,
        generation = generation,
        "Scan accepted by backend"
    );
}

/// Emits an audit event for a progress update.
pub fn emit_poll_progress(scan_id: &str, progress: u8, phase_label: &str) {
    tracing::debug!(
        target: "scanwatch::audit",
        event_type = "poll_progress",
        scan_id = %scan_id,
        progress = progress,
        phase_label = %phase_label,
        "Scan progress"
    );
}

/// Emits an audit event for a completed session.
pub fn emit_session_completed(scan_id: &str, finding_count: usize) {
    tracing::info!(
        target: "scanwatch::audit",
        event_type = "session_completed",
        scan_id = %scan_id,
        finding_count = finding_count,
        "Scan completed"
    );
}

/// Emits an audit event for a failed session.
pub fn emit_session_failed(scan_id: Option<&str>, kind: &str, message: &str) {
    tracing::warn!(
        target: "scanwatch::audit",
        event_type = "session_failed",
        scan_id = ?scan_id,
        kind = %kind,
        message = %message,
        "Scan session failed"
    );
}

/// Emits an audit event for a timed-out session.
pub fn emit_session_timed_out(scan_id: &str, budget: Duration) {
    tracing::warn!(
        target: "scanwatch::audit",
        event_type = "session_timed_out",
        scan_id = %scan_id,
        budget_ms = budget.as_millis() as u64,
        "Scan session timed out"
    );
}

/// Emits an audit event for a closed session.
pub fn emit_session_closed(generation: u64) {
    tracing::debug!(
        target: "scanwatch::audit",
        event_type = "session_closed",
        generation = generation,
        "Scan session closed"
    );
}
