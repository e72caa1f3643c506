//! Mutable session record owned by the controller.
//!
//! The record carries a generation counter bumped on every `start` and
//! `close`. Timer callbacks capture the generation they were scheduled
//! under and re-check it before mutating, so a stale fire is a no-op.

use crate::core::{Finding, ScanRequest, SessionPhase, SessionSnapshot};
use chrono::{DateTime, Utc};
use tokio::task::AbortHandle;

#[derive(Debug)]
pub(crate) struct SessionState {
    /// Monotonic counter identifying the live session. Bumped on every
    /// start and close; never reset.
    pub generation: u64,
    pub phase: SessionPhase,
    pub scan_id: Option<String>,
    pub progress: u8,
    pub phase_label: String,
    pub findings: Vec<Finding>,
    pub error: Option<String>,
    /// The submitted request, kept for an explicit retry.
    pub request: Option<ScanRequest>,
    pub started_at: Option<DateTime<Utc>>,
    pub poll_task: Option<AbortHandle>,
    pub guard_task: Option<AbortHandle>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            generation: 0,
            phase: SessionPhase::Idle,
            scan_id: None,
            progress: 0,
            phase_label: String::new(),
            findings: Vec::new(),
            error: None,
            request: None,
            started_at: None,
            poll_task: None,
            guard_task: None,
        }
    }

    /// Supersedes any live session and enters `Submitting`.
    ///
    /// Returns the new generation; timers spawned for this attempt are
    /// tagged with it.
    pub fn begin(&mut self, request: ScanRequest) -> u64 {
        self.cancel_timers();
        self.generation += 1;
        self.phase = SessionPhase::Submitting;
        self.scan_id = None;
        self.progress = 0;
        self.phase_label = String::new();
        self.findings.clear();
        self.error = None;
        self.request = Some(request);
        self.started_at = Some(Utc::now());
        self.generation
    }

    /// Discards all session state back to `Idle`.
    pub fn reset(&mut self) {
        self.cancel_timers();
        self.generation += 1;
        self.phase = SessionPhase::Idle;
        self.scan_id = None;
        self.progress = 0;
        self.phase_label = String::new();
        self.findings.clear();
        self.error = None;
        self.request = None;
        self.started_at = None;
    }

    /// Enters the terminal `Completed` phase with the given findings.
    pub fn complete(&mut self, findings: Vec<Finding>) {
        self.cancel_timers();
        self.phase = SessionPhase::Completed;
        self.progress = 100;
        self.findings = findings;
    }

    /// Enters the terminal `Failed` phase with a display message.
    pub fn fail(&mut self, message: String) {
        self.cancel_timers();
        self.phase = SessionPhase::Failed;
        self.error = Some(message);
    }

    /// Enters the terminal `TimedOut` phase with a display message.
    pub fn time_out(&mut self, message: String) {
        self.cancel_timers();
        self.phase = SessionPhase::TimedOut;
        self.error = Some(message);
    }

    /// Aborts the poll loop and the timeout guard, if armed.
    pub fn cancel_timers(&mut self) {
        if let Some(handle) = self.poll_task.take() {
            handle.abort();
        }
        if let Some(handle) = self.guard_task.take() {
            handle.abort();
        }
    }

    /// Returns `true` if a timer scheduled under `generation` may still
    /// act on this session.
    pub fn is_live(&self, generation: u64) -> bool {
        self.generation == generation && self.phase == SessionPhase::Polling
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            scan_id: self.scan_id.clone(),
            phase: self.phase,
            progress: self.progress,
            phase_label: self.phase_label.clone(),
            findings: self.findings.clone(),
            error: self.error.clone(),
            started_at: self.started_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_bumps_generation_and_clears_prior_state() {
        let mut state = SessionState::new();
        state.findings.push(sample_finding());
        state.error = Some("old error".into());
        state.progress = 80;

        let generation = state.begin(ScanRequest::full());

        assert_eq!(generation, 1);
        assert_eq!(state.phase, SessionPhase::Submitting);
        assert!(state.findings.is_empty());
        assert!(state.error.is_none());
        assert_eq!(state.progress, 0);
        assert!(state.request.is_some());
        assert!(state.started_at.is_some());
    }

    #[test]
    fn test_reset_returns_to_idle_and_invalidates_generation() {
        let mut state = SessionState::new();
        let generation = state.begin(ScanRequest::full());
        state.phase = SessionPhase::Polling;
        assert!(state.is_live(generation));

        state.reset();

        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(!state.is_live(generation));
        assert!(state.request.is_none());
    }

    #[test]
    fn test_is_live_requires_polling_phase() {
        let mut state = SessionState::new();
        let generation = state.begin(ScanRequest::full());

        // Submitting: timers must not act yet.
        assert!(!state.is_live(generation));

        state.phase = SessionPhase::Polling;
        assert!(state.is_live(generation));

        state.fail("scan failed".into());
        assert!(!state.is_live(generation));
    }

    fn sample_finding() -> Finding {
        use crate::core::{FindingCategory, FindingSeverity, FindingStatus};
        Finding {
            id: "v1".into(),
            category: FindingCategory::Vulnerability,
            severity: FindingSeverity::High,
            title: "SQL injection".into(),
            description: String::new(),
            file_path: String::new(),
            line: None,
            status: FindingStatus::Found,
        }
    }
}
