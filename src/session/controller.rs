//! The scan session controller.
//!
//! Drives one security scan from submission through completion, failure,
//! or timeout: submits the scan, polls status on a fixed interval, arms
//! a one-shot wall-clock guard, maps results into findings, and emits
//! presentation events along the way.
//!
//! Timer hygiene: every spawned task captures the session generation it
//! belongs to and re-checks it (and that the session is still polling)
//! before touching state. Starting a new session or closing the dialog
//! bumps the generation and aborts the live tasks, so a stale tick that
//! still manages to fire is a no-op.

use crate::audit;
use crate::core::{
    ArcScanApi, EventSink, NullSink, ScanApi, ScanStatus, ScanRequest, SessionError, SessionEvent,
    SessionPhase, SessionSnapshot,
};
use crate::session::config::SessionConfig;
use crate::session::state::SessionState;

use std::sync::{Arc, RwLock, RwLockWriteGuard};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Builder for creating a [`SessionController`].
pub struct SessionControllerBuilder {
    api: Option<ArcScanApi>,
    sink: Arc<dyn EventSink>,
    config: SessionConfig,
}

impl SessionControllerBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            api: None,
            sink: Arc::new(NullSink),
            config: SessionConfig::default(),
        }
    }

    /// Sets the backend scan API client.
    pub fn with_api<A: ScanApi + 'static>(mut self, api: A) -> Self {
        self.api = Some(Arc::new(api));
        self
    }

    /// Sets the backend scan API client from a shared handle.
    pub fn with_arc_api(mut self, api: ArcScanApi) -> Self {
        self.api = Some(api);
        self
    }

    /// Sets the event sink the presentation layer listens on.
    pub fn with_event_sink<E: EventSink + 'static>(mut self, sink: E) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the controller.
    pub fn build(self) -> Result<SessionController, SessionError> {
        let api = self
            .api
            .ok_or_else(|| SessionError::configuration("a scan API client is required"))?;

        Ok(SessionController {
            api,
            sink: self.sink,
            config: self.config,
            state: Arc::new(RwLock::new(SessionState::new())),
        })
    }
}

impl Default for SessionControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Manages the lifecycle of one scan session.
///
/// The session record is owned exclusively by the controller; the
/// presentation layer reads [`SessionController::snapshot`] and acts
/// through `start`/`retry`/`close`.
pub struct SessionController {
    api: ArcScanApi,
    sink: Arc<dyn EventSink>,
    config: SessionConfig,
    state: Arc<RwLock<SessionState>>,
}

impl SessionController {
    /// Creates a new builder.
    pub fn builder() -> SessionControllerBuilder {
        SessionControllerBuilder::new()
    }

    /// Starts a scan session for the given request.
    ///
    /// Any session still submitting or polling is superseded: its
    /// timers are cancelled and its state is cleared before the new
    /// submission goes out. On a successful submission the session
    /// enters `Polling` with the poll loop and timeout guard armed; on
    /// a failed submission it enters `Failed` and no polling is
    /// scheduled.
    pub async fn start(&self, request: ScanRequest) -> Result<(), SessionError> {
        let generation = self.lock().begin(request.clone());
        audit::emit_session_started(&request, generation);

        match self.api.start_scan(&request).await {
            Ok(created) => {
                let scan_id = created.id.clone();
                {
                    let mut state = self.lock();
                    if state.generation != generation {
                        // Superseded while the submission was in flight.
                        return Ok(());
                    }
                    state.scan_id = Some(scan_id.clone());
                    state.phase_label = created
                        .current_phase
                        .clone()
                        .unwrap_or_else(|| "Initializing...".to_string());
                    state.phase = SessionPhase::Polling;
                }

                audit::emit_scan_submitted(&scan_id, generation);
                self.spawn_poll_loop(generation, scan_id.clone());
                self.spawn_timeout_guard(generation, scan_id);
                Ok(())
            }
            Err(e) => {
                let error = SessionError::submission(e.to_string());
                let message = error.to_string();
                {
                    let mut state = self.lock();
                    if state.generation != generation {
                        return Ok(());
                    }
                    state.fail(message.clone());
                }

                audit::emit_session_failed(None, error.kind(), &message);
                self.sink.emit(SessionEvent::Failed { message });
                Err(error)
            }
        }
    }

    /// Retries the failed session with the identical original request.
    ///
    /// Valid only from the terminal failure display (`Failed`, or
    /// `TimedOut` since it renders as a failure). The error is cleared
    /// and the whole workflow restarts from submission.
    pub async fn retry(&self) -> Result<(), SessionError> {
        let request = {
            let state = self
                .state
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !state.phase.is_terminal_failure() {
                return Err(SessionError::NotRetryable { phase: state.phase });
            }
            state
                .request
                .clone()
                .ok_or_else(|| SessionError::configuration("no request recorded for retry"))?
        };

        self.start(request).await
    }

    /// Closes the session from any phase.
    ///
    /// Cancels the poll loop and timeout guard and discards all session
    /// state; no partial results are retained across reopenings.
    pub fn close(&self) {
        let generation = {
            let mut state = self.lock();
            state.reset();
            state.generation
        };
        audit::emit_session_closed(generation);
    }

    /// Returns a read-only snapshot of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .snapshot()
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn lock(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn spawn_poll_loop(&self, generation: u64, scan_id: String) {
        let api = Arc::clone(&self.api);
        let sink = Arc::clone(&self.sink);
        let state = Arc::clone(&self.state);
        let interval = self.config.poll_interval;

        let handle =
            tokio::spawn(
                async move { poll_loop(api, sink, state, interval, generation, scan_id).await },
            );

        let mut state = self.lock();
        if state.generation == generation {
            state.poll_task = Some(handle.abort_handle());
        } else {
            handle.abort();
        }
    }

    fn spawn_timeout_guard(&self, generation: u64, scan_id: String) {
        let sink = Arc::clone(&self.sink);
        let state = Arc::clone(&self.state);
        let budget = self.config.timeout;

        let handle = tokio::spawn(async move {
            timeout_guard(sink, state, budget, generation, scan_id).await
        });

        let mut state = self.lock();
        if state.generation == generation {
            state.guard_task = Some(handle.abort_handle());
        } else {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("config", &self.config)
            .field("phase", &self.snapshot().phase)
            .finish()
    }
}

/// Polls the scan's status on a fixed interval until a terminal
/// transition or cancellation.
///
/// Ticks are serialized: the next tick is not issued before the prior
/// response has been handled, so overlapping requests for the same scan
/// cannot occur.
async fn poll_loop(
    api: ArcScanApi,
    sink: Arc<dyn EventSink>,
    state: Arc<RwLock<SessionState>>,
    interval: std::time::Duration,
    generation: u64,
    scan_id: String,
) {
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !lock(&state).is_live(generation) {
            return;
        }

        match api.scan_status(&scan_id).await {
            Ok(body) => match body.status {
                ScanStatus::Completed => {
                    fetch_results(&api, &sink, &state, generation, &scan_id).await;
                    return;
                }
                ScanStatus::Failed => {
                    let error = SessionError::BackendFailure;
                    fail_session(&state, &sink, generation, Some(&scan_id), &error);
                    return;
                }
                ScanStatus::Running | ScanStatus::Other => {
                    let update = {
                        let mut state = lock(&state);
                        if !state.is_live(generation) {
                            return;
                        }
                        let reported = body.progress.unwrap_or(0).min(100);
                        state.progress = state.progress.max(reported);
                        state.phase_label = body
                            .current_phase
                            .clone()
                            .unwrap_or_else(|| "Processing...".to_string());
                        (state.progress, state.phase_label.clone())
                    };

                    audit::emit_poll_progress(&scan_id, update.0, &update.1);
                    sink.emit(SessionEvent::Progress {
                        progress: update.0,
                        phase_label: update.1,
                    });
                }
            },
            Err(e) => {
                // Fail-fast: a poll error ends the session; recovery is
                // the user's explicit retry.
                let error = SessionError::poll(e.to_string());
                fail_session(&state, &sink, generation, Some(&scan_id), &error);
                return;
            }
        }
    }
}

/// Fetches and applies the results of a scan the backend reported
/// completed. A results fetch that itself fails fails the session; it
/// never silently shows zero findings.
async fn fetch_results(
    api: &ArcScanApi,
    sink: &Arc<dyn EventSink>,
    state: &Arc<RwLock<SessionState>>,
    generation: u64,
    scan_id: &str,
) {
    match api.scan_results(scan_id).await {
        Ok(results) => {
            let findings = results.into_findings();
            {
                let mut state = lock(state);
                if !state.is_live(generation) {
                    return;
                }
                state.complete(findings.clone());
            }

            audit::emit_session_completed(scan_id, findings.len());
            sink.emit(SessionEvent::Completed { findings });
        }
        Err(e) => {
            let error = SessionError::poll(e.to_string());
            fail_session(state, sink, generation, Some(scan_id), &error);
        }
    }
}

fn fail_session(
    state: &Arc<RwLock<SessionState>>,
    sink: &Arc<dyn EventSink>,
    generation: u64,
    scan_id: Option<&str>,
    error: &SessionError,
) {
    let message = error.to_string();
    {
        let mut state = lock(state);
        if !state.is_live(generation) {
            return;
        }
        state.fail(message.clone());
    }

    audit::emit_session_failed(scan_id, error.kind(), &message);
    sink.emit(SessionEvent::Failed { message });
}

/// One-shot wall-clock guard armed at submission.
///
/// Not reset by poll ticks: the budget is per scan attempt. If the
/// session is still polling under the same generation when the budget
/// elapses, the poll loop is cancelled and the session is failed with a
/// timeout-specific message.
async fn timeout_guard(
    sink: Arc<dyn EventSink>,
    state: Arc<RwLock<SessionState>>,
    budget: std::time::Duration,
    generation: u64,
    scan_id: String,
) {
    tokio::time::sleep(budget).await;

    let message = SessionError::Timeout { budget }.to_string();
    {
        let mut state = lock(&state);
        if !state.is_live(generation) {
            return;
        }
        state.time_out(message.clone());
    }

    audit::emit_session_timed_out(&scan_id, budget);
    sink.emit(SessionEvent::Failed { message });
}

fn lock(state: &Arc<RwLock<SessionState>>) -> std::sync::RwLockWriteGuard<'_, SessionState> {
    state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
