//! Structured audit logging for scan sessions.
//!
//! Events are emitted via `tracing` with the `scanwatch::audit` target.

mod events;

pub use events::{
    emit_poll_progress, emit_scan_submitted, emit_session_closed, emit_session_completed,
    emit_session_failed, emit_session_started, emit_session_timed_out,
};
