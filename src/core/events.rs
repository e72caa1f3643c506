//! Presentation events emitted by the session controller.
//!
//! The presentation layer subscribes to these to render progress bars,
//! result lists, and toast-style notifications. Events are one-way; the
//! UI acts on the session only through the controller's operations.

use crate::core::types::Finding;
use std::fmt::Debug;
use tokio::sync::mpsc;

/// An event emitted by the session controller.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The scan advanced; render the progress bar and phase label.
    Progress {
        /// Progress percentage, 0 to 100.
        progress: u8,
        /// Label of the backend's current scan phase.
        phase_label: String,
    },

    /// The scan completed. Carries the findings, most severe first;
    /// the completion notification reports their count.
    Completed {
        /// Findings of the completed scan.
        findings: Vec<Finding>,
    },

    /// The session failed (submission, poll, backend, or timeout).
    Failed {
        /// Human-readable message for the failure display.
        message: String,
    },
}

/// Receives session events from the controller.
///
/// `emit` must not block; the controller calls it from its event loop.
pub trait EventSink: Send + Sync + Debug {
    /// Delivers one event.
    fn emit(&self, event: SessionEvent);
}

/// A sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: SessionEvent) {}
}

/// A sink that forwards events into an unbounded channel.
///
/// The receiving half is the presentation layer's subscription. If the
/// receiver is dropped, further events are discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelSink {
    /// Creates a sink and the receiver it feeds.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_sink_delivers_events() {
        let (sink, mut rx) = ChannelSink::channel();

        sink.emit(SessionEvent::Progress {
            progress: 40,
            phase_label: "Scanning...".into(),
        });

        match rx.try_recv().unwrap() {
            SessionEvent::Progress { progress, .. } => assert_eq!(progress, 40),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_channel_sink_tolerates_dropped_receiver() {
        let (sink, rx) = ChannelSink::channel();
        drop(rx);

        // Must not panic.
        sink.emit(SessionEvent::Failed {
            message: "scan failed".into(),
        });
    }
}
