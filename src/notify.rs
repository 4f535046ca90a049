//! Completion Broadcast
//!
//! Fire-once notification sent the first time a non-empty waveform
//! sequence is produced. The latch starts disarmed, flips exactly once per
//! session lifetime, and never re-arms — not even across `clear()`.
//!
//! The original widget posts the same payload twice, to its own context
//! and to a parent context; that shape is kept as two stock targets.

use serde::{Deserialize, Serialize};

/// Fixed identifier carried by every completion payload
pub const WIDGET_ID: &str = "wavesketch";

/// Payload broadcast when the first drawing is sampled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPayload {
    /// Fixed widget identifier
    pub id: String,
    /// Completion flag; always true for this one-shot signal
    pub completed: bool,
}

impl CompletionPayload {
    /// The standard payload for this widget
    pub fn new() -> Self {
        Self {
            id: WIDGET_ID.to_string(),
            completed: true,
        }
    }
}

impl Default for CompletionPayload {
    fn default() -> Self {
        Self::new()
    }
}

/// A destination for the completion broadcast
pub trait NotificationTarget {
    /// Deliver the payload; delivery failures must not propagate
    fn notify(&self, payload: &CompletionPayload);
}

/// Target that logs the JSON-serialized payload for a named context
pub struct LogTarget {
    context: &'static str,
}

impl LogTarget {
    pub fn new(context: &'static str) -> Self {
        Self { context }
    }
}

impl NotificationTarget for LogTarget {
    fn notify(&self, payload: &CompletionPayload) {
        match serde_json::to_string(payload) {
            Ok(json) => log::info!("completion -> {}: {}", self.context, json),
            Err(e) => log::warn!(
                "completion -> {}: payload serialization failed: {}",
                self.context,
                e
            ),
        }
    }
}

/// One-shot latch fanning the completion payload out to every target
pub struct CompletionBroadcast {
    fired: bool,
    targets: Vec<Box<dyn NotificationTarget>>,
}

impl CompletionBroadcast {
    /// Create a broadcast over the given targets
    pub fn new(targets: Vec<Box<dyn NotificationTarget>>) -> Self {
        Self {
            fired: false,
            targets,
        }
    }

    /// Standard wiring: one local-context target, one parent-context target
    pub fn with_default_targets() -> Self {
        Self::new(vec![
            Box::new(LogTarget::new("local")),
            Box::new(LogTarget::new("parent")),
        ])
    }

    /// Fire the broadcast if it has not fired yet
    ///
    /// Returns true when this call actually delivered the payload.
    /// Subsequent calls are no-ops.
    pub fn fire(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;

        let payload = CompletionPayload::new();
        for target in &self.targets {
            target.notify(&payload);
        }
        log::debug!("completion broadcast fired ({} targets)", self.targets.len());
        true
    }

    /// Whether the latch has already flipped
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
