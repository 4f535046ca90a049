//! Session State Machine
//!
//! Ties the surface, the two transforms, the playback sink, and the
//! completion broadcast together: idle → drawing → sampled → playing,
//! driven by pointer events and the play/clear triggers.
//!
//! Invariants owned here:
//! - synthesis only runs with a non-empty waveform sequence
//! - exactly one signal plays at a time; a new play stops the prior one
//! - the active handle is released on every exit path (new play, clear,
//!   session drop)

use std::fmt;

use crate::config::WidgetConfig;
use crate::error::{Result, WavesketchError};
use crate::notify::CompletionBroadcast;
use crate::sampler::sample_surface;
use crate::sink::{PlaybackHandle, PlaybackSink};
use crate::surface::Surface;
use crate::synth::{synthesize, SynthesisParameters};
use crate::waveform::WaveformSequence;

/// Widget lifecycle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No drawing exists (initial state, and after clear)
    #[default]
    Idle,
    /// A freehand stroke is in progress
    Drawing,
    /// A waveform sequence exists and the play trigger is armed
    Sampled,
    /// A synthesized signal is playing
    Playing,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "Idle"),
            SessionPhase::Drawing => write!(f, "Drawing"),
            SessionPhase::Sampled => write!(f, "Sampled"),
            SessionPhase::Playing => write!(f, "Playing"),
        }
    }
}

/// Widget session: surface, sampled waveform, parameters, and playback
pub struct Session {
    phase: SessionPhase,
    surface: Surface,
    waveform: WaveformSequence,
    config: WidgetConfig,
    sink: Box<dyn PlaybackSink>,
    active: Option<PlaybackHandle>,
    broadcast: CompletionBroadcast,
}

impl Session {
    /// Create a session over the given sink with the standard
    /// local + parent completion targets
    pub fn new(config: WidgetConfig, sink: Box<dyn PlaybackSink>) -> Result<Self> {
        Self::with_broadcast(config, sink, CompletionBroadcast::with_default_targets())
    }

    /// Create a session with custom completion wiring
    pub fn with_broadcast(
        config: WidgetConfig,
        sink: Box<dyn PlaybackSink>,
        broadcast: CompletionBroadcast,
    ) -> Result<Self> {
        config.validate()?;
        let surface = Surface::new(config.surface_width, config.surface_height);
        Ok(Self {
            phase: SessionPhase::Idle,
            surface,
            waveform: WaveformSequence::empty(),
            config,
            sink,
            active: None,
            broadcast,
        })
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// Pointer pressed: start a freehand stroke
    ///
    /// Drawing is allowed from any phase; an in-flight playback keeps
    /// running (fire-and-forget) until the next play or clear.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.surface.begin_stroke(x, y);
        log::debug!("[SESSION] stroke begin at ({:.1}, {:.1})", x, y);
        self.phase = SessionPhase::Drawing;
    }

    /// Pointer dragged: extend the stroke; a no-op outside a stroke
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.phase == SessionPhase::Drawing {
            self.surface.stroke_to(x, y);
        }
    }

    /// Pointer released: finish the stroke and run the Sampler
    ///
    /// The waveform sequence is fully replaced, never patched. The first
    /// time a non-empty sequence is produced, the completion broadcast
    /// fires (once per session lifetime).
    pub fn pointer_up(&mut self) {
        if self.phase != SessionPhase::Drawing {
            return;
        }
        self.surface.end_stroke();
        self.waveform = sample_surface(&self.surface);
        log::debug!("[SESSION] sampled {} columns", self.waveform.len());

        if !self.waveform.is_empty() {
            self.broadcast.fire();
        }
        self.phase = SessionPhase::Sampled;
    }

    // ========================================================================
    // Playback triggers
    // ========================================================================

    /// Whether the play trigger is enabled
    ///
    /// An all-zero non-empty sequence is still playable (it synthesizes
    /// to silence); only the empty sequence disables the trigger.
    pub fn can_play(&self) -> bool {
        !self.waveform.is_empty()
    }

    /// Synthesize with the current parameter snapshot and play once
    ///
    /// Runs only from Sampled or Playing: a request arriving mid-stroke
    /// is ignored (the trigger re-arms at `pointer_up`). Stops any active
    /// playback before starting the new one, so at most one handle is
    /// ever active.
    ///
    /// # Errors
    /// `EmptyWaveform` when no drawing has been sampled, or a sink error
    /// when the stream cannot be started.
    pub fn play(&mut self) -> Result<()> {
        if !self.can_play() {
            return Err(WavesketchError::EmptyWaveform);
        }
        if self.phase == SessionPhase::Drawing {
            log::warn!("[SESSION] play ignored while a stroke is in progress");
            return Ok(());
        }

        self.stop_active();

        let params = SynthesisParameters {
            frequency_hz: self.config.frequency_hz,
            volume: self.config.volume,
        };
        let signal = synthesize(&self.waveform, &params, self.sink.sample_rate())?;
        let handle = self.sink.play(&signal, self.config.volume)?;
        log::debug!(
            "[SESSION] playing at {} Hz, volume {:.2}",
            params.frequency_hz,
            params.volume
        );

        self.active = Some(handle);
        self.phase = SessionPhase::Playing;
        Ok(())
    }

    /// Observe the sink: transition Playing → Sampled once playback ends
    pub fn poll(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        if let Some(handle) = self.active {
            if !self.sink.is_active(handle) {
                log::debug!("[SESSION] playback ended: {:?}", handle);
                self.active = None;
                self.phase = SessionPhase::Sampled;
            }
        }
    }

    /// Clear the drawing: stop playback, wipe the surface, empty the
    /// sequence, disable the play trigger
    ///
    /// The completion latch does not re-arm.
    pub fn clear(&mut self) {
        self.stop_active();
        self.surface.clear();
        self.waveform = WaveformSequence::empty();
        self.phase = SessionPhase::Idle;
        log::debug!("[SESSION] cleared");
    }

    /// Stop the active handle if any; already-stopped handles are ignored
    /// by the sink contract
    fn stop_active(&mut self) {
        if let Some(handle) = self.active.take() {
            self.sink.stop(handle);
        }
    }

    // ========================================================================
    // Controls & queries
    // ========================================================================

    /// Set the carrier frequency, clamped to the control range
    ///
    /// Affects only future synthesis, never a signal already produced.
    pub fn set_frequency(&mut self, hz: f32) {
        self.config.frequency_hz = WidgetConfig::clamp_frequency(hz);
    }

    /// Set the playback volume, clamped to [0, 1]
    ///
    /// Applied as a whole-buffer gain at the next play; no resynthesis.
    pub fn set_volume(&mut self, volume: f32) {
        self.config.volume = WidgetConfig::clamp_volume(volume);
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn waveform(&self) -> &WaveformSequence {
        &self.waveform
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Whether the one-shot completion broadcast has fired
    pub fn completion_fired(&self) -> bool {
        self.broadcast.has_fired()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Guaranteed release of the playback handle on every exit path
        self.stop_active();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
