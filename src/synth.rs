//! Synthesizer Transform
//!
//! Expands a waveform sequence into a fixed-duration sampled signal:
//! nearest-neighbor lookup of the drawn envelope across the full clip,
//! multiplied by a sine carrier at the selected frequency, scaled by a
//! fixed half-scale headroom factor.
//!
//! Volume is deliberately NOT baked into the samples; the playback sink
//! applies it as a whole-buffer gain, so volume changes after synthesis
//! never require resynthesis.

use serde::{Deserialize, Serialize};

use crate::config::{CLIP_SECONDS, DEFAULT_FREQUENCY_HZ, DEFAULT_VOLUME, HEADROOM};
use crate::error::{Result, WavesketchError};
use crate::waveform::WaveformSequence;

// ============================================================================
// SynthesisParameters
// ============================================================================

/// Snapshot of the user-adjustable synthesis controls
///
/// Captured at the moment synthesis runs; later control changes have no
/// effect on a signal already produced. The synthesizer performs no
/// frequency clamping — callers clamp via [`crate::config::WidgetConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParameters {
    /// Carrier frequency in Hz
    pub frequency_hz: f32,
    /// Playback volume gain in [0, 1]; applied downstream at the sink
    pub volume: f32,
}

impl Default for SynthesisParameters {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            volume: DEFAULT_VOLUME,
        }
    }
}

// ============================================================================
// AudioSignal
// ============================================================================

/// Fixed-duration sampled audio signal, immutable once produced
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioSignal {
    /// Wrap raw samples at the given sample rate
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// The sample values
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Whether every sample is exactly zero
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0.0)
    }

    /// Peak absolute sample value
    pub fn peak(&self) -> f32 {
        self.samples.iter().map(|s| s.abs()).fold(0.0_f32, f32::max)
    }
}

// ============================================================================
// Synthesis
// ============================================================================

/// Synthesize a fixed 2-second signal from a waveform sequence
///
/// Per output sample index i in `[0, R×2)`:
/// - envelope index `idx = floor(i / (R×2) × N)` — nearest-neighbor
///   resampling of the drawn envelope, no interpolation
/// - `carrier = sin(2π × frequency × i / R)`
/// - sample = `envelope × carrier × 0.5`
///
/// Deterministic: identical inputs produce bit-identical output.
///
/// # Errors
/// `EmptyWaveform` when the sequence holds no columns. The session checks
/// this before invoking; the transform still enforces its contract.
pub fn synthesize(
    waveform: &WaveformSequence,
    params: &SynthesisParameters,
    sample_rate: u32,
) -> Result<AudioSignal> {
    if waveform.is_empty() {
        return Err(WavesketchError::EmptyWaveform);
    }

    let total = sample_rate as usize * CLIP_SECONDS as usize;
    let columns = waveform.len();
    let omega = 2.0 * std::f64::consts::PI * params.frequency_hz as f64;

    let mut samples = Vec::with_capacity(total);
    for i in 0..total {
        let idx = (i as f64 / total as f64 * columns as f64) as usize;
        let envelope = waveform.get(idx).unwrap_or(0.0) as f64;
        let carrier = (omega * i as f64 / sample_rate as f64).sin();
        samples.push((envelope * carrier * HEADROOM as f64) as f32);
    }

    Ok(AudioSignal::new(samples, sample_rate))
}
