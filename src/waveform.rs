//! Waveform Sequence
//!
//! The normalized per-column amplitude envelope derived from the drawing
//! surface. Fully replaced each time sampling runs, never patched in place.

/// Ordered sequence of normalized amplitudes in [-1, 1]
///
/// One entry per sampled surface column. Empty when no drawing exists;
/// a column without ink contributes exactly 0.0 (silence), so there is
/// no sparse or gap representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveformSequence {
    values: Vec<f32>,
}

impl WaveformSequence {
    /// Wrap a vector of sampled amplitudes
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// The empty sequence (no drawing sampled yet)
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    /// Number of sampled columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no columns have been sampled
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Amplitude at the given column index
    pub fn get(&self, idx: usize) -> Option<f32> {
        self.values.get(idx).copied()
    }

    /// All sampled amplitudes in column order
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Whether every sampled amplitude is exactly zero
    ///
    /// True for the empty sequence as well; an all-zero non-empty
    /// sequence is still playable (it synthesizes to silence).
    pub fn is_silent(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}
