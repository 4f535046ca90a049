//! Error handling for Wavesketch
//!
//! Engine-level misuse surfaces as typed errors; widget-level paths
//! (out-of-range strokes, stopping a stopped handle) are silent no-ops.

use thiserror::Error;

/// Result type alias for Wavesketch operations
pub type Result<T> = std::result::Result<T, WavesketchError>;

/// Main error type for Wavesketch operations
#[derive(Error, Debug)]
pub enum WavesketchError {
    /// Synthesis was invoked with no sampled drawing
    #[error("Cannot synthesize from an empty waveform sequence")]
    EmptyWaveform,

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // Audio device errors
    #[error("Audio device error: {reason}")]
    AudioDevice { reason: String },

    #[error("Playback failed: {reason}")]
    PlaybackFailed { reason: String },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WavesketchError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            WavesketchError::EmptyWaveform => "EMPTY_WAVEFORM",
            WavesketchError::InvalidConfig { .. } => "INVALID_CONFIG",
            WavesketchError::AudioDevice { .. } => "AUDIO_DEVICE",
            WavesketchError::PlaybackFailed { .. } => "PLAYBACK_FAILED",
            WavesketchError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable by redrawing or clearing
    pub fn is_recoverable(&self) -> bool {
        match self {
            WavesketchError::EmptyWaveform => true,
            WavesketchError::InvalidConfig { .. } => true,
            WavesketchError::AudioDevice { .. } => false,
            WavesketchError::PlaybackFailed { .. } => false,
            WavesketchError::Serialization(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(WavesketchError::EmptyWaveform.error_code(), "EMPTY_WAVEFORM");

        let err = WavesketchError::AudioDevice {
            reason: "no output device".to_string(),
        };
        assert_eq!(err.error_code(), "AUDIO_DEVICE");
    }

    #[test]
    fn test_recoverable() {
        assert!(WavesketchError::EmptyWaveform.is_recoverable());
        assert!(!WavesketchError::PlaybackFailed {
            reason: "stream died".to_string()
        }
        .is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = WavesketchError::InvalidConfig {
            reason: "frequency out of range".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: frequency out of range"
        );
    }
}
