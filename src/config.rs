//! Widget Configuration
//!
//! Runtime-adjustable parameters (frequency, volume) plus the fixed
//! synthesis constants. Nothing here is persisted; state resets on reload.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WavesketchError};

// ============================================================================
// Constants
// ============================================================================

/// Fixed clip duration in seconds; every synthesized signal is this long
pub const CLIP_SECONDS: u32 = 2;

/// Half-scale headroom applied to every synthesized sample,
/// independent of the user volume control
pub const HEADROOM: f32 = 0.5;

/// Fallback sample rate when no audio device dictates one
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Lowest carrier frequency the frequency control may select
pub const MIN_FREQUENCY_HZ: f32 = 20.0;

/// Highest carrier frequency the frequency control may select
pub const MAX_FREQUENCY_HZ: f32 = 2000.0;

/// Default carrier frequency (concert A)
pub const DEFAULT_FREQUENCY_HZ: f32 = 440.0;

/// Default playback volume
pub const DEFAULT_VOLUME: f32 = 0.3;

/// Default drawing surface width in pixels
pub const DEFAULT_SURFACE_WIDTH: usize = 800;

/// Default drawing surface height in pixels
pub const DEFAULT_SURFACE_HEIGHT: usize = 300;

// ============================================================================
// WidgetConfig
// ============================================================================

/// User-facing widget configuration
///
/// Frequency and volume are mutable at any time; they take effect at the
/// moment synthesis (frequency) or playback (volume) runs, never
/// retroactively on a signal already produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Drawing surface width in pixels
    pub surface_width: usize,
    /// Drawing surface height in pixels
    pub surface_height: usize,
    /// Carrier frequency in Hz
    pub frequency_hz: f32,
    /// Playback volume gain in [0, 1]
    pub volume: f32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            surface_width: DEFAULT_SURFACE_WIDTH,
            surface_height: DEFAULT_SURFACE_HEIGHT,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl WidgetConfig {
    /// Validate the configuration
    ///
    /// # Errors
    /// `InvalidConfig` if the frequency or volume is outside its bounds or
    /// the surface height is zero. A zero-width surface is allowed and
    /// samples to the empty sequence.
    pub fn validate(&self) -> Result<()> {
        if self.surface_height == 0 {
            return Err(WavesketchError::InvalidConfig {
                reason: "surface height must be at least 1".to_string(),
            });
        }
        if !(MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&self.frequency_hz) {
            return Err(WavesketchError::InvalidConfig {
                reason: format!(
                    "frequency {} Hz outside [{}, {}]",
                    self.frequency_hz, MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(WavesketchError::InvalidConfig {
                reason: format!("volume {} outside [0, 1]", self.volume),
            });
        }
        Ok(())
    }

    /// Clamp a frequency to the audible control range
    ///
    /// The Synthesizer itself never clamps; every caller goes through here.
    #[inline]
    pub fn clamp_frequency(hz: f32) -> f32 {
        hz.clamp(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ)
    }

    /// Clamp a volume gain to [0, 1]
    #[inline]
    pub fn clamp_volume(volume: f32) -> f32 {
        volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WidgetConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.surface_width, 800);
        assert_eq!(config.surface_height, 300);
        assert_eq!(config.frequency_hz, 440.0);
        assert_eq!(config.volume, 0.3);
    }

    #[test]
    fn test_validate_rejects_zero_height() {
        let config = WidgetConfig {
            surface_height: 0,
            ..WidgetConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_zero_width() {
        let config = WidgetConfig {
            surface_width: 0,
            ..WidgetConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_frequency() {
        let config = WidgetConfig {
            frequency_hz: 5.0,
            ..WidgetConfig::default()
        };
        assert!(config.validate().is_err());

        let config = WidgetConfig {
            frequency_hz: 20_000.0,
            ..WidgetConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_volume() {
        let config = WidgetConfig {
            volume: 1.5,
            ..WidgetConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_frequency() {
        assert_eq!(WidgetConfig::clamp_frequency(5.0), MIN_FREQUENCY_HZ);
        assert_eq!(WidgetConfig::clamp_frequency(440.0), 440.0);
        assert_eq!(WidgetConfig::clamp_frequency(99_999.0), MAX_FREQUENCY_HZ);
    }

    #[test]
    fn test_clamp_volume() {
        assert_eq!(WidgetConfig::clamp_volume(-0.2), 0.0);
        assert_eq!(WidgetConfig::clamp_volume(0.3), 0.3);
        assert_eq!(WidgetConfig::clamp_volume(4.0), 1.0);
    }
}
