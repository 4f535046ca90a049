//! Wavesketch - Draw-to-Sound Widget Engine
//!
//! A user freehand-draws a waveform shape on a raster surface; the engine
//! synthesizes and plays a fixed 2-second clip derived from the drawing,
//! modulated by a user-chosen frequency and volume.
//!
//! # Architecture
//!
//! Two pure, stateless transforms chained by a small state machine:
//! - [`sampler`]: scans the surface column-by-column into a normalized
//!   amplitude envelope
//! - [`synth`]: expands that envelope into a sampled signal over a sine
//!   carrier
//!
//! The [`session`] module serializes pointer input, sampling, and
//! playback (idle → drawing → sampled → playing); [`sink`] is the audio
//! output seam; [`notify`] carries the fire-once completion broadcast.

pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod sampler;
pub mod session;
pub mod sink;
pub mod surface;
pub mod synth;
pub mod waveform;

pub use error::{Result, WavesketchError};
