//! Playback Sink
//!
//! The audio output seam. The session only knows the [`PlaybackSink`]
//! trait; [`CpalSink`] drives a real output device and [`MockSink`] stands
//! in for it in headless and test runs.
//!
//! Contract: at most one handle is active per sink. Starting a new play
//! tears down any prior stream first, and stopping an unknown or
//! already-finished handle is an explicit no-op.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use uuid::Uuid;

use crate::config::DEFAULT_SAMPLE_RATE;
use crate::error::{Result, WavesketchError};
use crate::synth::AudioSignal;

// ============================================================================
// Handle & trait
// ============================================================================

/// Opaque identifier for one playback of one signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackHandle(Uuid);

impl PlaybackHandle {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Audio output destination that plays a finished signal once
pub trait PlaybackSink {
    /// The sample rate signals should be synthesized at for this sink
    fn sample_rate(&self) -> u32;

    /// Start playing the signal once, scaled by the whole-buffer gain
    ///
    /// Any handle previously active on this sink is stopped first.
    fn play(&self, signal: &AudioSignal, gain: f32) -> Result<PlaybackHandle>;

    /// Stop the playback identified by the handle
    ///
    /// Unknown and already-stopped handles are ignored.
    fn stop(&self, handle: PlaybackHandle);

    /// Whether the handle is still playing
    fn is_active(&self, handle: PlaybackHandle) -> bool;
}

// ============================================================================
// CpalSink
// ============================================================================

struct ActiveStream {
    handle: PlaybackHandle,
    /// Dropping the stream stops output
    _stream: cpal::Stream,
    /// Set by the output callback once the buffer is exhausted
    done: Arc<AtomicBool>,
}

/// Real audio output through the default cpal device
pub struct CpalSink {
    device: cpal::Device,
    sample_rate: u32,
    channels: usize,
    active: RefCell<Option<ActiveStream>>,
}

impl CpalSink {
    /// Open the default output device
    ///
    /// # Errors
    /// `AudioDevice` when no output device exists or its default
    /// configuration is unavailable or not 32-bit float.
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| WavesketchError::AudioDevice {
                reason: "no default output device".to_string(),
            })?;

        let config = device
            .default_output_config()
            .map_err(|e| WavesketchError::AudioDevice {
                reason: format!("failed to query output config: {}", e),
            })?;

        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(WavesketchError::AudioDevice {
                reason: format!(
                    "unsupported output sample format: {:?}",
                    config.sample_format()
                ),
            });
        }

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        log::info!(
            "audio output: {} @ {} Hz, {} ch",
            device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate,
            channels
        );

        Ok(Self {
            device,
            sample_rate,
            channels,
            active: RefCell::new(None),
        })
    }
}

impl PlaybackSink for CpalSink {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn play(&self, signal: &AudioSignal, gain: f32) -> Result<PlaybackHandle> {
        // Exactly one stream at a time; dropping the prior one stops it
        self.active.borrow_mut().take();

        let samples: Arc<[f32]> = Arc::from(signal.samples());
        let done = Arc::new(AtomicBool::new(false));
        let done_cb = Arc::clone(&done);
        let channels = self.channels;
        let mut position = 0usize;

        let config = cpal::StreamConfig {
            channels: channels as u16,
            sample_rate: cpal::SampleRate(self.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = self
            .device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels) {
                        let value = if position < samples.len() {
                            samples[position] * gain
                        } else {
                            done_cb.store(true, Ordering::Relaxed);
                            0.0
                        };
                        for out in frame.iter_mut() {
                            *out = value;
                        }
                        position += 1;
                    }
                },
                |err| log::error!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| WavesketchError::PlaybackFailed {
                reason: format!("failed to build output stream: {}", e),
            })?;

        stream.play().map_err(|e| WavesketchError::PlaybackFailed {
            reason: format!("failed to start output stream: {}", e),
        })?;

        let handle = PlaybackHandle::new();
        log::debug!("playback started: {:?} ({} samples)", handle, signal.len());
        *self.active.borrow_mut() = Some(ActiveStream {
            handle,
            _stream: stream,
            done,
        });
        Ok(handle)
    }

    fn stop(&self, handle: PlaybackHandle) {
        let mut active = self.active.borrow_mut();
        match active.as_ref() {
            Some(stream) if stream.handle == handle => {
                log::debug!("playback stopped: {:?}", handle);
                *active = None;
            }
            // Unknown or already-stopped handle: ignore
            _ => {}
        }
    }

    fn is_active(&self, handle: PlaybackHandle) -> bool {
        match self.active.borrow().as_ref() {
            Some(stream) if stream.handle == handle => !stream.done.load(Ordering::Relaxed),
            _ => false,
        }
    }
}

// ============================================================================
// MockSink
// ============================================================================

/// Event recorded by [`MockSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Play { samples: usize, gain: f32 },
    Stop,
}

#[derive(Default)]
struct MockState {
    events: Vec<SinkEvent>,
    active: Option<PlaybackHandle>,
    ended: bool,
}

/// Recording sink for tests and headless runs
///
/// Clones share state, so a test can keep one clone for assertions while
/// the session owns another.
#[derive(Clone, Default)]
pub struct MockSink {
    state: Rc<RefCell<MockState>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every play/stop event in order
    pub fn events(&self) -> Vec<SinkEvent> {
        self.state.borrow().events.clone()
    }

    /// Number of play events recorded
    pub fn play_count(&self) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Play { .. }))
            .count()
    }

    /// Number of stop events recorded
    pub fn stop_count(&self) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Stop))
            .count()
    }

    /// The currently active handle, if any
    pub fn active_handle(&self) -> Option<PlaybackHandle> {
        self.state.borrow().active
    }

    /// Simulate the active playback reaching the end of its buffer
    pub fn finish_playback(&self) {
        self.state.borrow_mut().ended = true;
    }
}

impl PlaybackSink for MockSink {
    fn sample_rate(&self) -> u32 {
        DEFAULT_SAMPLE_RATE
    }

    fn play(&self, signal: &AudioSignal, gain: f32) -> Result<PlaybackHandle> {
        let mut state = self.state.borrow_mut();
        if state.active.take().is_some() {
            state.events.push(SinkEvent::Stop);
        }
        let handle = PlaybackHandle::new();
        state.events.push(SinkEvent::Play {
            samples: signal.len(),
            gain,
        });
        state.active = Some(handle);
        state.ended = false;
        Ok(handle)
    }

    fn stop(&self, handle: PlaybackHandle) {
        let mut state = self.state.borrow_mut();
        if state.active == Some(handle) {
            state.active = None;
            state.events.push(SinkEvent::Stop);
        }
    }

    fn is_active(&self, handle: PlaybackHandle) -> bool {
        let state = self.state.borrow();
        state.active == Some(handle) && !state.ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_signal(samples: usize) -> AudioSignal {
        AudioSignal::new(vec![0.1; samples], DEFAULT_SAMPLE_RATE)
    }

    #[test]
    fn test_mock_records_play() {
        let sink = MockSink::new();
        let handle = sink.play(&test_signal(100), 0.3).unwrap();

        assert!(sink.is_active(handle));
        assert_eq!(
            sink.events(),
            vec![SinkEvent::Play {
                samples: 100,
                gain: 0.3
            }]
        );
    }

    #[test]
    fn test_mock_new_play_stops_prior() {
        let sink = MockSink::new();
        let first = sink.play(&test_signal(10), 0.5).unwrap();
        let second = sink.play(&test_signal(20), 0.5).unwrap();

        assert!(!sink.is_active(first));
        assert!(sink.is_active(second));
        assert_eq!(sink.play_count(), 2);
        assert_eq!(sink.stop_count(), 1);
    }

    #[test]
    fn test_mock_stop_unknown_handle_ignored() {
        let sink = MockSink::new();
        let handle = sink.play(&test_signal(10), 0.5).unwrap();
        sink.stop(handle);
        // Stopping again must be a no-op
        sink.stop(handle);

        assert_eq!(sink.stop_count(), 1);
        assert!(!sink.is_active(handle));
    }

    #[test]
    fn test_mock_finish_ends_playback() {
        let sink = MockSink::new();
        let handle = sink.play(&test_signal(10), 0.5).unwrap();
        assert!(sink.is_active(handle));

        sink.finish_playback();
        assert!(!sink.is_active(handle));
    }

    #[test]
    fn test_handles_are_unique() {
        let sink = MockSink::new();
        let a = sink.play(&test_signal(10), 0.5).unwrap();
        let b = sink.play(&test_signal(10), 0.5).unwrap();
        assert_ne!(a, b);
    }
}
