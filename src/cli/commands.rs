//! CLI command handlers

use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::config::{WidgetConfig, CLIP_SECONDS};
use crate::error::Result;
use crate::session::Session;
use crate::sink::{CpalSink, MockSink};

/// Trace one full sine period across the surface as a freehand stroke
fn draw_demo_stroke(session: &mut Session) {
    let width = session.config().surface_width;
    let height = session.config().surface_height as f32;
    let mid = height / 2.0;

    session.pointer_down(0.0, mid);
    for x in 1..width {
        let phase = 2.0 * std::f32::consts::PI * x as f32 / width as f32;
        let y = mid - mid * 0.8 * phase.sin();
        session.pointer_move(x as f32, y);
    }
    session.pointer_up();
}

/// Play the demo drawing through the default audio device
///
/// `seconds_to_wait` bounds how long the command keeps polling for the
/// playback-ended transition beyond the fixed clip length.
pub fn demo(frequency: f32, volume: f32, seconds_to_wait: u64) -> Result<()> {
    let config = WidgetConfig {
        frequency_hz: WidgetConfig::clamp_frequency(frequency),
        volume: WidgetConfig::clamp_volume(volume),
        ..WidgetConfig::default()
    };

    let sink = CpalSink::new()?;
    let mut session = Session::new(config, Box::new(sink))?;

    draw_demo_stroke(&mut session);
    info!(
        "sampled {} columns, playing {}s clip at {} Hz",
        session.waveform().len(),
        CLIP_SECONDS,
        session.config().frequency_hz
    );
    session.play()?;

    let deadline = Instant::now() + Duration::from_secs(CLIP_SECONDS as u64 + seconds_to_wait);
    while session.is_playing() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(50));
        session.poll();
    }
    info!("playback finished");
    Ok(())
}

/// Print waveform statistics for the demo drawing without touching audio
pub fn sample(width: usize, height: usize) -> Result<()> {
    let config = WidgetConfig {
        surface_width: width,
        surface_height: height,
        ..WidgetConfig::default()
    };
    let mut session = Session::new(config, Box::new(MockSink::new()))?;
    draw_demo_stroke(&mut session);

    let waveform = session.waveform();
    let values = waveform.values();
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mean = values.iter().sum::<f32>() / values.len().max(1) as f32;

    println!("columns: {}", waveform.len());
    println!("min:     {:.4}", min);
    println!("max:     {:.4}", max);
    println!("mean:    {:.4}", mean);
    println!("silent:  {}", waveform.is_silent());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_stroke_covers_every_sampled_column() {
        let mut session =
            Session::new(WidgetConfig::default(), Box::new(MockSink::new())).unwrap();
        draw_demo_stroke(&mut session);

        assert_eq!(session.waveform().len(), 400);
        // A continuous stroke leaves no unsampled gaps
        let inked = session
            .waveform()
            .values()
            .iter()
            .filter(|&&v| v != 0.0)
            .count();
        assert!(inked > 350, "expected most columns inked, got {}", inked);
    }

    #[test]
    fn test_demo_stroke_spans_both_polarities() {
        let mut session =
            Session::new(WidgetConfig::default(), Box::new(MockSink::new())).unwrap();
        draw_demo_stroke(&mut session);

        let values = session.waveform().values();
        assert!(values.iter().any(|&v| v > 0.5));
        assert!(values.iter().any(|&v| v < -0.5));
    }
}
