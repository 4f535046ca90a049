//! Sampler Transform
//!
//! Scans the drawing surface column-by-column and produces the normalized
//! amplitude envelope. Only even-indexed columns are sampled (odd columns
//! are skipped entirely, not interpolated), so the output length is ⌈W/2⌉.
//!
//! Multiple disjoint ink blobs in one column are averaged together rather
//! than picking the topmost or bottommost; this lossy simplification is
//! part of the contract and downstream expectations depend on it.

use crate::surface::Surface;
use crate::waveform::WaveformSequence;

/// Sample the surface into a waveform sequence
///
/// Per sampled column: every marked pixel (alpha > 0) at row y contributes
/// the amplitude `(H/2 - y) / (H/2)` — vertical center maps to 0, the top
/// edge to +1, the bottom edge to roughly -1 — and the column's value is
/// the arithmetic mean of those contributions, or exactly 0.0 when the
/// column carries no ink.
///
/// A blank surface of width W yields ⌈W/2⌉ zeros; a zero-width surface
/// yields the empty sequence.
pub fn sample_surface(surface: &Surface) -> WaveformSequence {
    let width = surface.width();
    let height = surface.height();
    let half_height = height as f32 / 2.0;

    let mut values = Vec::with_capacity((width + 1) / 2);
    for x in (0..width).step_by(2) {
        let mut sum = 0.0f32;
        let mut marked = 0usize;
        for y in 0..height {
            if surface.is_marked(x, y) {
                sum += (half_height - y as f32) / half_height;
                marked += 1;
            }
        }
        values.push(if marked == 0 { 0.0 } else { sum / marked as f32 });
    }

    WaveformSequence::new(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(0, 0; "zero width")]
    #[test_case(1, 1; "single column")]
    #[test_case(2, 1; "two columns share one sample")]
    #[test_case(7, 4; "odd width rounds up")]
    #[test_case(800, 400; "default surface width")]
    fn test_output_length_is_ceil_half_width(width: usize, expected: usize) {
        let surface = Surface::new(width, 300);
        let seq = sample_surface(&surface);
        assert_eq!(seq.len(), expected);
    }

    #[test]
    fn test_blank_surface_samples_to_zeros() {
        let surface = Surface::new(100, 40);
        let seq = sample_surface(&surface);
        assert_eq!(seq.len(), 50);
        assert!(seq.is_silent());
        assert!(seq.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_center_pixel_samples_to_zero() {
        let mut surface = Surface::new(10, 300);
        surface.mark(4, 150); // exact vertical center
        let seq = sample_surface(&surface);
        assert_abs_diff_eq!(seq.get(2).unwrap(), 0.0);
    }

    #[test]
    fn test_top_edge_samples_to_one() {
        let mut surface = Surface::new(10, 300);
        surface.mark(0, 0);
        let seq = sample_surface(&surface);
        assert_abs_diff_eq!(seq.get(0).unwrap(), 1.0);
    }

    #[test]
    fn test_bottom_edge_samples_to_minus_one() {
        let mut surface = Surface::new(10, 300);
        surface.mark(0, 299);
        let seq = sample_surface(&surface);
        // (150 - 299) / 150; one pixel short of exactly -1
        assert_abs_diff_eq!(seq.get(0).unwrap(), -149.0 / 150.0);
        assert!((seq.get(0).unwrap() - (-1.0)).abs() < 0.01);
    }

    #[test]
    fn test_odd_columns_are_skipped() {
        let mut surface = Surface::new(10, 300);
        surface.mark(1, 0); // odd column, top edge
        surface.mark(3, 0);
        let seq = sample_surface(&surface);
        assert_eq!(seq.len(), 5);
        assert!(seq.is_silent(), "ink on odd columns must not be sampled");
    }

    #[test]
    fn test_disjoint_blobs_in_one_column_are_averaged() {
        let mut surface = Surface::new(10, 300);
        surface.mark(2, 0); // amplitude +1
        surface.mark(2, 150); // amplitude 0
        let seq = sample_surface(&surface);
        assert_abs_diff_eq!(seq.get(1).unwrap(), 0.5);
    }

    #[test]
    fn test_symmetric_ink_averages_to_zero() {
        let mut surface = Surface::new(10, 300);
        surface.mark(6, 140);
        surface.mark(6, 160);
        let seq = sample_surface(&surface);
        assert_abs_diff_eq!(seq.get(3).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_full_column_of_ink() {
        let mut surface = Surface::new(4, 4);
        for y in 0..4 {
            surface.mark(0, y);
        }
        // Amplitudes: (2-0)/2, (2-1)/2, (2-2)/2, (2-3)/2 = 1.0, 0.5, 0.0, -0.5
        let seq = sample_surface(&surface);
        assert_abs_diff_eq!(seq.get(0).unwrap(), 0.25);
    }

    #[test]
    fn test_resampling_replaces_rather_than_accumulates() {
        let mut surface = Surface::new(10, 300);
        surface.mark(0, 0);
        let first = sample_surface(&surface);
        assert_abs_diff_eq!(first.get(0).unwrap(), 1.0);

        surface.clear();
        surface.mark(0, 150);
        let second = sample_surface(&surface);
        assert_abs_diff_eq!(second.get(0).unwrap(), 0.0);
    }
}
