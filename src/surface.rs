//! Drawing Surface
//!
//! Rectangular raster grid with one alpha byte per pixel, mutated by
//! freehand stroke input. A pixel counts as "marked" for sampling purposes
//! as soon as its alpha is non-zero; the brush always paints fully opaque.
//!
//! All coordinate handling is forgiving: strokes and marks that fall
//! outside the grid are clipped silently, matching the widget's
//! no-error-surface design.

/// Radius of the freehand brush in pixels
const BRUSH_RADIUS: i32 = 2;

/// Round a stroke coordinate and clamp it to a brush-width margin around
/// the grid; keeps segment interpolation proportional to the surface size
/// and the anchor arithmetic within `i32`
fn clamp_coord(value: f32, limit: usize) -> i32 {
    let margin = (2 * BRUSH_RADIUS) as f32;
    let limit = limit.min(i32::MAX as usize / 4) as f32;
    value.round().clamp(-margin, limit + margin) as i32
}

/// Rectangular alpha-channel raster receiving freehand input
#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    /// Row-major alpha values, one byte per pixel
    alpha: Vec<u8>,
    /// Last brush position of an in-progress stroke
    stroke_anchor: Option<(i32, i32)>,
}

impl Surface {
    /// Create a fully transparent surface
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width * height],
            stroke_anchor: None,
        }
    }

    /// Surface width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Alpha value at (x, y), or 0 when out of range
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.alpha[y * self.width + x]
        } else {
            0
        }
    }

    /// Whether the pixel at (x, y) carries any ink (alpha > 0)
    #[inline]
    pub fn is_marked(&self, x: usize, y: usize) -> bool {
        self.alpha(x, y) > 0
    }

    /// Mark a single pixel fully opaque; out-of-range marks are ignored
    pub fn mark(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.alpha[y * self.width + x] = 255;
        }
    }

    /// Whether the surface carries no ink at all
    pub fn is_empty(&self) -> bool {
        self.alpha.iter().all(|&a| a == 0)
    }

    /// Reset every pixel to fully transparent and abandon any stroke
    pub fn clear(&mut self) {
        self.alpha.fill(0);
        self.stroke_anchor = None;
    }

    // ========================================================================
    // Freehand stroke input
    // ========================================================================

    /// Start a freehand stroke at the given position
    ///
    /// Positions use surface pixel units; fractional positions are rounded
    /// to the nearest pixel and clamped to just outside the grid, so
    /// runaway pointer coordinates stay bounded.
    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        let (px, py) = (clamp_coord(x, self.width), clamp_coord(y, self.height));
        self.paint_disc(px, py);
        self.stroke_anchor = Some((px, py));
    }

    /// Extend the in-progress stroke to the given position
    ///
    /// Paints the brush along the segment from the previous position so
    /// fast drags leave no gaps. A no-op when no stroke is in progress.
    pub fn stroke_to(&mut self, x: f32, y: f32) {
        let Some((ax, ay)) = self.stroke_anchor else {
            return;
        };
        let (bx, by) = (clamp_coord(x, self.width), clamp_coord(y, self.height));

        let steps = (bx - ax).abs().max((by - ay).abs());
        for step in 1..=steps.max(1) {
            let t = step as f32 / steps.max(1) as f32;
            let px = ax + ((bx - ax) as f32 * t).round() as i32;
            let py = ay + ((by - ay) as f32 * t).round() as i32;
            self.paint_disc(px, py);
        }
        self.stroke_anchor = Some((bx, by));
    }

    /// Finish the in-progress stroke
    pub fn end_stroke(&mut self) {
        self.stroke_anchor = None;
    }

    /// Paint a filled brush disc centered at (cx, cy), clipped to the grid
    fn paint_disc(&mut self, cx: i32, cy: i32) {
        for dy in -BRUSH_RADIUS..=BRUSH_RADIUS {
            for dx in -BRUSH_RADIUS..=BRUSH_RADIUS {
                if dx * dx + dy * dy > BRUSH_RADIUS * BRUSH_RADIUS {
                    continue;
                }
                let (px, py) = (cx + dx, cy + dy);
                if px >= 0 && py >= 0 {
                    self.mark(px as usize, py as usize);
                }
            }
        }
    }
}
