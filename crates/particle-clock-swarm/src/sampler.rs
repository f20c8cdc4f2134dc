//! Turns the clock text into a point set.

use particle_clock_core::Point;
use particle_clock_fonts::Surface;
use tracing::{debug, trace};

/// Pixels with alpha above this are part of a glyph.
pub const VISIBLE_ALPHA: u8 = 128;

/// Scaffold color. Only alpha is read back, so any opaque color works.
const TEXT_COLOR: [u8; 3] = [255, 255, 255];

/// Collect every grid point with visible alpha.
///
/// The grid starts at the origin with stride `gap` on both axes. Points come
/// out column by column, top to bottom within a column.
pub fn scan(surface: &Surface, gap: u32) -> Vec<Point> {
    let gap = gap.max(1) as usize;
    (0..surface.width())
        .step_by(gap)
        .flat_map(|x| {
            (0..surface.height())
                .step_by(gap)
                .filter(move |&y| surface.alpha(x, y) > VISIBLE_ALPHA)
                .map(move |y| Point::new(x, y))
        })
        .collect()
}

/// Offscreen rasterizer with a cache of the last text it sampled.
#[derive(Debug)]
pub struct Sampler {
    surface: Surface,
    /// Stride in pixels.
    gap: u32,
    /// Glyph height in pixels.
    font_size: f32,
    last_text: Option<String>,
    cycles: u64,
}

impl Sampler {
    /// Create a sampler with an empty surface. `gap` and `font_size` are in
    /// surface pixels.
    pub fn new(gap: u32, font_size: f32) -> Self {
        Self {
            surface: Surface::new(0, 0),
            gap: gap.max(1),
            font_size,
            last_text: None,
            cycles: 0,
        }
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The text of the last sampling cycle.
    pub fn cached_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    /// Number of cycles that actually rasterized.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Reallocate the surface. The next [`Sampler::sample`] runs even if the
    /// text is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.invalidate();
    }

    /// Forget the cached text.
    pub fn invalidate(&mut self) {
        self.last_text = None;
    }

    /// Rasterize `text` and return its point set, or `None` when `text` is
    /// the same as last time.
    pub fn sample(&mut self, text: &str) -> Option<Vec<Point>> {
        if self.last_text.as_deref() == Some(text) {
            trace!(text, "text unchanged, skipping sample");
            return None;
        }

        self.surface.clear();
        self.last_text = Some(text.to_owned());
        self.surface.fill_text(text, self.font_size, TEXT_COLOR);
        let points = scan(&self.surface, self.gap);
        self.surface.clear();
        self.cycles += 1;

        debug!(
            text,
            points = points.len(),
            width = self.surface.width(),
            height = self.surface.height(),
            "sampled text"
        );
        Some(points)
    }
}
