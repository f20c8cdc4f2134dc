//! Offscreen RGBA surface the time string is rasterized onto.

use tracing::debug;

use crate::{GLYPH_HEIGHT, TextBitmap};

/// Fraction of the surface width the text may occupy before it is shrunk.
const MAX_TEXT_WIDTH: f32 = 0.9;

/// Subpixel sample offsets for 2x2 supersampling.
const SUBSAMPLES: [(f32, f32); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

/// An RGBA8 pixel buffer, row-major, four bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[cfg(test)]
    fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reallocate for new dimensions. Contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width as usize * height as usize * 4, 0);
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Alpha channel at (`x`, `y`); zero outside the surface.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let index = (x as usize + y as usize * self.width as usize) * 4;
        self.data[index + 3]
    }

    /// Draw `text` centered horizontally and vertically.
    ///
    /// `font_size` is the glyph height in pixels. Text wider than the surface
    /// allows is scaled down to fit. Returns the scale actually used, in
    /// pixels per font unit, or `None` if nothing was drawn.
    pub fn fill_text(&mut self, text: &str, font_size: f32, color: [u8; 3]) -> Option<f32> {
        let bitmap = TextBitmap::layout(text);
        if !bitmap.missing().is_empty() {
            debug!(missing = ?bitmap.missing(), "no glyph for characters, leaving gaps");
        }
        if bitmap.width() == 0 || self.width == 0 || self.height == 0 {
            return None;
        }

        let fit = self.width as f32 * MAX_TEXT_WIDTH / bitmap.width() as f32;
        let scale = (font_size / GLYPH_HEIGHT as f32).min(fit);
        if scale.is_nan() || scale <= 0.0 {
            return None;
        }

        let text_width = bitmap.width() as f32 * scale;
        let text_height = GLYPH_HEIGHT as f32 * scale;
        let origin_x = (self.width as f32 - text_width) / 2.0;
        let origin_y = (self.height as f32 - text_height) / 2.0;

        let x0 = origin_x.floor().max(0.0) as u32;
        let y0 = origin_y.floor().max(0.0) as u32;
        let x1 = ((origin_x + text_width).ceil() as u32).min(self.width);
        let y1 = ((origin_y + text_height).ceil() as u32).min(self.height);

        let lit_at = |fx: f32, fy: f32| {
            let u = (fx - origin_x) / scale;
            let v = (fy - origin_y) / scale;
            u >= 0.0 && v >= 0.0 && bitmap.is_lit(u as usize, v as usize)
        };

        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = SUBSAMPLES
                    .iter()
                    .filter(|(dx, dy)| lit_at(x as f32 + dx, y as f32 + dy))
                    .count();
                if coverage == 0 {
                    continue;
                }
                let alpha = (coverage * 255 / SUBSAMPLES.len()) as u8;
                let index = (x as usize + y as usize * self.width as usize) * 4;
                self.data[index..index + 4].copy_from_slice(&[color[0], color[1], color[2], alpha]);
            }
        }

        Some(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 3] = [255, 255, 255];

    #[test]
    fn test_new_surface_is_blank() {
        let surface = Surface::new(10, 4);
        assert_eq!(surface.data().len(), 160);
        assert!(surface.is_blank());
        assert_eq!(surface.alpha(100, 100), 0);
    }

    #[test]
    fn test_fill_text_draws_and_clear_erases() {
        let mut surface = Surface::new(320, 160);
        let scale = surface.fill_text("12:00:01", 70.0, WHITE);
        assert!(scale.is_some());
        assert!(!surface.is_blank());

        surface.clear();
        assert!(surface.is_blank());
    }

    #[test]
    fn test_fill_text_is_centered() {
        // "1" is symmetric around its middle column
        let mut surface = Surface::new(200, 200);
        let scale = surface.fill_text("1", 70.0, WHITE).unwrap();
        assert_eq!(scale, 10.0);

        // Glyph spans 50x70 pixels starting at (75, 65); the stem is column 2.
        assert_eq!(surface.alpha(100, 100), 255);
        assert_eq!(surface.alpha(76, 100), 0);
        assert_eq!(surface.alpha(100, 60), 0);
        // Bottom bar (row 6) spans columns 1-3
        assert_eq!(surface.alpha(90, 132), 255);
    }

    #[test]
    fn test_fill_text_shrinks_to_fit() {
        let mut surface = Surface::new(100, 400);
        let scale = surface.fill_text("12:00:01", 700.0, WHITE).unwrap();
        // "12:00:01" is 5*6 + 2*2 + 7 spacing = 41 units wide
        assert!((scale - 90.0 / 41.0).abs() < 1e-4);
    }

    #[test]
    fn test_fill_text_edges_are_antialiased() {
        // Scale 10.5 puts glyph edges on half pixels
        let mut surface = Surface::new(200, 200);
        surface.fill_text("8", 73.5, WHITE).unwrap();
        let partial = surface
            .data()
            .chunks_exact(4)
            .filter(|px| px[3] > 0 && px[3] < 255)
            .count();
        assert!(partial > 0);
    }

    #[test]
    fn test_fill_text_on_empty_surface() {
        let mut surface = Surface::new(0, 0);
        assert!(surface.fill_text("12", 70.0, WHITE).is_none());
        assert!(surface.fill_text("", 70.0, WHITE).is_none());
    }

    #[test]
    fn test_resize_clears() {
        let mut surface = Surface::new(100, 100);
        surface.fill_text("0", 70.0, WHITE);
        surface.resize(50, 20);
        assert_eq!(surface.width(), 50);
        assert_eq!(surface.height(), 20);
        assert_eq!(surface.data().len(), 50 * 20 * 4);
        assert!(surface.is_blank());
    }
}
