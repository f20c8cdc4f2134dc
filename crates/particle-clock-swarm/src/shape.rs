//! Filled circle for the ratatui canvas.

use ratatui::{
    style::Color,
    widgets::canvas::{Painter, Shape},
};

/// A filled disc in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Distance between neighbouring canvas dots, in canvas units.
    pub step: f64,
    /// Canvas extent `(width, height)`; dots outside it are never visited.
    pub extent: (f64, f64),
    pub color: Color,
}

impl Shape for Disc {
    fn draw(&self, painter: &mut Painter) {
        // Discs smaller than a dot still show up as one dot
        if let Some((x, y)) = painter.get_point(self.x, self.y) {
            painter.paint(x, y, self.color);
        }
        if self.step <= 0.0 || self.radius < self.step / 2.0 {
            return;
        }

        let r2 = self.radius * self.radius;
        let reach = (self.radius / self.step).ceil() as i32;
        let (width, height) = self.extent;
        let (i_lo, i_hi) = self.clip(self.x, width, reach);
        let (j_lo, j_hi) = self.clip(self.y, height, reach);
        for j in j_lo..=j_hi {
            let dy = f64::from(j) * self.step;
            for i in i_lo..=i_hi {
                let dx = f64::from(i) * self.step;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                if let Some((x, y)) = painter.get_point(self.x + dx, self.y + dy) {
                    painter.paint(x, y, self.color);
                }
            }
        }
    }
}

impl Disc {
    /// Grid offsets around `centre` that land inside `0..=extent`.
    fn clip(&self, centre: f64, extent: f64, reach: i32) -> (i32, i32) {
        let lo = (-centre / self.step).floor().max(f64::from(-reach)) as i32;
        let hi = ((extent - centre) / self.step).ceil().min(f64::from(reach)) as i32;
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{
        buffer::Buffer,
        layout::Rect,
        symbols::Marker,
        widgets::{Widget, canvas::Canvas},
    };

    use super::*;

    const EXTENT: (f64, f64) = (20.0, 20.0);

    fn dots(disc: Disc) -> usize {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, EXTENT.0])
            .y_bounds([0.0, EXTENT.1])
            .paint(|ctx| ctx.draw(&disc))
            .render(area, &mut buf);

        // Count raised Braille dots across all cells
        buf.content()
            .iter()
            .filter_map(|cell| cell.symbol().chars().next())
            .filter(|ch| ('\u{2800}'..='\u{28FF}').contains(ch))
            .map(|ch| (ch as u32 - 0x2800).count_ones() as usize)
            .sum()
    }

    #[test]
    fn test_tiny_disc_paints_one_dot() {
        let disc = Disc {
            x: 10.0,
            y: 10.0,
            radius: 0.1,
            step: 1.0,
            extent: EXTENT,
            color: Color::Green,
        };
        assert_eq!(dots(disc), 1);
    }

    #[test]
    fn test_larger_disc_paints_more_dots() {
        let small = Disc {
            x: 10.0,
            y: 10.0,
            radius: 1.0,
            step: 1.0,
            extent: EXTENT,
            color: Color::Green,
        };
        let large = Disc { radius: 3.0, ..small };
        assert!(dots(large) > dots(small));
        assert!(dots(small) > 1);
    }

    #[test]
    fn test_disc_outside_canvas_paints_nothing() {
        let disc = Disc {
            x: -50.0,
            y: -50.0,
            radius: 2.0,
            step: 1.0,
            extent: EXTENT,
            color: Color::Green,
        };
        assert_eq!(dots(disc), 0);
    }

    #[test]
    fn test_huge_disc_is_clipped_to_canvas() {
        let disc = Disc {
            x: 10.0,
            y: 10.0,
            radius: 1.0e7,
            step: 1.0,
            extent: EXTENT,
            color: Color::Green,
        };
        // Every dot of the 10x5 cell area: 20x20 Braille dots
        let started = std::time::Instant::now();
        assert_eq!(dots(disc), 20 * 20);
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_clip_range() {
        let disc = Disc {
            x: 2.0,
            y: 18.5,
            radius: 5.0,
            step: 1.0,
            extent: EXTENT,
            color: Color::Green,
        };
        assert_eq!(disc.clip(disc.x, EXTENT.0, 5), (-2, 5));
        assert_eq!(disc.clip(disc.y, EXTENT.1, 5), (-5, 2));
        assert_eq!(disc.clip(-50.0, EXTENT.0, 2), (50, 2));
    }
}
