//! Bitmap font for the particle-clock application.
//!
//! Glyphs are 7 units tall and drawn with `#` for lit units. The font only
//! covers what a formatted clock can produce: digits, the colon, a space and
//! the letters of `AM`/`PM`.

mod surface;

pub use surface::Surface;

/// Height of every glyph in font units.
pub const GLYPH_HEIGHT: usize = 7;

/// Blank units inserted between two adjacent glyphs.
pub const GLYPH_SPACING: usize = 1;

/// A single bitmap glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: [&'static str; GLYPH_HEIGHT],
}

impl Glyph {
    const fn new(rows: [&'static str; GLYPH_HEIGHT]) -> Self {
        Self { rows }
    }

    /// Width in font units.
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Whether the unit at (`col`, `row`) is lit.
    pub fn is_lit(&self, col: usize, row: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|line| line.as_bytes().get(col))
            .is_some_and(|&b| b == b'#')
    }
}

/// Digits 0-9 (5 units wide)
pub const DIGITS: [Glyph; 10] = [
    Glyph::new([".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."]),
    Glyph::new(["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    Glyph::new([".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"]),
    Glyph::new(["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."]),
    Glyph::new(["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."]),
    Glyph::new(["#####", "#....", "####.", "....#", "....#", "#...#", ".###."]),
    Glyph::new(["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."]),
    Glyph::new(["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."]),
    Glyph::new([".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."]),
    Glyph::new([".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."]),
];

/// Colon separator (2 units wide)
pub const COLON: Glyph = Glyph::new(["..", "##", "##", "..", "##", "##", ".."]);

/// Word space (3 units wide)
pub const SPACE: Glyph = Glyph::new(["...", "...", "...", "...", "...", "...", "..."]);

pub const LETTER_A: Glyph =
    Glyph::new([".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]);

pub const LETTER_P: Glyph =
    Glyph::new(["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."]);

pub const LETTER_M: Glyph =
    Glyph::new(["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"]);

/// Look up the glyph for a character.
pub fn glyph(ch: char) -> Option<&'static Glyph> {
    match ch {
        '0'..='9' => DIGITS.get(ch as usize - '0' as usize),
        ':' => Some(&COLON),
        ' ' => Some(&SPACE),
        'A' | 'a' => Some(&LETTER_A),
        'P' | 'p' => Some(&LETTER_P),
        'M' | 'm' => Some(&LETTER_M),
        _ => None,
    }
}

/// Text laid out on the font-unit grid.
///
/// Characters without a glyph advance like a space so the remaining text
/// keeps its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBitmap {
    width: usize,
    lit: Vec<bool>,
    missing: Vec<char>,
}

impl TextBitmap {
    /// Lay out `text` left to right.
    pub fn layout(text: &str) -> Self {
        let mut placed = Vec::new();
        let mut missing = Vec::new();
        let mut cursor = 0;

        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                cursor += GLYPH_SPACING;
            }
            let g = match glyph(ch) {
                Some(g) => g,
                None => {
                    missing.push(ch);
                    &SPACE
                }
            };
            placed.push((cursor, g));
            cursor += g.width();
        }

        let width = cursor;
        let mut lit = vec![false; width * GLYPH_HEIGHT];
        for (offset, g) in placed {
            for row in 0..GLYPH_HEIGHT {
                for col in 0..g.width() {
                    if g.is_lit(col, row) {
                        lit[row * width + offset + col] = true;
                    }
                }
            }
        }

        Self { width, lit, missing }
    }

    /// Width in font units.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the unit at (`col`, `row`) is lit. Out of range is unlit.
    pub fn is_lit(&self, col: usize, row: usize) -> bool {
        col < self.width && row < GLYPH_HEIGHT && self.lit[row * self.width + col]
    }

    /// Characters that had no glyph.
    pub fn missing(&self) -> &[char] {
        &self.missing
    }
}
