//! Core types shared by the particle-clock crates.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Width of one terminal cell in surface pixels at pixel ratio 1.
pub const CELL_PX_WIDTH: u32 = 8;

/// Height of one terminal cell in surface pixels at pixel ratio 1.
pub const CELL_PX_HEIGHT: u32 = 16;

/// Time format for the clock display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

impl TimeFormat {
    /// Toggle between 12-hour and 24-hour format.
    pub fn toggle(&self) -> Self {
        match self {
            TimeFormat::TwentyFourHour => TimeFormat::TwelveHour,
            TimeFormat::TwelveHour => TimeFormat::TwentyFourHour,
        }
    }

    /// The `strftime` pattern for this format.
    pub fn pattern(self) -> &'static str {
        match self {
            TimeFormat::TwentyFourHour => "%H:%M:%S",
            TimeFormat::TwelveHour => "%I:%M:%S %p",
        }
    }

    /// Format a wall-clock time as the string the particles trace.
    pub fn format(self, time: NaiveTime) -> String {
        time.format(self.pattern()).to_string()
    }
}

impl FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "24h" | "24" => Ok(TimeFormat::TwentyFourHour),
            "12h" | "12" => Ok(TimeFormat::TwelveHour),
            other => Err(format!("unknown time format '{other}' (expected 12h or 24h)")),
        }
    }
}

/// Color theme for the particles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    Cyan,
    #[default]
    Green,
    White,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// All themes in cycling order.
    pub const ALL: [ColorTheme; 7] = [
        ColorTheme::Green,
        ColorTheme::Magenta,
        ColorTheme::Yellow,
        ColorTheme::Red,
        ColorTheme::Blue,
        ColorTheme::White,
        ColorTheme::Cyan,
    ];

    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Cyan,
        }
    }

    /// Convert theme to Ratatui Color.
    pub fn color(self) -> Color {
        match self {
            ColorTheme::Cyan => Color::Cyan,
            ColorTheme::Green => Color::Green,
            ColorTheme::White => Color::White,
            ColorTheme::Magenta => Color::Magenta,
            ColorTheme::Yellow => Color::Yellow,
            ColorTheme::Red => Color::Red,
            ColorTheme::Blue => Color::Blue,
        }
    }

    /// Lowercase theme name, as used in the config file and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Cyan => "cyan",
            ColorTheme::Green => "green",
            ColorTheme::White => "white",
            ColorTheme::Magenta => "magenta",
            ColorTheme::Yellow => "yellow",
            ColorTheme::Red => "red",
            ColorTheme::Blue => "blue",
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ColorTheme::ALL
            .into_iter()
            .find(|theme| theme.name() == wanted)
            .ok_or_else(|| format!("unknown color theme '{wanted}'"))
    }
}

/// A sampled surface pixel. Origin is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// Scale a pixel-space constant by the pixel ratio.
pub fn scaled(value: f32, pixel_ratio: f32) -> f32 {
    value * pixel_ratio
}

/// Surface size in pixels for a drawing area of `cols x rows` terminal cells.
pub fn surface_size(cols: u16, rows: u16, pixel_ratio: f32) -> (u32, u32) {
    let width = (cols as f32 * scaled(CELL_PX_WIDTH as f32, pixel_ratio)).round();
    let height = (rows as f32 * scaled(CELL_PX_HEIGHT as f32, pixel_ratio)).round();
    (width.max(0.0) as u32, height.max(0.0) as u32)
}
