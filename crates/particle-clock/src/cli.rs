//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use particle_clock_config::Config;
use particle_clock_core::{ColorTheme, TimeFormat};

/// Command-line overrides for the config file.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "particle-clock",
    version,
    about = "The current time, traced by a swarm of particles"
)]
pub struct Args {
    #[arg(
        long = "config",
        value_name = "PATH",
        help_heading = "GENERAL",
        help = "Config file to read (default: platform config dir)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'g',
        long = "gap",
        help_heading = "PERFORMANCE",
        help = "Sampling stride in pixels; smaller is denser (min 1 max 64)"
    )]
    pub gap: Option<u32>,

    #[arg(
        long = "pixel-ratio",
        help_heading = "APPEARANCE",
        help = "Scale for every pixel-space value (min 0.25 max 4.0)"
    )]
    pub pixel_ratio: Option<f32>,

    #[arg(
        long = "font-size",
        help_heading = "APPEARANCE",
        help = "Glyph height in pixels (min 7 max 1024)"
    )]
    pub font_size: Option<f32>,

    #[arg(
        short = 'c',
        long = "color",
        help_heading = "APPEARANCE",
        help = "Particle color: green, magenta, yellow, red, blue, white, cyan"
    )]
    pub color: Option<ColorTheme>,

    #[arg(
        short = 't',
        long = "twelve-hour",
        help_heading = "APPEARANCE",
        help = "Use a 12-hour clock"
    )]
    pub twelve_hour: bool,

    #[arg(
        short = 'f',
        long = "fps",
        help_heading = "PERFORMANCE",
        help = "Target FPS (min 1 max 240)"
    )]
    pub fps: Option<u16>,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Fixed seed for particle sizes and spawn points"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "log-file",
        value_name = "PATH",
        help_heading = "GENERAL",
        help = "Log file (default: platform data dir); filter with RUST_LOG"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "write-config",
        help_heading = "GENERAL",
        help = "Write the effective config file and exit"
    )]
    pub write_config: bool,
}

impl Args {
    /// Override `config` with every flag that was given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(gap) = self.gap {
            config.gap = gap;
        }
        if let Some(ratio) = self.pixel_ratio {
            config.pixel_ratio = ratio;
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(color) = self.color {
            config.color_theme = color;
        }
        if self.twelve_hour {
            config.time_format = TimeFormat::TwelveHour;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}
