//! Swarm controller: owns the sampler, the pool and the display settings.

use chrono::NaiveTime;
use particle_clock_core::{ColorTheme, TimeFormat, scaled, surface_size};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Frame, layout::Rect, symbols::Marker, widgets::canvas::Canvas};
use tracing::{debug, info};

use crate::{pool::ParticlePool, sampler::Sampler, shape::Disc};

/// Braille dots per terminal cell, horizontally.
const DOTS_PER_CELL_X: f64 = 2.0;

/// Settings for a [`SwarmState`]. Pixel values are before pixel ratio scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmOptions {
    pub time_format: TimeFormat,
    pub color_theme: ColorTheme,
    pub gap: u32,
    pub pixel_ratio: f32,
    pub font_size: f32,
    pub min_particle_size: f32,
    pub max_particle_size: f32,
    pub transition_ms: u64,
    pub seed: Option<u64>,
}

impl Default for SwarmOptions {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            color_theme: ColorTheme::default(),
            gap: 6,
            pixel_ratio: 1.0,
            font_size: 72.0,
            min_particle_size: 2.0,
            max_particle_size: 7.0,
            transition_ms: 500,
            seed: None,
        }
    }
}

/// Particle clock state.
#[derive(Debug)]
pub struct SwarmState {
    sampler: Sampler,
    pool: ParticlePool,
    time_format: TimeFormat,
    color_theme: ColorTheme,
    pixel_ratio: f32,
    transition_ms: u64,
    /// Drawing area in terminal cells.
    cells: (u16, u16),
    /// Surface size in pixels.
    surface: (u32, u32),
}

impl Default for SwarmState {
    fn default() -> Self {
        Self::new(SwarmOptions::default())
    }
}

impl SwarmState {
    /// Create a swarm with no drawing area yet; call [`SwarmState::resize`]
    /// before the first tick.
    pub fn new(options: SwarmOptions) -> Self {
        let ratio = options.pixel_ratio;
        let gap = scaled(options.gap as f32, ratio).round().max(1.0) as u32;
        let font_size = scaled(options.font_size, ratio);
        let min_size = scaled(options.min_particle_size, ratio).round() as u32;
        let max_size = scaled(options.max_particle_size, ratio).round() as u32;

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            sampler: Sampler::new(gap, font_size),
            pool: ParticlePool::new(min_size, max_size, rng),
            time_format: options.time_format,
            color_theme: options.color_theme,
            pixel_ratio: ratio,
            transition_ms: options.transition_ms,
            cells: (0, 0),
            surface: (0, 0),
        }
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Surface size in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    /// Toggle between 12-hour and 24-hour time format.
    pub fn toggle_time_format(&mut self) {
        self.time_format = self.time_format.toggle();
    }

    pub fn color_theme(&self) -> ColorTheme {
        self.color_theme
    }

    /// Cycle through available color themes.
    pub fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
    }

    /// Match the surface to a drawing area of `cols x rows` cells.
    ///
    /// Returns whether the size changed. A change invalidates the text cache
    /// so the next tick resamples; particles keep their positions.
    pub fn resize(&mut self, cols: u16, rows: u16) -> bool {
        if self.cells == (cols, rows) {
            return false;
        }
        self.cells = (cols, rows);
        self.surface = surface_size(cols, rows, self.pixel_ratio);
        self.sampler.resize(self.surface.0, self.surface.1);
        info!(
            cols,
            rows,
            width = self.surface.0,
            height = self.surface.1,
            "resized surface"
        );
        true
    }

    /// Sample the clock at `now` and retarget the swarm.
    ///
    /// Returns whether a new cycle ran; an unchanged display is a no-op.
    pub fn tick(&mut self, now: NaiveTime, elapsed_ms: u64) -> bool {
        let text = self.time_format.format(now);
        self.update_text(&text, elapsed_ms)
    }

    /// Sample an already formatted string and retarget the swarm.
    pub fn update_text(&mut self, text: &str, elapsed_ms: u64) -> bool {
        let Some(points) = self.sampler.sample(text) else {
            return false;
        };
        let change = self
            .pool
            .reconcile(&points, self.surface, elapsed_ms, self.transition_ms);
        debug!(
            particles = self.pool.len(),
            spawned = change.spawned,
            truncated = change.truncated,
            "retargeted swarm"
        );
        true
    }

    /// Step every transition to `elapsed_ms`. Returns how many particles are
    /// still moving.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        self.pool.advance(elapsed_ms)
    }

    /// Draw every particle into `area`.
    ///
    /// `area` should be the size last passed to [`SwarmState::resize`].
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (width, height) = (f64::from(self.surface.0), f64::from(self.surface.1));
        if area.width == 0 || width == 0.0 || height == 0.0 {
            return;
        }
        let step = width / (f64::from(area.width) * DOTS_PER_CELL_X);
        let color = self.color_theme.color();

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for particle in self.pool.iter() {
                    let (x, y) = particle.position();
                    // Surface y grows downward, canvas y grows upward
                    ctx.draw(&Disc {
                        x: f64::from(x),
                        y: height - f64::from(y),
                        radius: f64::from(particle.size()),
                        step,
                        extent: (width, height),
                        color,
                    });
                }
            });
        frame.render_widget(canvas, area);
    }
}
