mod cli;
mod logging;

use std::time::{Duration, Instant};

use chrono::Local;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use particle_clock_config::Config;
use particle_clock_swarm::{SwarmOptions, SwarmState};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};
use tracing::{debug, info};

use crate::cli::Args;

/// Rows reserved under the particles for the help bar.
const HELP_ROWS: u16 = 1;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let log_path = logging::init(args.log_file.as_deref());

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let mut config = Config::load_from(&config_path)?;
    args.apply(&mut config);
    config.validate()?;

    if args.write_config {
        config.save_to(&config_path)?;
        println!("wrote {}", config_path.display());
        return Ok(());
    }

    info!(?log_path, ?config, "starting particle-clock");
    let terminal = ratatui::init();
    let result = App::new(&config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Particles and the clock text they trace.
    swarm: SwarmState,
    /// Origin for every elapsed-time value handed to the swarm.
    started: Instant,
    /// When the clock text is next sampled; `None` samples on the next frame.
    next_sample: Option<Instant>,
    sample_interval: Duration,
    frame_budget: Duration,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> Self {
        let swarm = SwarmState::new(SwarmOptions {
            time_format: config.time_format,
            color_theme: config.color_theme,
            gap: config.gap,
            pixel_ratio: config.pixel_ratio,
            font_size: config.font_size,
            min_particle_size: config.min_particle_size,
            max_particle_size: config.max_particle_size,
            transition_ms: config.transition_ms,
            seed: config.seed,
        });
        Self {
            running: false,
            swarm,
            started: Instant::now(),
            next_sample: None,
            sample_interval: Duration::from_millis(config.sample_interval_ms),
            frame_budget: Duration::from_millis(1000 / u64::from(config.fps.max(1))),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let frame_start = Instant::now();

            let size = terminal.size()?;
            self.swarm
                .resize(size.width, size.height.saturating_sub(HELP_ROWS));

            let elapsed_ms = self.elapsed_ms();
            if self.sample_due(frame_start) {
                self.swarm.tick(Local::now().time(), elapsed_ms);
                self.schedule_next_sample(frame_start);
            }
            self.swarm.advance(elapsed_ms);

            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(self.frame_budget.saturating_sub(frame_start.elapsed()))?;
        }
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Whether the sampling deadline has passed at `now`.
    fn sample_due(&self, now: Instant) -> bool {
        self.next_sample.is_none_or(|deadline| now >= deadline)
    }

    /// Move the deadline one interval past the previous one, so frame
    /// boundaries never stretch the period. Resyncs to `now` when more than
    /// one interval behind.
    fn schedule_next_sample(&mut self, now: Instant) {
        let next = match self.next_sample {
            Some(deadline) => deadline + self.sample_interval,
            None => now + self.sample_interval,
        };
        self.next_sample = Some(if next <= now {
            now + self.sample_interval
        } else {
            next
        });
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),           // Particles
            Constraint::Length(HELP_ROWS), // Help bar
        ])
        .split(frame.area());

        self.swarm.render(frame, chunks[0]);

        let color = self.swarm.color_theme().color();
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "t".bold().fg(color),
            " toggle 12/24h  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame starts on time.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // Resizes are picked up from the terminal size each frame
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_time_format(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            _ => {}
        }
    }

    /// Toggle between 12-hour and 24-hour time format and resample right away.
    fn toggle_time_format(&mut self) {
        self.swarm.toggle_time_format();
        self.next_sample = None;
        debug!(time_format = ?self.swarm.time_format(), "toggled time format");
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.swarm.cycle_color_theme();
        debug!(color_theme = %self.swarm.color_theme(), "cycled color theme");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
