//! Configuration for the particle-clock application.
//!
//! Settings live in `config.toml` under the platform config directory. Every
//! field is optional; missing fields take their defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use particle_clock_core::{ColorTheme, TimeFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.toml";
const APP_NAME: &str = "particle-clock";
/// Largest particle radius accepted, before pixel ratio scaling.
pub const MAX_PARTICLE_SIZE: f32 = 64.0;

/// Errors raised while loading, validating or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("TOML parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine the platform config directory")]
    NoConfigDir,

    #[error("invalid value for {field}: {value} (allowed {allowed})")]
    Invalid {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 12-hour or 24-hour clock.
    pub time_format: TimeFormat,
    /// Particle color.
    pub color_theme: ColorTheme,
    /// Sampling stride in pixels, before pixel ratio scaling.
    pub gap: u32,
    /// Uniform scale for every pixel-space constant.
    pub pixel_ratio: f32,
    /// Glyph height in pixels, before pixel ratio scaling.
    pub font_size: f32,
    /// Smallest particle radius in pixels, before pixel ratio scaling.
    pub min_particle_size: f32,
    /// Largest particle radius in pixels, before pixel ratio scaling.
    pub max_particle_size: f32,
    /// Duration of one particle transition.
    pub transition_ms: u64,
    /// How often the clock text is resampled.
    pub sample_interval_ms: u64,
    /// Target frames per second.
    pub fps: u16,
    /// Fixed RNG seed; random when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
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
            sample_interval_ms: 1000,
            fps: 60,
            seed: None,
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    ///
    /// Values are not range checked here; call [`Config::validate`] once
    /// command-line overrides are applied.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;
        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Reject values outside their allowed ranges.
    pub fn validate(&self) -> Result<()> {
        if !(1..=64).contains(&self.gap) {
            return Err(invalid("gap", self.gap, "1..=64"));
        }
        if !(0.25..=4.0).contains(&self.pixel_ratio) {
            return Err(invalid("pixel_ratio", self.pixel_ratio, "0.25..=4.0"));
        }
        if !(7.0..=1024.0).contains(&self.font_size) {
            return Err(invalid("font_size", self.font_size, "7.0..=1024.0"));
        }
        if self.min_particle_size.is_nan()
            || self.min_particle_size <= 0.0
            || self.min_particle_size > MAX_PARTICLE_SIZE
        {
            return Err(invalid("min_particle_size", self.min_particle_size, "> 0, <= 64.0"));
        }
        if self.max_particle_size.is_nan()
            || self.max_particle_size < self.min_particle_size
            || self.max_particle_size > MAX_PARTICLE_SIZE
        {
            return Err(invalid(
                "max_particle_size",
                self.max_particle_size,
                ">= min_particle_size, <= 64.0",
            ));
        }
        if !(1..=10_000).contains(&self.transition_ms) {
            return Err(invalid("transition_ms", self.transition_ms, "1..=10000"));
        }
        if !(100..=60_000).contains(&self.sample_interval_ms) {
            return Err(invalid("sample_interval_ms", self.sample_interval_ms, "100..=60000"));
        }
        if !(1..=240).contains(&self.fps) {
            return Err(invalid("fps", self.fps, "1..=240"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, value: impl ToString, allowed: &'static str) -> ConfigError {
    ConfigError::Invalid {
        field,
        value: value.to_string(),
        allowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("particle-clock-test-{}-{name}", std::process::id()))
            .join(CONFIG_FILE)
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gap, 6);
        assert_eq!(config.transition_ms, 500);
        assert_eq!(config.sample_interval_ms, 1000);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_path("missing");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            time_format = "12h"
            color_theme = "magenta"
            gap = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.time_format, TimeFormat::TwelveHour);
        assert_eq!(config.color_theme, ColorTheme::Magenta);
        assert_eq!(config.gap, 4);
        assert_eq!(config.font_size, 72.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let config = Config {
            gap: 8,
            pixel_ratio: 2.0,
            seed: Some(42),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_parse_error_names_path() {
        let path = temp_path("broken");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "gap = \"wide\"").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let zero_gap = Config {
            gap: 0,
            ..Config::default()
        };
        assert!(matches!(
            zero_gap.validate(),
            Err(ConfigError::Invalid { field: "gap", .. })
        ));

        let inverted = Config {
            min_particle_size: 5.0,
            max_particle_size: 3.0,
            ..Config::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::Invalid {
                field: "max_particle_size",
                ..
            })
        ));

        let nan_ratio = Config {
            pixel_ratio: f32::NAN,
            ..Config::default()
        };
        assert!(nan_ratio.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_particles() {
        let huge = Config {
            min_particle_size: 20_000.0,
            max_particle_size: 20_000.0,
            ..Config::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::Invalid {
                field: "min_particle_size",
                ..
            })
        ));

        let huge_max = Config {
            max_particle_size: MAX_PARTICLE_SIZE + 1.0,
            ..Config::default()
        };
        assert!(matches!(
            huge_max.validate(),
            Err(ConfigError::Invalid {
                field: "max_particle_size",
                ..
            })
        ));

        let at_cap = Config {
            min_particle_size: MAX_PARTICLE_SIZE,
            max_particle_size: MAX_PARTICLE_SIZE,
            ..Config::default()
        };
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn test_load_leaves_range_checks_to_validate() {
        let path = temp_path("zero-gap");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "gap = 0").unwrap();

        let mut config = Config::load_from(&path).unwrap();
        assert_eq!(config.gap, 0);
        assert!(config.validate().is_err());

        // A later override repairs the file value
        config.gap = 4;
        assert!(config.validate().is_ok());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
