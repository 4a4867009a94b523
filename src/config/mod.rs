//! Run configuration.
//!
//! A [`MapConfig`] is built once (defaults, then an optional TOML file, then
//! the interactive prompt and CLI flags) and passed by reference to the
//! generator. Nothing is read from global state during a run.

mod prompt;
mod size;

pub use prompt::prompt_size_and_zoom;
pub use size::{parse_zoom, ImageSize};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biomes::{BandWidths, BiomePalette};
use crate::noise::FractalNoiseConfig;
use crate::terrain::{Grid, ZoomFactor};

/// Errors raised while building or validating a configuration.
///
/// All of these are fatal and surface before any sampling starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be greater than zero (got {value})")]
    ZeroDimension { name: &'static str, value: u32 },
    #[error("image size {width}x{height} is too large to allocate or encode as PNG")]
    SizeTooLarge { width: u32, height: u32 },
    #[error("zoom must be a positive finite number (got {0})")]
    InvalidZoom(f64),
    #[error("invalid image size '{0}': expected WIDTHxHEIGHT or one of 5k, 4k, 2k, 1k")]
    InvalidSize(String),
    #[error("invalid zoom '{0}': expected a positive number")]
    InvalidZoomInput(String),
    #[error("noise octaves must be at least 1")]
    ZeroOctaves,
    #[error("noise {name} must be a finite number (got {value})")]
    InvalidNoiseParameter { name: &'static str, value: f64 },
    #[error("noise persistence {persistence} makes the octave amplitudes sum to {sum}")]
    DegenerateAmplitudes { persistence: f64, sum: f64 },
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to read interactive input: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Complete description of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Output dimensions.
    pub size: ImageSize,
    /// Divisor applied to pixel coordinates before sampling.
    pub zoom: f64,
    /// Destination of the rendered PNG.
    pub output: PathBuf,
    pub noise: FractalNoiseConfig,
    pub bands: BandWidths,
    pub palette: BiomePalette,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: ImageSize::default(),
            zoom: 4000.0,
            output: PathBuf::from("islands.png"),
            noise: FractalNoiseConfig::default(),
            bands: BandWidths::default(),
            palette: BiomePalette::default(),
        }
    }
}

impl MapConfig {
    /// Parses a TOML document. Missing keys and tables keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Reads and parses a TOML config file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config file {}", path.display());
        Self::from_toml_str(&raw)
    }

    /// Checks every precondition of a run and returns the validated grid and
    /// zoom factor.
    pub fn validate(&self) -> Result<(Grid, ZoomFactor), ConfigError> {
        let grid = Grid::new(self.size.width, self.size.height)?;
        let zoom = ZoomFactor::new(self.zoom)?;
        self.noise.validate()?;
        Ok((grid, zoom))
    }
}
