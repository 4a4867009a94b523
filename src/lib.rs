//! Procedural island map generator.
//!
//! Samples a fractal Perlin noise field over a pixel grid, normalizes each
//! sample to an 8-bit intensity and classifies it into one of five ordered
//! biome bands (mountain, forest, grass, sand, water). The resulting RGBA map
//! is written as PNG.

pub mod biomes;
pub mod config;
pub mod export;
pub mod noise;
pub mod terrain;

pub use biomes::{classify, BandWidths, Biome, BiomePalette};
pub use config::{ConfigError, ImageSize, MapConfig};
pub use export::{ExportError, ImageSink, PngSink};
pub use crate::noise::{FractalNoise, FractalNoiseConfig, NoiseSource};
pub use terrain::{generate_map, generate_raster, normalize, BiomeCoverage, Grid, TerrainMap, ZoomFactor};
