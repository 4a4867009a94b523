//! Terrain raster generation.
//!
//! Provides the validated [`Grid`] and [`ZoomFactor`] inputs, the parallel
//! noise-to-biome rasterizer, and the [`TerrainMap`] it produces.

mod grid;
mod map;
mod raster;

pub use grid::{Grid, ZoomFactor};
pub use map::{BiomeCoverage, TerrainMap};
pub use raster::{generate_map, generate_raster, intensity_at, normalize, sample_intensities};
