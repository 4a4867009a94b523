//! Noise-to-raster classification.
//!
//! Each cell is independent: scale the pixel coordinate by the zoom factor,
//! sample the noise field, normalize to 0..=255, classify into a biome band
//! and write the band color. Cells are processed in parallel with rayon over
//! disjoint pixel slices, so no synchronization is needed.

use image::RgbaImage;
use rayon::prelude::*;

use super::grid::{Grid, ZoomFactor};
use super::map::{BiomeCoverage, TerrainMap};
use crate::biomes::{classify, BandWidths, BiomePalette};
use crate::config::{ConfigError, MapConfig};
use crate::noise::NoiseSource;

/// Maps a noise sample in `[-1, 1]` to an intensity in `0..=255`.
///
/// Rounds half away from zero, so `0.0` becomes 128. Out-of-range samples are
/// clamped; non-finite samples map to 0.
pub fn normalize(sample: f64) -> u8 {
    if !sample.is_finite() {
        return 0;
    }
    ((sample + 1.0) * 127.5).round().clamp(0.0, 255.0) as u8
}

/// Normalized intensity of the cell at `(x, y)`.
pub fn intensity_at<N: NoiseSource + ?Sized>(noise: &N, zoom: ZoomFactor, x: u32, y: u32) -> u8 {
    let (sx, sy) = zoom.scale(x, y);
    normalize(noise.sample(sx, sy))
}

/// Renders the biome map for `grid`.
///
/// The pixel buffer is allocated once at full size and every pixel is
/// written exactly once. Coverage counts are gathered in the same pass.
///
/// # Arguments
/// * `grid` - Output dimensions
/// * `zoom` - Divisor applied to pixel coordinates before sampling
/// * `noise` - Field sampled once per pixel
/// * `widths` - Band widths used by [`classify`]
/// * `palette` - Color written for each biome
///
/// # Returns
/// The RGBA image and its per-biome pixel counts
pub fn generate_raster<N: NoiseSource + ?Sized>(
    grid: Grid,
    zoom: ZoomFactor,
    noise: &N,
    widths: &BandWidths,
    palette: &BiomePalette,
) -> TerrainMap {
    let mut image = RgbaImage::new(grid.width(), grid.height());

    let pixels: &mut [u8] = &mut image;
    let coverage = pixels
        .par_chunks_exact_mut(4)
        .enumerate()
        .map(|(i, pixel)| {
            let (x, y) = grid.coords(i);
            let biome = classify(intensity_at(noise, zoom, x, y), widths);
            pixel.copy_from_slice(&palette.color(biome));
            biome
        })
        .fold(BiomeCoverage::default, |mut acc, biome| {
            acc.record(biome);
            acc
        })
        .reduce(BiomeCoverage::default, BiomeCoverage::merge);

    TerrainMap { image, coverage }
}

/// Samples the normalized intensity field in row-major order.
pub fn sample_intensities<N: NoiseSource + ?Sized>(grid: Grid, zoom: ZoomFactor, noise: &N) -> Vec<u8> {
    let mut intensities = vec![0u8; grid.cell_count()];
    intensities.par_iter_mut().enumerate().for_each(|(i, value)| {
        let (x, y) = grid.coords(i);
        *value = intensity_at(noise, zoom, x, y);
    });
    intensities
}

/// Validates `config` and renders its map.
///
/// # Returns
/// The rendered map, or the first [`ConfigError`] found. Configuration errors
/// are reported before any cell is sampled.
pub fn generate_map<N: NoiseSource + ?Sized>(
    config: &MapConfig,
    noise: &N,
) -> Result<TerrainMap, ConfigError> {
    let (grid, zoom) = config.validate()?;
    if !config.bands.fits_budget() {
        log::warn!(
            "Band widths sum to {} (> 255); lower bands will shrink",
            config.bands.total()
        );
    }
    log::info!(
        "Generating {}x{} map at zoom {}",
        grid.width(),
        grid.height(),
        zoom.get()
    );
    log::debug!("Band thresholds: {:?}", config.bands.thresholds());

    Ok(generate_raster(grid, zoom, noise, &config.bands, &config.palette))
}
