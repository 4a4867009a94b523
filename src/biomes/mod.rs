//! Biome band classification.
//!
//! Maps a normalized noise intensity (0..=255) onto one of five ordered
//! bands. Higher intensities sit higher in the table: Mountain, Forest,
//! Grass, Sand, and finally Water for everything below the last threshold.

mod config;

pub use config::{BandWidths, BiomePalette};

/// Biome band label. `as_u8()` is stable and used for the coverage tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Biome {
    Mountain = 0,
    Forest = 1,
    Grass = 2,
    Sand = 3,
    Water = 4,
}

impl Biome {
    /// All bands, highest first.
    pub const ALL: [Biome; 5] = [
        Biome::Mountain,
        Biome::Forest,
        Biome::Grass,
        Biome::Sand,
        Biome::Water,
    ];

    /// Bands that own a width, in threshold order.
    const BANDED: [Biome; 4] = [Biome::Mountain, Biome::Forest, Biome::Grass, Biome::Sand];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Mountain => "mountain",
            Biome::Forest => "forest",
            Biome::Grass => "grass",
            Biome::Sand => "sand",
            Biome::Water => "water",
        }
    }

    /// Built-in RGBA color for this biome.
    pub fn default_rgba(self) -> [u8; 4] {
        match self {
            Biome::Mountain => [230, 230, 230, 255],
            Biome::Forest => [49, 180, 58, 255],
            Biome::Grass => [99, 229, 33, 255],
            Biome::Sand => [194, 177, 128, 255],
            Biome::Water => [85, 172, 238, 255],
        }
    }
}

/// Classify a normalized intensity into its biome band.
///
/// Walks the cumulative descending thresholds and returns the first band the
/// intensity sits strictly above. Total over every `u8`; over-budget widths
/// shrink the lower bands instead of failing.
///
/// # Arguments
/// * `intensity` - Normalized noise sample, 0 (lowest) to 255 (highest)
/// * `widths` - Band widths, counted down from 255
///
/// # Returns
/// The biome band containing `intensity`
pub fn classify(intensity: u8, widths: &BandWidths) -> Biome {
    let intensity = intensity as i32;
    Biome::BANDED
        .iter()
        .zip(widths.thresholds())
        .find(|&(_, threshold)| intensity > threshold)
        .map(|(&biome, _)| biome)
        .unwrap_or(Biome::Water)
}
