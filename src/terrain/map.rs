//! Generated map output and per-biome coverage.

use std::fmt;

use image::RgbaImage;

use crate::biomes::Biome;

/// Pixel counts per biome for one generated map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BiomeCoverage {
    counts: [u64; 5],
}

impl BiomeCoverage {
    pub fn record(&mut self, biome: Biome) {
        self.counts[biome.index()] += 1;
    }

    pub fn merge(mut self, other: Self) -> Self {
        for (a, b) in self.counts.iter_mut().zip(other.counts) {
            *a += b;
        }
        self
    }

    pub fn count(&self, biome: Biome) -> u64 {
        self.counts[biome.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of the map covered by `biome`, in `[0, 1]`.
    pub fn fraction(&self, biome: Biome) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(biome) as f64 / total as f64
    }
}

impl fmt::Display for BiomeCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for biome in Biome::ALL {
            writeln!(
                f,
                "  {:<9} {:>12} px ({:>5.1}%)",
                biome.name(),
                self.count(biome),
                self.fraction(biome) * 100.0
            )?;
        }
        Ok(())
    }
}

/// A rendered biome map together with its coverage summary.
#[derive(Debug, Clone)]
pub struct TerrainMap {
    pub image: RgbaImage,
    pub coverage: BiomeCoverage,
}

impl TerrainMap {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Hands the pixel buffer off, consuming the map.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_counts_and_fractions() {
        let mut a = BiomeCoverage::default();
        a.record(Biome::Water);
        a.record(Biome::Water);
        a.record(Biome::Sand);

        let mut b = BiomeCoverage::default();
        b.record(Biome::Mountain);

        let merged = a.merge(b);
        assert_eq!(merged.total(), 4);
        assert_eq!(merged.count(Biome::Water), 2);
        assert_eq!(merged.fraction(Biome::Water), 0.5);
        assert_eq!(merged.fraction(Biome::Forest), 0.0);
    }

    #[test]
    fn empty_coverage_has_zero_fractions() {
        let coverage = BiomeCoverage::default();
        assert_eq!(coverage.fraction(Biome::Grass), 0.0);
        assert!(coverage.to_string().contains("grass"));
    }
}
