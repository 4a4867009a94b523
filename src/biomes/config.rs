//! Band widths and display colors for biome classification.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::Biome;

/// Number of intensity levels, counted down from 255, owned by each band
/// above Water. Water absorbs whatever is left.
///
/// Widths are not required to sum to 255 or less; an over-budget table makes
/// the lower thresholds negative and the bands below shrink to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandWidths {
    /// Mountain (snow-capped peaks).
    pub snow: u8,
    pub forest: u8,
    pub grass: u8,
    pub sand: u8,
}

impl Default for BandWidths {
    fn default() -> Self {
        Self {
            snow: 85,
            forest: 50,
            grass: 20,
            sand: 15,
        }
    }
}

impl BandWidths {
    /// All widths zero: every intensity classifies as Water.
    pub const fn all_water() -> Self {
        Self {
            snow: 0,
            forest: 0,
            grass: 0,
            sand: 0,
        }
    }

    /// Widths in band order, highest band first.
    pub fn as_array(&self) -> [u8; 4] {
        [self.snow, self.forest, self.grass, self.sand]
    }

    /// Sum of the four widths.
    pub fn total(&self) -> u32 {
        self.as_array().iter().map(|&w| w as u32).sum()
    }

    /// Whether the widths fit inside the 0..=255 intensity range.
    pub fn fits_budget(&self) -> bool {
        self.total() <= 255
    }

    /// Cumulative descending thresholds `[t1, t2, t3, t4]`.
    ///
    /// An intensity strictly above `t1` is Mountain, above `t2` Forest, and so
    /// on; anything at or below `t4` is Water. Values may be negative.
    pub fn thresholds(&self) -> [i32; 4] {
        let mut out = [0i32; 4];
        let mut t = 255i32;
        for (slot, width) in out.iter_mut().zip(self.as_array()) {
            t -= width as i32;
            *slot = t;
        }
        out
    }

    /// Intensities classified as `biome`, or `None` if the band is empty.
    pub fn band_range(&self, biome: Biome) -> Option<RangeInclusive<u8>> {
        let t = self.thresholds();
        let (above, upto) = match biome {
            Biome::Mountain => (t[0], 255),
            Biome::Forest => (t[1], t[0]),
            Biome::Grass => (t[2], t[1]),
            Biome::Sand => (t[3], t[2]),
            Biome::Water => (-1, t[3]),
        };
        let lo = (above + 1).max(0);
        let hi = upto.min(255);
        (lo <= hi).then(|| (lo as u8)..=(hi as u8))
    }
}

/// RGBA display color per biome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomePalette {
    pub mountain: [u8; 4],
    pub forest: [u8; 4],
    pub grass: [u8; 4],
    pub sand: [u8; 4],
    pub water: [u8; 4],
}

impl Default for BiomePalette {
    fn default() -> Self {
        Self {
            mountain: Biome::Mountain.default_rgba(),
            forest: Biome::Forest.default_rgba(),
            grass: Biome::Grass.default_rgba(),
            sand: Biome::Sand.default_rgba(),
            water: Biome::Water.default_rgba(),
        }
    }
}

impl BiomePalette {
    /// Color assigned to `biome`.
    pub fn color(&self, biome: Biome) -> [u8; 4] {
        match biome {
            Biome::Mountain => self.mountain,
            Biome::Forest => self.forest,
            Biome::Grass => self.grass,
            Biome::Sand => self.sand,
            Biome::Water => self.water,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::classify;

    #[test]
    fn default_thresholds() {
        let widths = BandWidths::default();
        assert_eq!(widths.thresholds(), [170, 120, 100, 85]);
        assert_eq!(widths.total(), 170);
        assert!(widths.fits_budget());
    }

    #[test]
    fn over_budget_thresholds_go_negative() {
        let widths = BandWidths {
            snow: 200,
            forest: 100,
            grass: 0,
            sand: 10,
        };
        assert_eq!(widths.thresholds(), [55, -45, -45, -55]);
        assert!(!widths.fits_budget());
    }

    #[test]
    fn band_ranges_agree_with_classify() {
        let tables = [
            BandWidths::default(),
            BandWidths::all_water(),
            BandWidths { snow: 0, forest: 0, grass: 0, sand: 255 },
            BandWidths { snow: 200, forest: 100, grass: 0, sand: 10 },
        ];
        for widths in &tables {
            for intensity in 0..=255u8 {
                let biome = classify(intensity, widths);
                for candidate in Biome::ALL {
                    let inside = widths
                        .band_range(candidate)
                        .map_or(false, |r| r.contains(&intensity));
                    assert_eq!(inside, candidate == biome, "{:?} at {} for {:?}", candidate, intensity, widths);
                }
            }
        }
    }

    #[test]
    fn empty_bands_have_no_range() {
        let widths = BandWidths::all_water();
        assert_eq!(widths.band_range(Biome::Mountain), None);
        assert_eq!(widths.band_range(Biome::Water), Some(0..=255));
        assert_eq!(BandWidths::default().band_range(Biome::Sand), Some(86..=100));
    }

    #[test]
    fn palette_lookup_matches_fields() {
        let palette = BiomePalette::default();
        assert_eq!(palette.color(Biome::Water), [85, 172, 238, 255]);
        assert_eq!(palette.color(Biome::Mountain), [230, 230, 230, 255]);
    }
}
