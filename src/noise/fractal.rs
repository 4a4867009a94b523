//! Multi-octave fractal Brownian motion (fBm) over 2D Perlin noise.

use ::noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::NoiseSource;
use crate::config::ConfigError;

/// Configuration for multi-octave fractal noise generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves (1-8 typical).
    pub octaves: u8,
    /// Base frequency applied on top of the zoom-scaled coordinates.
    pub frequency: f64,
    /// Frequency multiplier per octave (typically 2.0).
    pub lacunarity: f64,
    /// Amplitude decay per octave (0.4-0.6 typical).
    pub persistence: f64,
    /// Random seed for reproducible generation.
    pub seed: u32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 3,
            frequency: 1.0,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 300,
        }
    }
}

impl FractalNoiseConfig {
    /// Creates a new noise configuration with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Sum of the per-octave amplitudes; samples are divided by it.
    pub fn amplitude_sum(&self) -> f64 {
        let mut amplitude = 1.0f64;
        let mut sum = 0.0f64;
        for _ in 0..self.octaves {
            sum += amplitude;
            amplitude *= self.persistence;
        }
        sum
    }

    /// Rejects parameter sets that would make every sample NaN or constant.
    ///
    /// # Returns
    /// `Ok(())`, or a [`ConfigError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octaves == 0 {
            return Err(ConfigError::ZeroOctaves);
        }
        for (name, value) in [
            ("frequency", self.frequency),
            ("lacunarity", self.lacunarity),
            ("persistence", self.persistence),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidNoiseParameter { name, value });
            }
        }

        // Highest octave frequency must stay finite too.
        let top_frequency = self.frequency * self.lacunarity.powi(self.octaves as i32 - 1);
        if !top_frequency.is_finite() {
            return Err(ConfigError::InvalidNoiseParameter {
                name: "lacunarity",
                value: self.lacunarity,
            });
        }

        let sum = self.amplitude_sum();
        if !sum.is_finite() || sum <= 0.0 {
            return Err(ConfigError::DegenerateAmplitudes {
                persistence: self.persistence,
                sum,
            });
        }
        Ok(())
    }
}

struct Octave {
    perlin: Perlin,
    frequency: f64,
    amplitude: f64,
}

/// Seeded fBm noise field. Each octave owns its own Perlin permutation table.
pub struct FractalNoise {
    octaves: Vec<Octave>,
    amplitude_sum: f64,
}

impl FractalNoise {
    /// Builds the octave stack described by `config`.
    ///
    /// # Arguments
    /// * `config` - Octave count, base frequency, lacunarity, persistence and seed
    ///
    /// # Errors
    /// Returns the error from [`FractalNoiseConfig::validate`] when the
    /// parameters cannot produce finite samples.
    pub fn new(config: &FractalNoiseConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut octaves = Vec::with_capacity(config.octaves as usize);
        let mut amplitude = 1.0f64;
        let mut frequency = config.frequency;
        let mut amplitude_sum = 0.0f64;

        for octave in 0..config.octaves {
            // Each octave gets a different seed offset for variation
            let octave_seed = config.seed.wrapping_add(octave as u32 * 31337);
            octaves.push(Octave {
                perlin: Perlin::new(octave_seed),
                frequency,
                amplitude,
            });
            amplitude_sum += amplitude;
            amplitude *= config.persistence;
            frequency *= config.lacunarity;
        }

        Ok(Self {
            octaves,
            amplitude_sum,
        })
    }

    /// Number of octaves summed per sample.
    pub fn octave_count(&self) -> usize {
        self.octaves.len()
    }
}

impl NoiseSource for FractalNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let total: f64 = self
            .octaves
            .iter()
            .map(|o| o.perlin.get([x * o.frequency, y * o.frequency]) * o.amplitude)
            .sum();

        // Normalize to [-1, 1]
        (total / self.amplitude_sum).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FractalNoiseConfig::default();
        assert_eq!(config.octaves, 3);
        assert_eq!(config.lacunarity, 2.0);
        assert_eq!(config.persistence, 0.5);
        assert_eq!(config.seed, 300);
    }

    #[test]
    fn test_zero_octaves_rejected() {
        let config = FractalNoiseConfig {
            octaves: 0,
            ..Default::default()
        };
        assert!(matches!(FractalNoise::new(&config), Err(ConfigError::ZeroOctaves)));
    }

    #[test]
    fn test_noise_reproducibility() {
        let config = FractalNoiseConfig::with_seed(12345);
        let a = FractalNoise::new(&config).unwrap();
        let b = FractalNoise::new(&config).unwrap();

        for &(x, y) in &[(0.5, 0.3), (12.25, -3.7), (1000.1, 0.001)] {
            assert_eq!(a.sample(x, y), b.sample(x, y), "Same seed should give same result at ({x}, {y})");
        }
    }

    #[test]
    fn test_noise_range() {
        let config = FractalNoiseConfig {
            octaves: 6,
            lacunarity: 2.1,
            persistence: 0.55,
            ..FractalNoiseConfig::with_seed(7)
        };
        let noise = FractalNoise::new(&config).unwrap();
        for i in 0..64 {
            for j in 0..64 {
                let v = noise.sample(i as f64 * 0.173, j as f64 * 0.291);
                assert!((-1.0..=1.0).contains(&v), "Noise value {v} out of range");
            }
        }
    }

    #[test]
    fn test_different_seeds_produce_different_fields() {
        let a = FractalNoise::new(&FractalNoiseConfig::with_seed(1)).unwrap();
        let b = FractalNoise::new(&FractalNoiseConfig::with_seed(2)).unwrap();

        let differs = (0..32).any(|i| {
            let x = 0.37 + i as f64 * 0.41;
            let y = 0.11 + i as f64 * 0.23;
            a.sample(x, y) != b.sample(x, y)
        });
        assert!(differs, "Different seeds should produce different noise");
    }

    #[test]
    fn test_octave_count() {
        let config = FractalNoiseConfig {
            octaves: 6,
            ..Default::default()
        };
        assert_eq!(FractalNoise::new(&config).unwrap().octave_count(), 6);
        assert_eq!(config.amplitude_sum(), 1.96875);
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        for (name, config) in [
            ("persistence", FractalNoiseConfig { persistence: f64::NAN, ..Default::default() }),
            ("frequency", FractalNoiseConfig { frequency: f64::INFINITY, ..Default::default() }),
            ("lacunarity", FractalNoiseConfig { lacunarity: f64::NEG_INFINITY, ..Default::default() }),
            ("lacunarity", FractalNoiseConfig { lacunarity: 1e200, ..Default::default() }),
        ] {
            let err = FractalNoise::new(&config).err().unwrap();
            assert!(
                matches!(err, ConfigError::InvalidNoiseParameter { name: n, .. } if n == name),
                "{name}: {err:?}"
            );
        }
    }

    #[test]
    fn test_cancelling_amplitudes_rejected() {
        let config = FractalNoiseConfig {
            octaves: 2,
            persistence: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            FractalNoise::new(&config),
            Err(ConfigError::DegenerateAmplitudes { sum, .. }) if sum == 0.0
        ));
    }

    #[test]
    fn test_valid_samples_are_finite() {
        let noise = FractalNoise::new(&FractalNoiseConfig::default()).unwrap();
        assert!(noise.sample(0.37, 0.71).is_finite());
    }
}
