//! Coherent noise sources for terrain synthesis.
//!
//! The raster generator only depends on the [`NoiseSource`] contract; the
//! shipped implementation is multi-octave Perlin fBm built on the `noise` crate.

mod fractal;

pub use fractal::{FractalNoise, FractalNoiseConfig};

/// A deterministic 2D coherent-noise field.
///
/// Implementations must return values in `[-1, 1]` and must give the same
/// result for the same coordinates for their whole lifetime. `Sync` is
/// required because cells are sampled from rayon worker threads.
pub trait NoiseSource: Sync {
    /// Samples the field at a real-valued coordinate.
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    fn sample(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}
