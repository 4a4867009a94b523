//! Validated grid dimensions and zoom factor.

use crate::config::ConfigError;

/// Largest width or height a PNG header can carry.
const PNG_MAX_DIMENSION: u32 = i32::MAX as u32;

/// Raster dimensions. Both axes are non-zero and the RGBA buffer length
/// fits in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    /// Creates a grid.
    ///
    /// # Arguments
    /// * `width` - Number of columns
    /// * `height` - Number of rows
    ///
    /// # Returns
    /// The grid, or a [`ConfigError`] naming the axis when either is zero and
    /// [`ConfigError::SizeTooLarge`] when the RGBA buffer could not be
    /// allocated or the PNG header could not hold the dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroDimension { name: "width", value: width });
        }
        if height == 0 {
            return Err(ConfigError::ZeroDimension { name: "height", value: height });
        }
        let buffer_len = (width as u64)
            .checked_mul(height as u64)
            .and_then(|cells| cells.checked_mul(4))
            .and_then(|bytes| usize::try_from(bytes).ok());
        if width > PNG_MAX_DIMENSION || height > PNG_MAX_DIMENSION || buffer_len.is_none() {
            return Err(ConfigError::SizeTooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Converts a row-major cell index into `(x, y)`.
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((index % width) as u32, (index / width) as u32)
    }
}

/// Positive, finite divisor applied to pixel coordinates before sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f64);

impl ZoomFactor {
    pub fn new(zoom: f64) -> Result<Self, ConfigError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(ConfigError::InvalidZoom(zoom));
        }
        Ok(Self(zoom))
    }

    pub fn get(&self) -> f64 {
        self.0
    }

    /// Maps a pixel coordinate into noise space.
    pub fn scale(&self, x: u32, y: u32) -> (f64, f64) {
        (x as f64 / self.0, y as f64 / self.0)
    }
}
