//! Image size and zoom parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Requested output dimensions in pixels.
///
/// Parsed from `WIDTHxHEIGHT` or one of the named presets. Zero dimensions
/// parse successfully and are rejected later by [`crate::terrain::Grid::new`],
/// so the error names the offending axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Named presets accepted in place of `WIDTHxHEIGHT`.
    pub const PRESETS: [(&'static str, ImageSize); 4] = [
        ("5k", ImageSize::new(5120, 2880)),
        ("4k", ImageSize::new(3840, 2160)),
        ("2k", ImageSize::new(2560, 1440)),
        ("1k", ImageSize::new(1920, 1080)),
    ];

    /// Looks up a named preset (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        Self::PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .map(|&(_, size)| size)
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::new(5120, 2880)
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ImageSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(size) = Self::preset(trimmed) {
            return Ok(size);
        }

        let invalid = || ConfigError::InvalidSize(trimmed.to_string());
        let (w, h) = trimmed
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(invalid)?;
        let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = h.trim().parse::<u32>().map_err(|_| invalid())?;

        Ok(Self { width, height })
    }
}

impl TryFrom<String> for ImageSize {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ImageSize> for String {
    fn from(size: ImageSize) -> Self {
        size.to_string()
    }
}

/// Parses a zoom level. Accepts integers and decimals; rejects anything that
/// is not a positive finite number.
pub fn parse_zoom(input: &str) -> Result<f64, ConfigError> {
    let trimmed = input.trim();
    let zoom: f64 = trimmed
        .parse()
        .map_err(|_| ConfigError::InvalidZoomInput(trimmed.to_string()))?;
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(ConfigError::InvalidZoom(zoom));
    }
    Ok(zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_presets() {
        assert_eq!("5k".parse::<ImageSize>().unwrap(), ImageSize::new(5120, 2880));
        assert_eq!("4K".parse::<ImageSize>().unwrap(), ImageSize::new(3840, 2160));
        assert_eq!(" 2k ".parse::<ImageSize>().unwrap(), ImageSize::new(2560, 1440));
        assert_eq!("1k".parse::<ImageSize>().unwrap(), ImageSize::new(1920, 1080));
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!("300x450".parse::<ImageSize>().unwrap(), ImageSize::new(300, 450));
        assert_eq!("64 X 32".parse::<ImageSize>().unwrap(), ImageSize::new(64, 32));
        assert_eq!("0x10".parse::<ImageSize>().unwrap(), ImageSize::new(0, 10));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "300", "300x", "x450", "axb", "-1x5", "3k", "1.5x2"] {
            let err = bad.parse::<ImageSize>().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSize(_)), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn test_display_round_trips_through_string() {
        let size = ImageSize::new(640, 480);
        let text: String = size.into();
        assert_eq!(text, "640x480");
        assert_eq!(ImageSize::try_from(text).unwrap(), size);
    }

    #[test]
    fn test_parse_zoom() {
        assert_eq!(parse_zoom("4000").unwrap(), 4000.0);
        assert_eq!(parse_zoom(" 12.5\n").unwrap(), 12.5);
        assert!(matches!(parse_zoom("zero"), Err(ConfigError::InvalidZoomInput(_))));
        assert!(matches!(parse_zoom("0"), Err(ConfigError::InvalidZoom(_))));
        assert!(matches!(parse_zoom("-3"), Err(ConfigError::InvalidZoom(_))));
        assert!(matches!(parse_zoom("inf"), Err(ConfigError::InvalidZoom(_))));
        assert!(matches!(parse_zoom("NaN"), Err(ConfigError::InvalidZoom(_))));
    }
}
