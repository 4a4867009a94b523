//! Export module for saving generated maps.
//!
//! Biome maps are written as RGBA8 PNG and intensity fields as 8-bit
//! grayscale PNG. Every write goes through a temporary file that is renamed
//! over the destination, so a failed export never leaves a truncated image.

mod png;

pub use png::{export_intensity_png, intensity_path, ExportError, ImageSink, PngSink};
