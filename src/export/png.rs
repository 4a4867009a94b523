//! PNG export for biome maps and intensity fields.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::terrain::Grid;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Image encoding error for {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to replace destination file {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Data length {actual} does not match grid size {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Destination for a finished pixel buffer.
///
/// The buffer is moved in; the generator never touches it again.
pub trait ImageSink {
    fn write(&self, image: RgbaImage, path: &Path) -> Result<(), ExportError>;
}

/// PNG encoder settings.
#[derive(Debug, Clone, Copy)]
pub struct PngSink {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngSink {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngSink {
    fn encode(
        &self,
        writer: &mut dyn Write,
        data: &[u8],
        width: u32,
        height: u32,
        color: ExtendedColorType,
    ) -> Result<(), image::ImageError> {
        let encoder = PngEncoder::new_with_quality(writer, self.compression, self.filter);
        encoder.write_image(data, width, height, color)
    }
}

impl ImageSink for PngSink {
    /// Encodes `image` as RGBA8 PNG and atomically replaces `path`.
    fn write(&self, image: RgbaImage, path: &Path) -> Result<(), ExportError> {
        let (width, height) = image.dimensions();
        write_atomically(path, |writer| {
            self.encode(writer, image.as_raw(), width, height, ExtendedColorType::Rgba8)
        })?;
        log::info!("Wrote {}x{} PNG to {}", width, height, path.display());
        Ok(())
    }
}

/// Exports a normalized intensity field as an 8-bit grayscale PNG.
///
/// # Arguments
/// * `grid` - Dimensions of the field
/// * `intensities` - Row-major values, one per grid cell
/// * `path` - Destination file, replaced atomically
/// * `sink` - Encoder settings shared with the biome map
///
/// # Returns
/// `Ok(())` on success, or [`ExportError::LengthMismatch`] before anything is
/// written when `intensities` does not cover the grid exactly.
pub fn export_intensity_png(
    grid: Grid,
    intensities: &[u8],
    path: &Path,
    sink: &PngSink,
) -> Result<(), ExportError> {
    let expected = grid.cell_count();
    if intensities.len() != expected {
        return Err(ExportError::LengthMismatch {
            expected,
            actual: intensities.len(),
        });
    }

    write_atomically(path, |writer| {
        sink.encode(writer, intensities, grid.width(), grid.height(), ExtendedColorType::L8)
    })?;
    log::info!("Wrote intensity map to {}", path.display());
    Ok(())
}

/// Sibling path for the intensity map: `islands.png` -> `islands_intensity.png`.
pub fn intensity_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map".to_string());
    output.with_file_name(format!("{}_intensity.png", stem))
}

/// Writes through a temporary file in the destination directory, then renames
/// it over `path`. On failure the temporary file is removed and any existing
/// file at `path` is left untouched.
fn write_atomically<F>(path: &Path, encode: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), image::ImageError>,
{
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode(&mut writer).map_err(|source| ExportError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    // Dropping the returned temp file removes it.
    tmp.persist(path).map_err(|e| ExportError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
