//! Lossless optimization of image and font files.
//!
//! PNG files are re-encoded with maximum compression and adaptive filtering;
//! the smaller of the two encodings is kept. Every other format (JPEG, GIF,
//! SVG, web fonts) passes through untouched.

use std::io::Cursor;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ImageFormat;

use crate::{AssetOptimizer, Result, TransformError};

/// Default [`AssetOptimizer`].
#[derive(Debug, Clone, Default)]
pub struct RasterOptimizer;

impl RasterOptimizer {
    pub fn new() -> Self {
        Self
    }

    fn recompress_png(&self, path: &Path, bytes: &[u8]) -> Result<Vec<u8>> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(|e| {
            TransformError::Image {
                file: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let mut out = Vec::with_capacity(bytes.len());
        let encoder = PngEncoder::new_with_quality(
            Cursor::new(&mut out),
            CompressionType::Best,
            FilterType::Adaptive,
        );
        decoded
            .write_with_encoder(encoder)
            .map_err(|e| TransformError::Image {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(out)
    }
}

impl AssetOptimizer for RasterOptimizer {
    fn name(&self) -> &'static str {
        "raster"
    }

    fn optimize(&self, path: &Path, bytes: Vec<u8>) -> Result<Vec<u8>> {
        let is_png = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            return Ok(bytes);
        }

        let recompressed = self.recompress_png(path, &bytes)?;
        if recompressed.len() < bytes.len() {
            tracing::debug!(
                file = %path.display(),
                before = bytes.len(),
                after = recompressed.len(),
                "recompressed png"
            );
            Ok(recompressed)
        } else {
            Ok(bytes)
        }
    }
}
