//! CSS minification with lightningcss.
//!
//! ```text
//! bundle → parse → minify → compact CSS
//! ```

use std::path::Path;

use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions, StyleSheet},
};

use crate::{CssMinifier, Result, TransformError};

/// Default [`CssMinifier`] backed by lightningcss.
#[derive(Debug, Clone, Default)]
pub struct LightningCssMinifier;

impl LightningCssMinifier {
    pub fn new() -> Self {
        Self
    }
}

impl CssMinifier for LightningCssMinifier {
    fn minify(&self, path: &Path, source: &str) -> Result<String> {
        let mut stylesheet = StyleSheet::parse(
            source,
            ParserOptions {
                filename: path.to_string_lossy().to_string(),
                ..Default::default()
            },
        )
        .map_err(|e| TransformError::Minify {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| TransformError::Minify {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| TransformError::Minify {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(result.code)
    }
}
