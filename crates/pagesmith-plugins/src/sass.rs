//! Sass compilation with grass.
//!
//! `@import` and `@use` are resolved against the importing file's directory
//! first, then the source directory, so `_partial.scss` files are inlined
//! into the stylesheets that pull them in.

use std::path::{Path, PathBuf};

use grass::{InputSyntax, Options, OutputStyle};

use crate::{Result, StyleCompiler, TransformError};

/// Default [`StyleCompiler`] backed by grass.
#[derive(Debug, Clone)]
pub struct GrassStyleCompiler {
    load_paths: Vec<PathBuf>,
}

impl GrassStyleCompiler {
    /// `source_root` is searched for imports after the importing file's own
    /// directory.
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            load_paths: vec![source_root.into()],
        }
    }
}

fn input_syntax(path: &Path) -> InputSyntax {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("sass") => InputSyntax::Sass,
        Some(ext) if ext.eq_ignore_ascii_case("css") => InputSyntax::Css,
        _ => InputSyntax::Scss,
    }
}

impl StyleCompiler for GrassStyleCompiler {
    fn name(&self) -> &'static str {
        "grass"
    }

    fn compile(&self, path: &Path, source: &str) -> Result<String> {
        let mut options = Options::default()
            .style(OutputStyle::Expanded)
            .input_syntax(input_syntax(path));
        if let Some(dir) = path.parent() {
            options = options.load_path(dir);
        }
        for dir in &self.load_paths {
            options = options.load_path(dir);
        }

        grass::from_string(source.to_string(), &options).map_err(|e| TransformError::Style {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
