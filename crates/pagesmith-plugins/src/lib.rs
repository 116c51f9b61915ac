//! Transformation collaborators for the pagesmith pipeline.
//!
//! Each capability the pipeline delegates is an explicit trait with one
//! default implementation:
//!
//! | Capability | Trait | Default |
//! |------------|-------|---------|
//! | stylesheet compilation | [`StyleCompiler`] | [`sass::GrassStyleCompiler`] |
//! | script transpilation | [`ScriptTranspiler`] | [`script::OxcScriptTranspiler`] |
//! | page rendering | [`PageRenderer`] | [`template::MiniJinjaRenderer`] |
//! | image/font optimization | [`AssetOptimizer`] | [`raster::RasterOptimizer`] |
//! | CSS minification | [`CssMinifier`] | [`css::LightningCssMinifier`] |
//! | JS minification | [`JsMinifier`] | [`script::OxcJsMinifier`] |
//! | HTML minification | [`HtmlMinifier`] | [`html::CollapsingHtmlMinifier`] |
//!
//! All collaborators are synchronous and `Send + Sync`; the task layer runs
//! them on blocking threads. [`Transformers`] bundles one of each and is
//! selected once at startup.

pub mod css;
pub mod html;
pub mod raster;
pub mod sass;
pub mod script;
pub mod template;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// Failure of a delegated transformation. Always names the offending file.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to compile stylesheet {}: {message}", .file.display())]
    Style { file: PathBuf, message: String },

    #[error("failed to transpile script {}: {message}", .file.display())]
    Script { file: PathBuf, message: String },

    #[error("failed to render page {}: {message}", .file.display())]
    Template { file: PathBuf, message: String },

    #[error("failed to optimize {}: {message}", .file.display())]
    Image { file: PathBuf, message: String },

    #[error("failed to minify {}: {message}", .file.display())]
    Minify { file: PathBuf, message: String },
}

pub type Result<T, E = TransformError> = std::result::Result<T, E>;

/// Compiles a stylesheet source into plain CSS.
pub trait StyleCompiler: Send + Sync {
    fn name(&self) -> &'static str;

    fn compile(&self, path: &Path, source: &str) -> Result<String>;

    /// Partials (`_name.scss`) are only pulled in by other stylesheets and are
    /// never emitted on their own.
    fn is_partial(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('_'))
    }

    /// Output path for a compiled stylesheet.
    fn output_path(&self, path: &Path) -> PathBuf {
        path.with_extension("css")
    }
}

/// Lowers modern script syntax for older browsers.
pub trait ScriptTranspiler: Send + Sync {
    fn name(&self) -> &'static str;

    fn transpile(&self, path: &Path, source: &str) -> Result<String>;
}

/// Renders a page template with the configured template data.
pub trait PageRenderer: Send + Sync {
    fn name(&self) -> &'static str;

    fn render(&self, path: &Path, source: &str, data: &Value) -> Result<String>;
}

/// Optimizes image and font files. Must return the input unchanged when it
/// has nothing to improve.
pub trait AssetOptimizer: Send + Sync {
    fn name(&self) -> &'static str;

    fn optimize(&self, path: &Path, bytes: Vec<u8>) -> Result<Vec<u8>>;
}

pub trait CssMinifier: Send + Sync {
    fn minify(&self, path: &Path, source: &str) -> Result<String>;
}

pub trait JsMinifier: Send + Sync {
    fn minify(&self, path: &Path, source: &str) -> Result<String>;
}

pub trait HtmlMinifier: Send + Sync {
    fn minify(&self, path: &Path, source: &str) -> Result<String>;
}

/// Registry of the collaborators used by one pipeline run.
#[derive(Clone)]
pub struct Transformers {
    pub styles: Arc<dyn StyleCompiler>,
    pub scripts: Arc<dyn ScriptTranspiler>,
    pub pages: Arc<dyn PageRenderer>,
    pub assets: Arc<dyn AssetOptimizer>,
    pub css_minifier: Arc<dyn CssMinifier>,
    pub js_minifier: Arc<dyn JsMinifier>,
    pub html_minifier: Arc<dyn HtmlMinifier>,
}

impl Transformers {
    /// Default collaborators. Stylesheet imports and page `extends`/`include`
    /// resolve against `source_root`.
    pub fn with_defaults(source_root: impl Into<PathBuf>) -> Self {
        let source_root = source_root.into();
        let css_minifier: Arc<dyn CssMinifier> = Arc::new(css::LightningCssMinifier::new());
        let js_minifier: Arc<dyn JsMinifier> = Arc::new(script::OxcJsMinifier::new());

        Self {
            styles: Arc::new(sass::GrassStyleCompiler::new(source_root.clone())),
            scripts: Arc::new(script::OxcScriptTranspiler::new()),
            pages: Arc::new(template::MiniJinjaRenderer::new(source_root)),
            assets: Arc::new(raster::RasterOptimizer::new()),
            html_minifier: Arc::new(html::CollapsingHtmlMinifier::new(
                Arc::clone(&css_minifier),
                Arc::clone(&js_minifier),
            )),
            css_minifier,
            js_minifier,
        }
    }
}

impl std::fmt::Debug for Transformers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformers")
            .field("styles", &self.styles.name())
            .field("scripts", &self.scripts.name())
            .field("pages", &self.pages.name())
            .field("assets", &self.assets.name())
            .finish_non_exhaustive()
    }
}
