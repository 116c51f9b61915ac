//! Script transpilation and minification with the OXC toolchain.
//!
//! ```text
//! source → parse → semantic → transform (es2015) → codegen       (transpile)
//! bundle → parse → minify (compress + mangle) → codegen --minify (post-process)
//! ```

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{TransformOptions, Transformer};

use crate::{JsMinifier, Result, ScriptTranspiler, TransformError};

/// Syntax level transpiled scripts are lowered to.
pub const DEFAULT_TARGET: &str = "es2015";

/// Default [`ScriptTranspiler`] backed by `oxc_transformer`.
#[derive(Debug, Clone)]
pub struct OxcScriptTranspiler {
    target: String,
}

impl OxcScriptTranspiler {
    pub fn new() -> Self {
        Self::with_target(DEFAULT_TARGET)
    }

    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Default for OxcScriptTranspiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptTranspiler for OxcScriptTranspiler {
    fn name(&self) -> &'static str {
        "oxc"
    }

    fn transpile(&self, path: &Path, source: &str) -> Result<String> {
        let script_error = |message: String| TransformError::Script {
            file: path.to_path_buf(),
            message,
        };

        let allocator = Allocator::default();
        let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::mjs());

        let parsed = Parser::new(&allocator, source, source_type).parse();
        if let Some(error) = parsed.errors.first() {
            return Err(script_error(error.to_string()));
        }
        let mut program = parsed.program;

        let scoping = SemanticBuilder::new()
            .build(&program)
            .semantic
            .into_scoping();

        let options = TransformOptions::from_target(&self.target)
            .map_err(|e| script_error(e.to_string()))?;
        let transformed =
            Transformer::new(&allocator, path, &options).build_with_scoping(scoping, &mut program);
        if let Some(error) = transformed.errors.first() {
            return Err(script_error(error.to_string()));
        }

        Ok(Codegen::new().build(&program).code)
    }
}

/// Default [`JsMinifier`] backed by `oxc_minifier`.
///
/// Bundles are treated as classic scripts: top-level names are left alone so
/// globals shared between concatenated files keep working.
#[derive(Debug, Clone, Default)]
pub struct OxcJsMinifier;

impl OxcJsMinifier {
    pub fn new() -> Self {
        Self
    }
}

impl JsMinifier for OxcJsMinifier {
    fn minify(&self, path: &Path, source: &str) -> Result<String> {
        let allocator = Allocator::default();

        let parsed = Parser::new(&allocator, source, SourceType::cjs()).parse();
        if let Some(error) = parsed.errors.first() {
            return Err(TransformError::Minify {
                file: path.to_path_buf(),
                message: error.to_string(),
            });
        }
        let mut program = parsed.program;

        let options = MinifierOptions {
            mangle: Some(MangleOptions::default()),
            compress: Some(CompressOptions::default()),
            ..MinifierOptions::default()
        };
        let minified = Minifier::new(options).minify(&allocator, &mut program);

        Ok(Codegen::new()
            .with_options(CodegenOptions::minify())
            .with_scoping(minified.scoping)
            .build(&program)
            .code)
    }
}
