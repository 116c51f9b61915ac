//! The immutable, fully resolved configuration handed to every task.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::discovery::ConfigDiscovery;
use crate::group::{AssetClass, FileGroup};
use crate::settings::{BuildSettings, PageConfig};

/// Virtual route prefix under which third-party dependencies are served
/// during development.
pub const DEPENDENCY_ROUTE: &str = "/node_modules";

/// Glob patterns per asset class, relative to the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patterns {
    pub pages: String,
    pub styles: String,
    pub scripts: String,
    pub images: String,
    pub fonts: String,
}

/// Effective configuration for one process invocation.
///
/// All directories are absolute (joined onto the project root).
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub root: PathBuf,
    pub source_dir: PathBuf,
    pub intermediate_dir: PathBuf,
    pub output_dir: PathBuf,
    pub public_dir: PathBuf,
    pub dependency_dir: PathBuf,
    pub patterns: Patterns,
    pub template_data: Value,
}

impl EffectiveConfig {
    /// Resolve the configuration for a project root.
    ///
    /// Never fails: a missing or broken override yields the defaults.
    pub fn resolve(root: impl AsRef<Path>, explicit: Option<&Path>) -> Self {
        let root = absolute_root(root.as_ref());
        let page_config = ConfigDiscovery::new(&root).load_or_default(explicit);
        Self::from_page_config(root, page_config)
    }

    /// Build the effective configuration from an already loaded document.
    pub fn from_page_config(root: impl Into<PathBuf>, config: PageConfig) -> Self {
        let root = root.into();
        let BuildSettings {
            src,
            temp,
            dist,
            public,
            pages,
            styles,
            scripts,
            images,
            fonts,
        } = config.build;

        Self {
            source_dir: root.join(src),
            intermediate_dir: root.join(temp),
            output_dir: root.join(dist),
            public_dir: root.join(public),
            dependency_dir: root.join("node_modules"),
            patterns: Patterns {
                pages,
                styles,
                scripts,
                images,
                fonts,
            },
            template_data: Value::Object(config.data),
            root,
        }
    }

    /// Defaults only, rooted at `root`.
    pub fn defaults(root: impl Into<PathBuf>) -> Self {
        Self::from_page_config(root, PageConfig::default())
    }

    pub fn pattern(&self, class: AssetClass) -> &str {
        match class {
            AssetClass::Styles => &self.patterns.styles,
            AssetClass::Scripts => &self.patterns.scripts,
            AssetClass::Pages => &self.patterns.pages,
            AssetClass::Images => &self.patterns.images,
            AssetClass::Fonts => &self.patterns.fonts,
            AssetClass::Extra => "**/*",
        }
    }

    /// File group read by the transform task of `class`.
    ///
    /// Compiled classes land in the intermediate directory; images, fonts and
    /// extra files go straight to the output directory.
    pub fn file_group(&self, class: AssetClass) -> FileGroup {
        let base = match class {
            AssetClass::Extra => &self.public_dir,
            _ => &self.source_dir,
        };
        let dest = if class.is_compiled() {
            &self.intermediate_dir
        } else {
            &self.output_dir
        };
        FileGroup::new(self.pattern(class), base, dest)
    }

    /// File group read by post-processing: compiled pages in the intermediate
    /// directory, written to the output directory.
    pub fn post_process_group(&self) -> FileGroup {
        FileGroup::new(
            self.patterns.pages.clone(),
            &self.intermediate_dir,
            &self.output_dir,
        )
    }

    /// Ordered document roots of the preview server; first match wins.
    pub fn preview_roots(&self) -> Vec<PathBuf> {
        vec![
            self.intermediate_dir.clone(),
            self.source_dir.clone(),
            self.public_dir.clone(),
        ]
    }

    /// Search path used to resolve build-reference annotations.
    pub fn reference_search_path(&self) -> Vec<PathBuf> {
        vec![self.intermediate_dir.clone(), self.root.clone()]
    }
}

fn absolute_root(root: &Path) -> PathBuf {
    std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf())
}
