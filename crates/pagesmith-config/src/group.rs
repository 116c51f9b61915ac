//! Asset classes and the file groups derived from them.

use std::fmt;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Category of source file with its own pattern and transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Styles,
    Scripts,
    Pages,
    Images,
    Fonts,
    Extra,
}

impl AssetClass {
    pub const ALL: [AssetClass; 6] = [
        AssetClass::Styles,
        AssetClass::Scripts,
        AssetClass::Pages,
        AssetClass::Images,
        AssetClass::Fonts,
        AssetClass::Extra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Styles => "styles",
            AssetClass::Scripts => "scripts",
            AssetClass::Pages => "pages",
            AssetClass::Images => "images",
            AssetClass::Fonts => "fonts",
            AssetClass::Extra => "extra",
        }
    }

    /// Whether compiled output of this class lands in the intermediate
    /// directory (and is therefore consumed by post-processing).
    pub fn is_compiled(&self) -> bool {
        matches!(
            self,
            AssetClass::Styles | AssetClass::Scripts | AssetClass::Pages
        )
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Glob matching options shared by enumeration and watch dispatch.
///
/// `*` never crosses a path separator, `**` does.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A source pattern bound to the directories it is read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// Glob evaluated relative to `cwd`.
    pub pattern: String,
    /// Output paths keep the part of the source path below this directory.
    pub base_dir: PathBuf,
    pub cwd: PathBuf,
    pub dest_dir: PathBuf,
}

impl FileGroup {
    pub fn new(
        pattern: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        let base_dir = base_dir.into();
        Self {
            pattern: pattern.into(),
            cwd: base_dir.clone(),
            base_dir,
            dest_dir: dest_dir.into(),
        }
    }

    pub fn compiled_pattern(&self) -> Result<Pattern> {
        Pattern::new(&self.pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: self.pattern.clone(),
            message: e.to_string(),
        })
    }

    /// Absolute glob used to enumerate the group's files.
    pub fn absolute_pattern(&self) -> String {
        let cwd = self.cwd.to_string_lossy();
        let escaped = Pattern::escape(&cwd);
        format!("{}/{}", escaped.trim_end_matches('/'), self.pattern)
    }

    /// Check whether `path` (absolute, or relative to `cwd`) belongs to the
    /// group. Invalid patterns match nothing.
    pub fn matches(&self, path: &Path) -> bool {
        let relative = if path.is_absolute() {
            match path.strip_prefix(&self.cwd) {
                Ok(rel) => rel,
                Err(_) => return false,
            }
        } else {
            path
        };

        self.compiled_pattern()
            .map(|pattern| pattern.matches_path_with(relative, MATCH_OPTIONS))
            .unwrap_or(false)
    }

    /// Destination path for a source file: `dest_dir` joined with the source
    /// path relative to `base_dir`.
    pub fn destination_for(&self, source: &Path) -> PathBuf {
        match source.strip_prefix(&self.base_dir) {
            Ok(rel) => self.dest_dir.join(rel),
            Err(_) => self
                .dest_dir
                .join(source.file_name().unwrap_or(source.as_os_str())),
        }
    }
}
