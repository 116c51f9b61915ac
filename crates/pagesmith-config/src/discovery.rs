//! File-based override discovery.
//!
//! Looks for an override file in the project root and layers it over the stock
//! defaults with figment.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Format as _, Json, Serialized, Toml},
};

use crate::error::{ConfigError, Result};
use crate::settings::PageConfig;

/// Override file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &["page.config.toml", "page.config.json"];

/// Override file discovery rooted at a project directory.
///
/// # Example
///
/// ```no_run
/// use pagesmith_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load_or_default(None);
/// println!("sources live in {}", config.build.src);
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find the first override file present in the root directory.
    pub fn find(&self) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }

    /// Load the override layered over the defaults.
    ///
    /// An explicit path wins over discovery. Relative explicit paths are
    /// resolved against the root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` when there is nothing to load and
    /// `ConfigError::Invalid` when the file cannot be parsed into the expected
    /// shape.
    pub fn load(&self, explicit: Option<&Path>) -> Result<PageConfig> {
        let path = match explicit {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.root.join(path),
            None => self.find().ok_or(ConfigError::NotFound)?,
        };

        if !path.is_file() {
            return Err(ConfigError::NotFound);
        }

        let figment = Figment::from(Serialized::defaults(PageConfig::default()));
        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => figment.merge(Toml::file_exact(&path)),
            Some("json") => figment.merge(Json::file_exact(&path)),
            _ => return Err(ConfigError::UnsupportedFormat(path)),
        };

        figment.extract().map_err(|e| ConfigError::Invalid {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Load the override, falling back to the defaults on any failure.
    ///
    /// A missing or malformed file is never fatal; the reason is only logged
    /// at debug level.
    pub fn load_or_default(&self, explicit: Option<&Path>) -> PageConfig {
        match self.load(explicit) {
            Ok(config) => {
                tracing::debug!(root = %self.root.display(), "loaded config override");
                config
            }
            Err(ConfigError::NotFound) => PageConfig::default(),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring config override");
                PageConfig::default()
            }
        }
    }
}
