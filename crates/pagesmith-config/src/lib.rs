//! Configuration for the pagesmith asset pipeline.
//!
//! The configuration is resolved exactly once per process: stock defaults are
//! layered with an optional `page.config.toml` / `page.config.json` override
//! from the project root, and the result is frozen into an [`EffectiveConfig`]
//! that every task receives at construction time.
//!
//! ```no_run
//! use pagesmith_config::{AssetClass, EffectiveConfig};
//!
//! let config = EffectiveConfig::resolve(".", None);
//! let styles = config.file_group(AssetClass::Styles);
//! assert_eq!(styles.pattern, "assets/styles/*.scss");
//! ```

pub mod discovery;
pub mod effective;
pub mod error;
pub mod group;
pub mod settings;

pub use discovery::{CONFIG_FILE_NAMES, ConfigDiscovery};
pub use effective::{DEPENDENCY_ROUTE, EffectiveConfig, Patterns};
pub use error::{ConfigError, Result};
pub use group::{AssetClass, FileGroup, MATCH_OPTIONS};
pub use settings::{BuildSettings, PageConfig};
