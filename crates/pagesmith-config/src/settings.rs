//! Raw, serde-facing shape of the override file.
//!
//! ```toml
//! [build]
//! src = "src"
//! temp = "temp"
//! dist = "dist"
//! public = "public"
//! pages = "*.html"
//! styles = "assets/styles/*.scss"
//! scripts = "assets/scripts/*.js"
//! images = "assets/images/**"
//! fonts = "assets/fonts/**"
//!
//! [data]
//! title = "My site"
//! ```
//!
//! Every field is optional. Fields inside `[build]` replace their default one
//! by one, while `[data]` replaces the (empty) default template data as a
//! whole. Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level override document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub build: BuildSettings,
    /// Arbitrary data handed to the page renderer.
    pub data: Map<String, Value>,
}

/// Directory and glob settings from the `build` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub src: String,
    pub temp: String,
    pub dist: String,
    pub public: String,
    pub pages: String,
    pub styles: String,
    pub scripts: String,
    pub images: String,
    pub fonts: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            src: "src".to_string(),
            temp: "temp".to_string(),
            dist: "dist".to_string(),
            public: "public".to_string(),
            pages: "*.html".to_string(),
            styles: "assets/styles/*.scss".to_string(),
            scripts: "assets/scripts/*.js".to_string(),
            images: "assets/images/**".to_string(),
            fonts: "assets/fonts/**".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_build_table_keeps_defaults() {
        let parsed: PageConfig =
            serde_json::from_str(r#"{ "build": { "src": "app" } }"#).unwrap();

        assert_eq!(parsed.build.src, "app");
        assert_eq!(parsed.build.dist, "dist");
        assert_eq!(parsed.build.styles, "assets/styles/*.scss");
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let parsed: PageConfig =
            serde_json::from_str(r#"{ "plugins": ["x"], "build": { "nope": 1 } }"#).unwrap();
        assert_eq!(parsed, PageConfig::default());
    }
}
