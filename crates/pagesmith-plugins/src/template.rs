//! Page rendering with minijinja.
//!
//! Pages are Jinja-style templates. `{% extends %}` and `{% include %}` are
//! resolved against the source directory, and a fresh environment is built
//! for every render so edited layouts are always picked up.

use std::path::{Path, PathBuf};

use minijinja::{Environment, UndefinedBehavior, path_loader};
use serde_json::Value;

use crate::{PageRenderer, Result, TransformError};

/// Default [`PageRenderer`] backed by minijinja.
#[derive(Debug, Clone)]
pub struct MiniJinjaRenderer {
    root: PathBuf,
}

impl MiniJinjaRenderer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_loader(path_loader(&self.root));
        env.set_undefined_behavior(UndefinedBehavior::Lenient);
        env
    }

    fn template_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

impl PageRenderer for MiniJinjaRenderer {
    fn name(&self) -> &'static str {
        "minijinja"
    }

    fn render(&self, path: &Path, source: &str, data: &Value) -> Result<String> {
        let env = self.environment();
        let name = self.template_name(path);

        env.render_named_str(&name, source, data)
            .map_err(|e| TransformError::Template {
                file: path.to_path_buf(),
                message: format!("{e:#}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_with_data() {
        let temp = TempDir::new().unwrap();
        let renderer = MiniJinjaRenderer::new(temp.path());

        let html = renderer
            .render(
                &temp.path().join("index.html"),
                "<h1>{{ title }}</h1>{% for m in menus %}<a>{{ m }}</a>{% endfor %}",
                &json!({ "title": "Home", "menus": ["a", "b"] }),
            )
            .unwrap();

        assert_eq!(html, "<h1>Home</h1><a>a</a><a>b</a>");
    }

    #[test]
    fn test_render_extends_layout_from_source_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("layouts")).unwrap();
        fs::write(
            temp.path().join("layouts/basic.html"),
            "<main>{% block body %}{% endblock %}</main>",
        )
        .unwrap();

        let renderer = MiniJinjaRenderer::new(temp.path());
        let html = renderer
            .render(
                &temp.path().join("about.html"),
                "{% extends 'layouts/basic.html' %}{% block body %}About{% endblock %}",
                &json!({}),
            )
            .unwrap();

        assert_eq!(html, "<main>About</main>");
    }

    #[test]
    fn test_missing_variables_render_empty() {
        let temp = TempDir::new().unwrap();
        let renderer = MiniJinjaRenderer::new(temp.path());

        let html = renderer
            .render(&temp.path().join("a.html"), "[{{ nope }}]", &json!({}))
            .unwrap();

        assert_eq!(html, "[]");
    }

    #[test]
    fn test_syntax_error_names_file() {
        let temp = TempDir::new().unwrap();
        let renderer = MiniJinjaRenderer::new(temp.path());

        let err = renderer
            .render(&temp.path().join("broken.html"), "{% if %}", &json!({}))
            .unwrap_err();

        assert!(err.to_string().contains("broken.html"));
    }
}
