//! Fixture project shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>{{ title }}</title>
  <!-- build:css assets/styles/bundle.css -->
  <link rel="stylesheet" href="assets/styles/main.css">
  <link rel="stylesheet" href="/node_modules/lib/lib.css">
  <!-- endbuild -->
</head>
<body>
  <h1>{{ title }}</h1>
  <!-- build:js assets/scripts/bundle.js -->
  <script src="assets/scripts/main.js"></script>
  <!-- endbuild -->
</body>
</html>
"#;

pub fn write(root: &Path, rel: &str, contents: impl AsRef<[u8]>) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A small project exercising every asset class.
pub fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(root, "page.config.json", r#"{ "data": { "title": "Fixture" } }"#);
    write(root, "src/index.html", INDEX);
    write(
        root,
        "src/assets/styles/main.scss",
        ".hero {\n  color: red;\n  & .title {\n    margin: 0px;\n  }\n}\n",
    );
    write(
        root,
        "src/assets/scripts/main.js",
        "const greet = (name) => `hi ${name}`;\nwindow.greet = greet;\n",
    );
    write(root, "src/assets/images/logo.svg", "<svg xmlns=\"http://www.w3.org/2000/svg\"/>");
    write(root, "src/assets/fonts/icons.woff", [0x77, 0x4f, 0x46, 0x46]);
    write(root, "node_modules/lib/lib.css", ".lib {\n  padding: 0px;\n}\n");
    write(root, "public/favicon.ico", [0, 0, 1, 0]);

    temp
}
