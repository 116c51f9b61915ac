//! End-to-end pipeline runs against a fixture project.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use pagesmith_config::EffectiveConfig;
use pagesmith_core::{BuildContext, ReloadEvent, TaskError, pipeline};
use tempfile::TempDir;
use tokio::sync::broadcast;
use walkdir::WalkDir;

const INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>{{ title }}</title>
  <!-- build:css assets/styles/bundle.css -->
  <link rel="stylesheet" href="assets/styles/main.css">
  <link rel="stylesheet" href="/node_modules/lib/lib.css">
  <!-- endbuild -->
</head>
<body>
  <h1>  {{ title }}  </h1>
  <!-- build:js assets/scripts/bundle.js -->
  <script src="assets/scripts/main.js"></script>
  <!-- endbuild -->
</body>
</html>
"#;

fn write(root: &Path, rel: &str, contents: impl AsRef<[u8]>) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(root, "page.config.toml", "[data]\ntitle = \"Pagesmith\"\n");
    write(root, "src/index.html", INDEX);
    write(
        root,
        "src/assets/styles/main.scss",
        "@import 'vars';\n\n// cards\n.card {\n  color: $accent;\n  & .title {\n    margin: 0px;\n  }\n}\n",
    );
    write(root, "src/assets/styles/_vars.scss", "$accent: #0000ff;\n");
    write(
        root,
        "src/assets/scripts/main.js",
        "const square = (value) => value ** 2;\nwindow.square = square;\n",
    );
    write(root, "src/assets/fonts/icons.woff", [0x77, 0x4f, 0x46, 0x46, 1, 2, 3]);
    write(root, "src/assets/images/photo.jpg", [0xff, 0xd8, 0xff, 0xe0, 9, 9]);
    write(root, "node_modules/lib/lib.css", ".lib {\n  padding: 0px;\n}\n");
    write(root, "public/favicon.ico", [0, 0, 1, 0, 42]);
    write(root, "public/robots/robots.txt", "User-agent: *\n");

    temp
}

fn context(root: &Path) -> BuildContext {
    BuildContext::with_defaults(EffectiveConfig::resolve(root, None))
}

#[tokio::test]
async fn test_build_produces_minified_output() {
    let temp = fixture();
    let root = temp.path();

    let report = pipeline::build(&context(root)).run().await.unwrap();

    let html = fs::read_to_string(root.join("dist/index.html")).unwrap();
    assert!(html.contains("<title>Pagesmith</title>"));
    assert!(html.contains("<h1>Pagesmith</h1>"));
    assert!(html.contains(r#"<link rel="stylesheet" href="assets/styles/bundle.css">"#));
    assert!(html.contains(r#"<script src="assets/scripts/bundle.js"></script>"#));
    assert!(!html.contains("build:"));
    assert!(!html.contains('\n'));

    let css = fs::read_to_string(root.join("dist/assets/styles/bundle.css")).unwrap();
    assert!(css.contains(".card .title"));
    assert!(css.contains(".lib"));
    assert!(css.contains("color:#00f") || css.contains("color:blue"));
    assert!(!css.contains('$'));
    assert!(!css.contains("@import"));
    assert!(!css.contains('\n'));

    let js = fs::read_to_string(root.join("dist/assets/scripts/bundle.js")).unwrap();
    assert!(js.contains("Math.pow"));
    assert!(!js.contains("**"));

    assert_eq!(report.task("useref").unwrap().files.len(), 3);
    assert_eq!(report.task("font").unwrap().files.len(), 1);
}

#[tokio::test]
async fn test_build_leaves_no_source_artifacts_in_output() {
    let temp = fixture();
    let root = temp.path();

    pipeline::build(&context(root)).run().await.unwrap();

    for entry in WalkDir::new(root.join("dist")) {
        let entry = entry.unwrap();
        let ext = entry.path().extension().and_then(|e| e.to_str()).unwrap_or("");
        assert_ne!(ext, "scss", "{}", entry.path().display());
    }
    assert!(!root.join("dist/assets/styles/main.css").exists());
    assert!(root.join("temp/assets/styles/main.css").exists());
    assert!(!root.join("temp/assets/styles/_vars.css").exists());
}

#[tokio::test]
async fn test_build_copies_public_and_assets_verbatim() {
    let temp = fixture();
    let root = temp.path();

    pipeline::build(&context(root)).run().await.unwrap();

    assert_eq!(
        fs::read(root.join("dist/favicon.ico")).unwrap(),
        fs::read(root.join("public/favicon.ico")).unwrap()
    );
    assert_eq!(
        fs::read_to_string(root.join("dist/robots/robots.txt")).unwrap(),
        "User-agent: *\n"
    );
    assert_eq!(
        fs::read(root.join("dist/assets/fonts/icons.woff")).unwrap(),
        fs::read(root.join("src/assets/fonts/icons.woff")).unwrap()
    );
    assert_eq!(
        fs::read(root.join("dist/assets/images/photo.jpg")).unwrap(),
        fs::read(root.join("src/assets/images/photo.jpg")).unwrap()
    );
}

#[tokio::test]
async fn test_build_removes_stale_output() {
    let temp = fixture();
    let root = temp.path();
    write(root, "dist/stale.txt", "old");
    write(root, "temp/stale.html", "old");

    pipeline::build(&context(root)).run().await.unwrap();

    assert!(!root.join("dist/stale.txt").exists());
    assert!(!root.join("temp/stale.html").exists());
    assert!(root.join("dist/index.html").exists());
}

#[tokio::test]
async fn test_clean_is_idempotent() {
    let temp = fixture();
    let root = temp.path();
    let ctx = context(root);

    pipeline::build(&ctx).run().await.unwrap();
    pipeline::clean(&ctx).run().await.unwrap();
    assert!(!root.join("dist").exists());
    assert!(!root.join("temp").exists());

    pipeline::clean(&ctx).run().await.unwrap();
}

#[tokio::test]
async fn test_failed_compile_skips_post_processing() {
    let temp = fixture();
    let root = temp.path();
    write(root, "src/assets/scripts/broken.js", "const = ;\n");

    let err = pipeline::build(&context(root)).run().await.unwrap_err();

    assert!(err.to_string().contains("broken.js"));
    assert!(!root.join("dist/index.html").exists());
    // Siblings of the failed branch still ran to completion.
    assert!(root.join("dist/favicon.ico").exists());
}

#[tokio::test]
async fn test_unresolved_reference_fails_build() {
    let temp = fixture();
    let root = temp.path();
    write(
        root,
        "src/about.html",
        "<html><head><!-- build:css assets/styles/about.css -->\
         <link rel=\"stylesheet\" href=\"assets/styles/missing.css\">\
         <!-- endbuild --></head></html>",
    );

    let err = pipeline::build(&context(root)).run().await.unwrap_err();

    assert!(matches!(
        err,
        TaskError::UnresolvedReference { ref reference, .. }
            if reference == "assets/styles/missing.css"
    ));
}

#[tokio::test]
async fn test_conflicting_bundle_keeps_first_declaration() {
    let temp = fixture();
    let root = temp.path();
    // Pages are processed in name order, so about.html declares first.
    write(
        root,
        "src/about.html",
        "<html><head><!-- build:css assets/styles/bundle.css -->\
         <link rel=\"stylesheet\" href=\"/node_modules/lib/lib.css\">\
         <!-- endbuild --></head></html>",
    );

    pipeline::build(&context(root)).run().await.unwrap();

    let css = fs::read_to_string(root.join("dist/assets/styles/bundle.css")).unwrap();
    assert!(css.contains(".lib"));
    assert!(!css.contains(".card"));
    assert!(root.join("dist/index.html").is_file());
}

#[tokio::test]
async fn test_compile_announces_written_files() {
    let temp = fixture();
    let root = temp.path();
    let (tx, mut rx) = broadcast::channel(16);
    let ctx = context(root).with_reload(Arc::new(tx));

    pipeline::compile(&ctx).run().await.unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert_eq!(events.len(), 3);
    assert!(events.contains(&ReloadEvent::inject(vec![
        "/assets/styles/main.css".to_string()
    ])));
    assert!(events.contains(&ReloadEvent::inject(vec!["/index.html".to_string()])));
}
