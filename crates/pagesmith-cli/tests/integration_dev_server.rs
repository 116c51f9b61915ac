//! Integration tests for the preview server and change dispatch.

mod common;

use pagesmith_cli::dev::{DevServerState, FileChange, Orchestrator, SharedState, server};
use pagesmith_config::{AssetClass, EffectiveConfig};
use pagesmith_core::{BuildContext, ReloadSink, WatchAction, pipeline};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::Receiver;
use tokio::time::{Duration, timeout};

fn dev_context(root: &Path) -> (BuildContext, SharedState) {
    let config = Arc::new(EffectiveConfig::resolve(root, None));
    let state = Arc::new(DevServerState::new(Arc::clone(&config)));
    let sink: Arc<dyn ReloadSink> = state.clone();
    let ctx = BuildContext::with_defaults(config).with_reload(sink);
    (ctx, state)
}

async fn next_message(rx: &mut Receiver<String>) -> String {
    timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("no event within timeout")
        .expect("client channel closed")
}

async fn start_server(state: SharedState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(listener, state));
    addr
}

async fn get(addr: SocketAddr, path: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let text = String::from_utf8_lossy(&raw).to_string();

    let status = text[9..12].parse().unwrap();
    let body = text
        .split_once("\r\n\r\n")
        .map(|(_, body)| body.to_string())
        .unwrap_or_default();
    (status, body)
}

#[tokio::test]
async fn test_style_change_reruns_only_style_task() {
    let temp = common::project();
    let root = temp.path();
    let (ctx, state) = dev_context(root);
    let (_id, mut rx) = state.register_client();
    let orchestrator = Orchestrator::new(&ctx, Arc::clone(&state));

    let action = orchestrator.handle(&FileChange::Modified(
        ctx.config.source_dir.join("assets/styles/main.scss"),
    ));
    assert_eq!(action, WatchAction::Run(AssetClass::Styles));

    let message = next_message(&mut rx).await;
    assert!(message.contains(r#""type":"inject""#), "{message}");
    assert!(message.contains("/assets/styles/main.css"), "{message}");

    assert!(root.join("temp/assets/styles/main.css").is_file());
    assert!(!root.join("temp/index.html").exists());
    assert!(!root.join("temp/assets/scripts/main.js").exists());
}

#[tokio::test]
async fn test_image_change_requests_full_reload() {
    let temp = common::project();
    let (ctx, state) = dev_context(temp.path());
    let (_id, mut rx) = state.register_client();
    let orchestrator = Orchestrator::new(&ctx, Arc::clone(&state));

    let action = orchestrator.handle(&FileChange::Created(
        ctx.config.source_dir.join("assets/images/logo.svg"),
    ));

    assert_eq!(action, WatchAction::Reload);
    assert_eq!(next_message(&mut rx).await, r#"{"type":"fullReload"}"#);
}

#[tokio::test]
async fn test_failed_rerun_is_broadcast() {
    let temp = common::project();
    let root = temp.path();
    let (ctx, state) = dev_context(root);
    let (_id, mut rx) = state.register_client();
    let orchestrator = Orchestrator::new(&ctx, Arc::clone(&state));

    common::write(root, "src/assets/scripts/main.js", "let = ;\n");
    orchestrator.handle(&FileChange::Modified(
        ctx.config.source_dir.join("assets/scripts/main.js"),
    ));

    let message = next_message(&mut rx).await;
    assert!(message.contains(r#""type":"buildFailed""#), "{message}");
    assert!(message.contains(r#""task":"script""#), "{message}");

    // Watching continues: a fixed file compiles again.
    common::write(root, "src/assets/scripts/main.js", "window.ok = 1;\n");
    orchestrator.handle(&FileChange::Modified(
        ctx.config.source_dir.join("assets/scripts/main.js"),
    ));
    let message = next_message(&mut rx).await;
    assert!(message.contains("/assets/scripts/main.js"), "{message}");
}

#[tokio::test]
async fn test_rapid_saves_end_with_latest_content() {
    let temp = common::project();
    let root = temp.path();
    let (ctx, state) = dev_context(root);
    let orchestrator = Orchestrator::new(&ctx, Arc::clone(&state));
    let source = ctx.config.source_dir.join("assets/styles/main.scss");
    let output = root.join("temp/assets/styles/main.css");

    // Truncate, then write: each step reports a change.
    common::write(root, "src/assets/styles/main.scss", "");
    orchestrator.handle(&FileChange::Modified(source.clone()));
    common::write(root, "src/assets/styles/main.scss", ".final { color: red; }\n");
    orchestrator.handle(&FileChange::Modified(source));

    let landed = timeout(Duration::from_secs(10), async {
        loop {
            let css = tokio::fs::read_to_string(&output).await.unwrap_or_default();
            if css.contains(".final") {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    assert!(landed.is_ok(), "latest stylesheet was never compiled");
}

#[tokio::test]
async fn test_generated_paths_are_ignored() {
    let temp = common::project();
    let (ctx, state) = dev_context(temp.path());
    let orchestrator = Orchestrator::new(&ctx, Arc::clone(&state));

    let action = orchestrator.handle(&FileChange::Modified(
        ctx.config.intermediate_dir.join("index.html"),
    ));
    assert_eq!(action, WatchAction::Ignore);
}

#[tokio::test]
async fn test_server_resolves_preview_roots_in_order() {
    let temp = common::project();
    let root = temp.path();
    let (ctx, state) = dev_context(root);
    pipeline::compile(&ctx).run().await.unwrap();
    let addr = start_server(state).await;

    // Compiled page from the intermediate directory, with the reload client.
    let (status, body) = get(addr, "/").await;
    assert_eq!(status, 200);
    assert!(body.contains("<title>Fixture</title>"));
    assert!(body.contains(r#"<script src="/__pagesmith_reload__.js"></script></body>"#));

    // Compiled stylesheet, not the source.
    let (status, body) = get(addr, "/assets/styles/main.css").await;
    assert_eq!(status, 200);
    assert!(body.contains(".hero .title"));

    // Falls through to the source directory, then to public.
    let (status, _) = get(addr, "/assets/images/logo.svg").await;
    assert_eq!(status, 200);
    let (status, _) = get(addr, "/favicon.ico").await;
    assert_eq!(status, 200);

    let (status, body) = get(addr, "/node_modules/lib/lib.css").await;
    assert_eq!(status, 200);
    assert!(body.contains(".lib"));

    common::write(root, "public/my page.txt", "spaced");
    let (status, body) = get(addr, "/my%20page.txt").await;
    assert_eq!(status, 200);
    assert_eq!(body, "spaced");

    let (status, _) = get(addr, "/missing.html").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_server_serves_reload_client() {
    let temp = common::project();
    let (_ctx, state) = dev_context(temp.path());
    let addr = start_server(state).await;

    let (status, body) = get(addr, "/__pagesmith_reload__.js").await;
    assert_eq!(status, 200);
    assert!(body.contains("/__pagesmith_sse__"));
}
