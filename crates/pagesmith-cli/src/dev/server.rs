//! Preview server with live reload via Server-Sent Events.
//!
//! Requests are answered from the intermediate, source and public
//! directories in that order; the first file found wins. HTML responses get
//! the reload client injected before `</body>`.

use crate::dev::{DevConfig, DevEvent, SharedState};
use crate::error::{CliError, Result, ResultExt};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response, Sse, sse::Event, sse::KeepAlive},
    routing::get,
};
use pagesmith_config::DEPENDENCY_ROUTE;
use std::convert::Infallible;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_stream::{Stream, StreamExt, wrappers::ReceiverStream};
use tower_http::services::ServeDir;

/// SSE endpoint polled by the reload client.
pub const SSE_PATH: &str = "/__pagesmith_sse__";

/// Route serving the reload client script.
pub const RELOAD_SCRIPT_PATH: &str = "/__pagesmith_reload__.js";

const RELOAD_SCRIPT: &str = include_str!("../../assets/dev/reload-client.js");

/// Development server.
pub struct DevServer {
    config: DevConfig,
    state: SharedState,
}

impl DevServer {
    pub fn new(config: DevConfig, state: SharedState) -> Self {
        Self { config, state }
    }

    /// Bind the configured address and serve until the task is dropped.
    ///
    /// # Errors
    ///
    /// Returns error if the address cannot be bound or the serve loop fails.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .context(format!("Failed to bind to {addr}"))?;

        crate::ui::success(&format!(
            "Preview server running at {}",
            self.config.server_url()
        ));
        serve(listener, self.state).await
    }
}

/// Serve the preview on an already bound listener.
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| CliError::Server(format!("Server error: {e}")))
}

/// Build the axum router with all routes.
pub fn router(state: SharedState) -> Router {
    let dependencies = ServeDir::new(&state.config().dependency_dir);

    Router::new()
        .route(SSE_PATH, get(handle_sse))
        .route(RELOAD_SCRIPT_PATH, get(handle_reload_script))
        .nest_service(DEPENDENCY_ROUTE, dependencies)
        .fallback(handle_request)
        .with_state(state)
}

/// Handle SSE connections for reload events.
async fn handle_sse(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let (id, rx) = state.register_client();
    tracing::debug!(client = id, clients = state.client_count(), "client connected");
    state.broadcast(&DevEvent::ClientConnected { id });

    let stream = ReceiverStream::new(rx).map(|data| Ok(Event::default().data(data)));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

/// Serve the reload client script.
async fn handle_reload_script() -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        RELOAD_SCRIPT,
    )
        .into_response()
}

/// Serve a file from the first preview root that has it.
async fn handle_request(State(state): State<SharedState>, uri: Uri) -> Response {
    let Some(relative) = request_path(uri.path()) else {
        return (StatusCode::BAD_REQUEST, "Invalid path").into_response();
    };

    for root in state.config().preview_roots() {
        let Some(file) = locate(&root, &relative).await else {
            continue;
        };

        return match tokio::fs::read(&file).await {
            Ok(content) => {
                let content_type = determine_content_type(&file);
                let body = if content_type.starts_with("text/html") {
                    inject_reload_script(&content)
                } else {
                    content
                };
                (
                    [
                        (header::CONTENT_TYPE, content_type),
                        (header::CACHE_CONTROL, "no-cache"),
                    ],
                    body,
                )
                    .into_response()
            }
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "failed to read file");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response()
            }
        };
    }

    (
        StatusCode::NOT_FOUND,
        format!("File not found: {}", uri.path()),
    )
        .into_response()
}

/// Map a URL path to a relative file path. The path is percent-decoded
/// first; parent-directory escapes and invalid UTF-8 are rejected.
fn request_path(url_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(url_path).ok()?;
    let url_path = decoded.as_ref();
    let trimmed = url_path.trim_start_matches('/');
    let mut relative = PathBuf::new();

    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if url_path.ends_with('/') || relative.as_os_str().is_empty() {
        relative.push("index.html");
    }
    Some(relative)
}

/// `root/relative`, or its `index.html` when it names a directory.
async fn locate(root: &Path, relative: &Path) -> Option<PathBuf> {
    let candidate = root.join(relative);
    match tokio::fs::metadata(&candidate).await {
        Ok(meta) if meta.is_file() => Some(candidate),
        Ok(meta) if meta.is_dir() => {
            let index = candidate.join("index.html");
            tokio::fs::metadata(&index)
                .await
                .is_ok_and(|meta| meta.is_file())
                .then_some(index)
        }
        _ => None,
    }
}

/// Inject the reload client before the closing `</body>` tag.
fn inject_reload_script(content: &[u8]) -> Vec<u8> {
    let html = String::from_utf8_lossy(content);
    let script_tag = format!(r#"<script src="{RELOAD_SCRIPT_PATH}"></script>"#);

    let mut result = String::with_capacity(html.len() + script_tag.len() + 1);
    match html.rfind("</body>") {
        Some(pos) => {
            result.push_str(&html[..pos]);
            result.push_str(&script_tag);
            result.push_str(&html[pos..]);
        }
        None => {
            result.push_str(&html);
            result.push_str(&script_tag);
        }
    }
    result.into_bytes()
}

/// Determine content type from file extension.
fn determine_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}
