//! HTML minification.
//!
//! Whitespace between tags is collapsed, comments are dropped (conditional
//! comments survive), and inline `<style>` / `<script>` bodies go through the
//! CSS and JS minifiers. `<pre>` and `<textarea>` bodies are left untouched.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};

use crate::{CssMinifier, HtmlMinifier, JsMinifier, Result};

/// Elements whose body must never be whitespace-collapsed.
const RAW_ELEMENTS: [&str; 4] = ["script", "style", "pre", "textarea"];

/// Elements around which whitespace carries no meaning.
const BLOCK_ELEMENTS: &str = "html|head|body|title|meta|link|base|script|style|noscript|\
    div|p|ul|ol|li|dl|dt|dd|table|thead|tbody|tfoot|tr|td|th|caption|colgroup|col|\
    section|article|aside|header|footer|nav|main|figure|figcaption|form|fieldset|legend|\
    h1|h2|h3|h4|h5|h6|hr|br|blockquote|option|select|template|svg";

static RAW_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)<({})\b[^>]*>", RAW_ELEMENTS.join("|")))
        .expect("raw element pattern is valid")
});

static RAW_CLOSE: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    RAW_ELEMENTS
        .iter()
        .map(|tag| {
            let re = Regex::new(&format!(r"(?i)</{tag}\s*>")).expect("close tag pattern is valid");
            (*tag, re)
        })
        .collect()
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--(.*?)-->").expect("comment pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static AROUND_BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\s*(<(?:!doctype[^>]*|/?(?:{BLOCK_ELEMENTS})\b[^>]*)>)\s*"
    ))
    .expect("block tag pattern is valid")
});

static SCRIPT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\btype\s*=\s*["']?([^"'\s>]+)"#).expect("type pattern is valid")
});

/// Default [`HtmlMinifier`].
pub struct CollapsingHtmlMinifier {
    css: Arc<dyn CssMinifier>,
    js: Arc<dyn JsMinifier>,
}

impl CollapsingHtmlMinifier {
    pub fn new(css: Arc<dyn CssMinifier>, js: Arc<dyn JsMinifier>) -> Self {
        Self { css, js }
    }

    fn minify_raw_body(&self, path: &Path, tag: &str, open: &str, body: &str) -> Result<String> {
        if body.trim().is_empty() {
            return Ok(String::new());
        }
        match tag {
            "style" => self.css.minify(path, body),
            "script" if is_javascript(open) => self.js.minify(path, body),
            _ => Ok(body.to_string()),
        }
    }

    /// Replace every raw element body with a placeholder, scanning left to
    /// right. A raw element inside another one's body stays part of that body.
    fn extract_raw_bodies(&self, path: &Path, source: &str) -> Result<(String, Vec<String>)> {
        let mut html = String::with_capacity(source.len());
        let mut preserved = Vec::new();
        let mut pos = 0;

        while let Some(caps) = RAW_OPEN.captures(&source[pos..]) {
            let Some(open) = caps.get(0) else { break };
            let tag = caps[1].to_ascii_lowercase();
            let body_start = pos + open.end();

            let close = RAW_CLOSE
                .iter()
                .find(|(name, _)| *name == tag)
                .and_then(|(_, re)| re.find(&source[body_start..]));
            let (body_end, next) = match close {
                Some(close) => (body_start + close.start(), body_start + close.end()),
                None => (source.len(), source.len()),
            };

            let body =
                self.minify_raw_body(path, &tag, open.as_str(), &source[body_start..body_end])?;
            html.push_str(&source[pos..body_start]);
            html.push_str(&placeholder(preserved.len()));
            html.push_str(&source[body_end..next]);
            preserved.push(body);
            pos = next;
        }

        html.push_str(&source[pos..]);
        Ok((html, preserved))
    }
}

impl HtmlMinifier for CollapsingHtmlMinifier {
    fn minify(&self, path: &Path, source: &str) -> Result<String> {
        // Raw bodies are swapped out for placeholders so the whitespace pass
        // cannot reach them, then restored at the end.
        let (html, preserved) = self.extract_raw_bodies(path, source)?;

        let html = COMMENT.replace_all(&html, |caps: &Captures| {
            let body = &caps[1];
            if body.starts_with("[if") || body.starts_with("<![endif]") {
                caps[0].to_string()
            } else {
                String::new()
            }
        });
        let html = WHITESPACE.replace_all(&html, " ");
        let html = AROUND_BLOCK_TAG.replace_all(&html, "$1");

        let mut html = html.trim().to_string();
        for (index, body) in preserved.iter().enumerate() {
            html = html.replacen(&placeholder(index), body, 1);
        }
        Ok(html)
    }
}

fn placeholder(index: usize) -> String {
    format!("\u{0}pagesmith:{index}\u{0}")
}

/// Scripts without a `type`, or with a JavaScript MIME type, are minified.
/// Templates, JSON and other payloads are kept as-is.
fn is_javascript(open_tag: &str) -> bool {
    match SCRIPT_TYPE.captures(open_tag) {
        None => true,
        Some(caps) => matches!(
            caps[1].to_ascii_lowercase().as_str(),
            "text/javascript" | "application/javascript" | "module"
        ),
    }
}
