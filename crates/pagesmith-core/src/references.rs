//! Build-reference blocks in HTML pages.
//!
//! ```html
//! <!-- build:css assets/styles/vendor.css -->
//! <link rel="stylesheet" href="/node_modules/bootstrap/dist/css/bootstrap.css">
//! <!-- endbuild -->
//! <!-- build:js(src,public) assets/scripts/vendor.js -->
//! <script src="/node_modules/jquery/dist/jquery.js"></script>
//! <!-- endbuild -->
//! ```
//!
//! Each block is replaced by a single tag pointing at the block's target; the
//! referenced files are later concatenated into that target. `build:remove`
//! drops the block entirely.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TaskError};

static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<!--\s*build:(\w+)(?:\(([^)]*)\))?(?:\s+(\S+))?\s*-->(.*?)<!--\s*endbuild\s*-->",
    )
    .expect("build block pattern is valid")
});

static STYLESHEET_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link\b[^>]*?\bhref\s*=\s*["']([^"']+)["']"#)
        .expect("stylesheet pattern is valid")
});

static SCRIPT_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#)
        .expect("script pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Css,
    Js,
    Remove,
}

impl BlockKind {
    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "css" => Some(Self::Css),
            "js" => Some(Self::Js),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }
}

/// One annotated block, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceBlock {
    pub kind: BlockKind,
    /// Output path of the concatenated bundle, as written in the page.
    pub target: String,
    /// Directories from `build:js(a,b)`, replacing the default search path.
    pub search_dirs: Vec<String>,
    /// Referenced URLs, in the order they appear.
    pub assets: Vec<String>,
}

/// A page with its blocks replaced, plus the blocks themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenPage {
    pub html: String,
    pub blocks: Vec<ReferenceBlock>,
}

/// Replace every build block in `html` with a single reference tag.
pub fn rewrite(page: &Path, html: &str) -> Result<RewrittenPage> {
    let mut blocks = Vec::new();
    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for caps in BLOCK.captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&html[last..whole.start()]);
        last = whole.end();

        let kind = BlockKind::parse(&caps[1]).ok_or_else(|| TaskError::UnknownBlock {
            page: page.to_path_buf(),
            kind: caps[1].to_string(),
        })?;
        let body = &caps[4];

        if kind == BlockKind::Remove {
            continue;
        }

        let target = caps.get(3).map(|m| m.as_str().to_string()).ok_or_else(|| {
            TaskError::UnknownBlock {
                page: page.to_path_buf(),
                kind: format!("{} (missing target)", &caps[1]),
            }
        })?;
        let search_dirs = caps
            .get(2)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(str::trim)
                    .filter(|dir| !dir.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let (pattern, tag) = match kind {
            BlockKind::Css => (
                &*STYLESHEET_HREF,
                format!(r#"<link rel="stylesheet" href="{target}">"#),
            ),
            _ => (&*SCRIPT_SRC, format!(r#"<script src="{target}"></script>"#)),
        };
        let assets = pattern
            .captures_iter(body)
            .map(|c| c[1].to_string())
            .collect();

        out.push_str(&tag);
        blocks.push(ReferenceBlock {
            kind,
            target,
            search_dirs,
            assets,
        });
    }
    out.push_str(&html[last..]);

    Ok(RewrittenPage { html: out, blocks })
}

/// Locate a referenced URL in the first search directory that has it.
///
/// Query strings and fragments are ignored and a leading `/` is stripped, so
/// `/node_modules/x.css` resolves against every directory in turn.
pub fn resolve_reference(reference: &str, search_path: &[PathBuf]) -> Option<PathBuf> {
    let clean = reference
        .split(['?', '#'])
        .next()
        .unwrap_or(reference)
        .trim_start_matches('/');
    if clean.is_empty() {
        return None;
    }
    search_path
        .iter()
        .map(|dir| dir.join(clean))
        .find(|candidate| candidate.is_file())
}
