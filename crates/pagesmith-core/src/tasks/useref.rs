use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pagesmith_plugins::Transformers;

use crate::context::BuildContext;
use crate::error::{Result, TaskError};
use crate::fs;
use crate::references::{self, ReferenceBlock};
use crate::task::{Task, TaskReport};

/// Post-processing of compiled pages.
///
/// Build blocks are collapsed into bundles, then every emitted file is
/// minified according to its extension. Reads the intermediate directory and
/// writes the output directory; nothing with a source-only extension ever
/// reaches the output from here.
pub struct UserefTask {
    ctx: BuildContext,
}

impl UserefTask {
    pub fn new(ctx: BuildContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Task for UserefTask {
    fn name(&self) -> &str {
        "useref"
    }

    async fn run(&self) -> Result<TaskReport> {
        let ctx = self.ctx.clone();
        super::run_blocking(self.name(), move || post_process(&ctx)).await
    }
}

fn post_process(ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    let config = &ctx.config;
    let group = config.post_process_group();
    let mut written = Vec::new();
    let mut bundles = BundleRegistry::default();

    for page in fs::enumerate(&group)? {
        let html = fs::read_to_string(&page)?;
        let rewritten = references::rewrite(&page, &html)?;
        let page_dest = group.destination_for(&page);
        let page_dir = page_dest.parent().unwrap_or(&config.output_dir);

        for block in &rewritten.blocks {
            let dest = bundle_destination(&config.output_dir, page_dir, &block.target);
            match bundles.claim(&dest, &page, &block.assets) {
                Claim::New => {}
                Claim::Duplicate => continue,
                Claim::Conflict { first_page } => {
                    tracing::warn!(
                        bundle = %dest.display(),
                        page = %page.display(),
                        first = %first_page.display(),
                        "bundle declared with different assets; keeping the first declaration"
                    );
                    continue;
                }
            }

            let bundle = concatenate(ctx, &page, block)?;
            let minified = minify_by_extension(&ctx.transformers, &dest, &bundle)?;
            fs::write(&dest, minified)?;
            tracing::debug!(
                bundle = %dest.display(),
                parts = block.assets.len(),
                "bundled"
            );
            written.push(dest);
        }

        let minified = minify_by_extension(&ctx.transformers, &page_dest, &rewritten.html)?;
        fs::write(&page_dest, minified)?;
        written.push(page_dest);
    }

    Ok(written)
}

/// Outcome of declaring a bundle target.
#[derive(Debug, PartialEq, Eq)]
enum Claim {
    New,
    /// Already emitted with the same assets.
    Duplicate,
    /// Already emitted by `first_page` with a different asset list.
    Conflict { first_page: PathBuf },
}

/// Bundles emitted so far in one run. A bundle shared by several pages is
/// emitted once.
#[derive(Debug, Default)]
struct BundleRegistry {
    emitted: HashMap<PathBuf, (PathBuf, Vec<String>)>,
}

impl BundleRegistry {
    fn claim(&mut self, dest: &Path, page: &Path, assets: &[String]) -> Claim {
        match self.emitted.get(dest) {
            Some((_, known)) if known.as_slice() == assets => Claim::Duplicate,
            Some((first_page, _)) => Claim::Conflict {
                first_page: first_page.clone(),
            },
            None => {
                self.emitted
                    .insert(dest.to_path_buf(), (page.to_path_buf(), assets.to_vec()));
                Claim::New
            }
        }
    }
}

fn concatenate(ctx: &BuildContext, page: &Path, block: &ReferenceBlock) -> Result<String> {
    let config = &ctx.config;
    let search_path = if block.search_dirs.is_empty() {
        config.reference_search_path()
    } else {
        block
            .search_dirs
            .iter()
            .map(|dir| config.root.join(dir))
            .collect()
    };

    let mut parts = Vec::with_capacity(block.assets.len());
    for asset in &block.assets {
        let path = references::resolve_reference(asset, &search_path).ok_or_else(|| {
            TaskError::UnresolvedReference {
                page: page.to_path_buf(),
                reference: asset.clone(),
            }
        })?;
        parts.push(fs::read_to_string(&path)?);
    }
    Ok(parts.join("\n"))
}

/// Targets starting with `/` are rooted at the output directory; anything
/// else is relative to the page.
fn bundle_destination(output_dir: &Path, page_dir: &Path, target: &str) -> PathBuf {
    match target.strip_prefix('/') {
        Some(rooted) => output_dir.join(rooted),
        None => page_dir.join(target),
    }
}

pub(crate) fn minify_by_extension(
    transformers: &Transformers,
    path: &Path,
    source: &str,
) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let minified = match extension.as_deref() {
        Some("js") => transformers.js_minifier.minify(path, source)?,
        Some("css") => transformers.css_minifier.minify(path, source)?,
        Some("html" | "htm") => transformers.html_minifier.minify(path, source)?,
        _ => source.to_string(),
    };
    Ok(minified)
}
