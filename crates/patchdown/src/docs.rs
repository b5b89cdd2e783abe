//! Recursive markdown discovery and per-file rewriting.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use patchdown_transform::{rewrite_markdown, TransformConfig};

/// Outcome of one pass over a docs tree.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Markdown files visited.
    pub files_seen: usize,
    /// Files that contained at least one rewritable diff fence.
    pub files_changed: usize,
    /// Code blocks that matched a rule but failed to annotate.
    pub failed_blocks: usize,
}

/// Rewrite every markdown file under `docs_dir`.
///
/// With `check` set, files are analyzed but never written; the summary
/// still counts what would have changed.
pub async fn process_tree(
    docs_dir: &Path,
    config: &TransformConfig,
    check: bool,
) -> Result<RunSummary> {
    let mut files = Vec::new();
    collect_markdown_files(docs_dir, &mut files)
        .with_context(|| format!("walking {}", docs_dir.display()))?;

    let mut summary = RunSummary::default();

    for path in files {
        summary.files_seen += 1;

        let input = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;

        let (output, report) = rewrite_markdown(&input, config)
            .with_context(|| format!("rewriting {}", path.display()))?;

        summary.failed_blocks += report.failures.len();

        // Files without a matching fence are left byte-identical; the
        // serializer's formatting normalization must not churn them.
        if report.rewritten == 0 {
            log::debug!("{}: no diff fences", path.display());
            continue;
        }

        summary.files_changed += 1;
        if check {
            log::info!(
                "{}: {} block(s) pending rewrite",
                path.display(),
                report.rewritten
            );
        } else {
            tokio::fs::write(&path, output)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("{}: rewrote {} block(s)", path.display(), report.rewritten);
        }
    }

    Ok(summary)
}

/// Collect every markdown file under `dir`, sorted for stable output order.
fn collect_markdown_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_markdown_files(&path, out)?;
        } else if is_markdown(&path) {
            out.push(path);
        }
    }

    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md" | "mdx")
    )
}
