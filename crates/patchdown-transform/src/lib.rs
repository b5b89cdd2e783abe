//! # patchdown-transform
//!
//! Walks a markdown document tree and rewrites fenced code blocks that
//! contain unified-diff text into annotated source listings, using
//! [`patchdown_annotate`] for the listing itself.
//!
//! The transform is a single synchronous pass over the tree: each matching
//! block is parsed, annotated, and overwritten in place. A block that fails
//! to annotate is left untouched and recorded in the pass report; it never
//! aborts the rest of the document.
//!
//! ## Usage
//!
//! ```
//! use patchdown_transform::{rewrite_markdown, TransformConfig};
//!
//! let doc = "```diff-go\n--- a/main.go\n+++ b/main.go\n@@ -1,1 +1,2 @@\n package main\n+import \"fmt\"\n```\n";
//!
//! let (output, report) = rewrite_markdown(doc, &TransformConfig::default())?;
//! assert_eq!(report.rewritten, 1);
//! assert!(output.contains("title=\"main.go\""));
//! # Ok::<(), patchdown_transform::TransformError>(())
//! ```

pub mod config;
pub mod visitor;

pub use config::{ConfigError, FenceRule, TransformConfig};
pub use visitor::{
    annotate_code_blocks, rewrite_markdown, NodeFailure, TransformError, TransformReport,
};
