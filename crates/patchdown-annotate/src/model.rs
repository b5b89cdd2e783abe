//! Data structures for a single file's parsed diff and the annotated output.

use serde::{Deserialize, Serialize};

/// A parsed diff for exactly one file, ready for annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePatch {
    /// Path the diff was computed against (old side).
    pub source_path: String,
    /// Path the changes apply to; becomes the listing title.
    pub dest_path: String,
    /// Change hunks in diff order.
    pub hunks: Vec<Hunk>,
}

/// A contiguous region of changes (hunk).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hunk {
    /// Raw marker line (e.g., `@@ -10,5 +10,7 @@ fn example()`).
    pub header: String,
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in the old version.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in the new version.
    pub new_count: u32,
    /// Lines in this hunk, in diff order.
    pub changes: Vec<Change>,
}

impl Hunk {
    /// Create a hunk with a bare `@@` header.
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            header: format!(
                "@@ -{},{} +{},{} @@",
                old_start, old_count, new_start, new_count
            ),
            old_start,
            old_count,
            new_start,
            new_count,
            changes: Vec::new(),
        }
    }

    /// Create a hunk whose header carries a trailing section context.
    pub fn with_section(
        old_start: u32,
        old_count: u32,
        new_start: u32,
        new_count: u32,
        section: &str,
    ) -> Self {
        Self {
            header: format!(
                "@@ -{},{} +{},{} @@ {}",
                old_start, old_count, new_start, new_count, section
            ),
            old_start,
            old_count,
            new_start,
            new_count,
            changes: Vec::new(),
        }
    }
}

/// A single line in a hunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    /// Line type.
    pub kind: ChangeKind,
    /// Line content (without the leading +/-/space marker).
    pub content: String,
}

impl Change {
    /// Create a new context line.
    pub fn context(content: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Context,
            content: content.into(),
        }
    }

    /// Create a new addition line.
    pub fn addition(content: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Addition,
            content: content.into(),
        }
    }

    /// Create a new deletion line.
    pub fn deletion(content: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Deletion,
            content: content.into(),
        }
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Unchanged line carried for context.
    Context,
    /// Added line (+).
    Addition,
    /// Removed line (-).
    Deletion,
}

/// Sentinel lines understood by the downstream renderer.
///
/// A marker line is inserted immediately before the line it describes;
/// the ellipsis marker stands in for an elided span of unchanged source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Line inserted before an added line.
    pub highlight: String,
    /// Line inserted before a removed line.
    pub remove: String,
    /// Comment line standing in for an elided span.
    pub ellipsis: String,
}

impl Markers {
    /// Markers built from a line-comment token (`//`, `#`, `--`, ...).
    pub fn for_comment_token(token: &str) -> Self {
        Self {
            highlight: format!("{token} highlight-next-line"),
            remove: format!("{token} remove-next-line"),
            ellipsis: format!("{token} ..."),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::for_comment_token("//")
    }
}

/// Annotator output for one code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Display title, taken from the destination path.
    pub title: String,
    /// The annotated listing text.
    pub body: String,
}
