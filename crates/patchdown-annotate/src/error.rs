//! Error taxonomy for diff annotation.

use thiserror::Error;

/// Errors that can occur while turning diff text into an annotated listing.
///
/// All of these are local to a single code block; callers are expected to
/// keep processing the rest of the document when one block fails.
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// The input could not be parsed into any file entry.
    #[error("malformed diff: {0}")]
    MalformedDiff(String),

    /// The diff describes more than one file; a fence annotates exactly one.
    #[error("diff describes {files} files, expected exactly one")]
    MultiFileDiff {
        /// Number of file entries found in the diff.
        files: usize,
    },

    /// A hunk header carried no `@@ ` delimiter to extract a display header from.
    #[error("unrecognized hunk header: {0}")]
    UnrecognizedHunkHeader(String),
}
