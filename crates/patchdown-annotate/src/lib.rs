//! Diff-to-annotated-listing core.
//!
//! Parses unified diff text (one file per diff) and renders it as a flat
//! source listing in which added lines are preceded by a highlight marker
//! line, removed lines by a removal marker line, and elided spans between
//! hunks appear as explicit ellipsis comment blocks. The markers are the
//! magic comments a documentation renderer interprets
//! (`// highlight-next-line`, `// remove-next-line`).
//!
//! # Example
//!
//! ```
//! use patchdown_annotate::{annotate, parse_file_patch, Markers};
//!
//! let diff = r#"--- a/main.go
//! +++ b/main.go
//! @@ -1,2 +1,3 @@ func main() {
//!  func main() {
//! +    fmt.Println("hi")
//!  }
//! "#;
//!
//! let patch = parse_file_patch(diff)?;
//! let listing = annotate(&patch, &Markers::default())?;
//!
//! assert_eq!(listing.title, "main.go");
//! assert!(listing.body.contains("// highlight-next-line"));
//! # Ok::<(), patchdown_annotate::AnnotateError>(())
//! ```

mod annotate;
mod error;
mod model;
mod parser;

pub use annotate::annotate;
pub use error::AnnotateError;
pub use model::{Change, ChangeKind, FilePatch, Hunk, Listing, Markers};
pub use parser::parse_file_patch;
