//! Render a parsed file patch as a flat annotated listing.

use crate::error::AnnotateError;
use crate::model::{ChangeKind, FilePatch, Listing, Markers};

/// Render `patch` as an annotated listing.
///
/// Each hunk contributes, in order: its display header (the text after the
/// final `@@ ` of the raw header line), a leading ellipsis block when the
/// hunk's line numbers show that source was elided before it, the hunk's
/// lines with a marker line in front of every addition and deletion, and a
/// trailing ellipsis block.
///
/// The listing is a display artifact; no line re-numbering or count
/// reconciliation is attempted.
pub fn annotate(patch: &FilePatch, markers: &Markers) -> Result<Listing, AnnotateError> {
    let mut body = String::new();

    for hunk in &patch.hunks {
        body.push_str(display_header(&hunk.header)?);
        body.push('\n');

        // Diverging start lines mean unchanged source was elided between
        // the previous hunk and this one.
        if hunk.old_start != hunk.new_start {
            push_ellipsis_block(&mut body, markers);
        }

        for change in &hunk.changes {
            match change.kind {
                ChangeKind::Addition => {
                    body.push_str(&markers.highlight);
                    body.push('\n');
                }
                ChangeKind::Deletion => {
                    body.push_str(&markers.remove);
                    body.push('\n');
                }
                ChangeKind::Context => {}
            }
            body.push_str(&change.content);
            body.push('\n');
        }

        // The listing may be incomplete past this hunk; make that explicit
        // even when the next hunk happens to be adjacent.
        push_ellipsis_block(&mut body, markers);
    }

    Ok(Listing {
        title: patch.dest_path.clone(),
        body,
    })
}

/// Everything after the final `@@ ` delimiter of a hunk header.
fn display_header(header: &str) -> Result<&str, AnnotateError> {
    header
        .rsplit_once("@@ ")
        .map(|(_, rest)| rest)
        .ok_or_else(|| AnnotateError::UnrecognizedHunkHeader(header.to_string()))
}

/// Blank line, ellipsis comment, blank line.
fn push_ellipsis_block(body: &mut String, markers: &Markers) {
    body.push('\n');
    body.push_str(&markers.ellipsis);
    body.push('\n');
    body.push('\n');
}
