//! Parse unified diff text into a single-file patch model.

use unidiff::{Hunk as UnidiffHunk, Line as UnidiffLine, PatchSet, PatchedFile};

use crate::error::AnnotateError;
use crate::model::{Change, ChangeKind, FilePatch, Hunk};

/// Parse a unified diff into a [`FilePatch`] for its single file entry.
///
/// A diff that parses to zero file entries is malformed; one with more
/// than one entry is rejected, since a code fence annotates exactly one
/// listing.
pub fn parse_file_patch(diff_text: &str) -> Result<FilePatch, AnnotateError> {
    let mut patch_set = PatchSet::new();
    patch_set
        .parse(diff_text)
        .map_err(|e| AnnotateError::MalformedDiff(e.to_string()))?;

    let files = patch_set.files();
    match files.len() {
        0 => Err(AnnotateError::MalformedDiff(
            "no file entries found".to_string(),
        )),
        1 => Ok(parse_patched_file(&files[0])),
        n => Err(AnnotateError::MultiFileDiff { files: n }),
    }
}

fn parse_patched_file(file: &PatchedFile) -> FilePatch {
    let source = clean_path(&file.source_file);
    let target = clean_path(&file.target_file);

    // A deleted file has no usable target path; title by what was removed.
    let dest = if target == "/dev/null" || target.is_empty() {
        source.clone()
    } else {
        target
    };

    FilePatch {
        source_path: source,
        dest_path: dest,
        hunks: file.hunks().iter().map(parse_hunk).collect(),
    }
}

fn parse_hunk(hunk: &UnidiffHunk) -> Hunk {
    let mut parsed = if hunk.section_header.is_empty() {
        Hunk::new(
            hunk.source_start as u32,
            hunk.source_length as u32,
            hunk.target_start as u32,
            hunk.target_length as u32,
        )
    } else {
        Hunk::with_section(
            hunk.source_start as u32,
            hunk.source_length as u32,
            hunk.target_start as u32,
            hunk.target_length as u32,
            &hunk.section_header,
        )
    };

    for line in hunk.lines() {
        parsed.changes.push(parse_line(line));
    }

    parsed
}

fn parse_line(line: &UnidiffLine) -> Change {
    let kind = match line.line_type.as_str() {
        "+" => ChangeKind::Addition,
        "-" => ChangeKind::Deletion,
        // " " and "\ No newline at end of file"
        _ => ChangeKind::Context,
    };

    Change {
        kind,
        content: line.value.clone(),
    }
}

/// Clean the path by removing a/b prefixes from git diff output.
fn clean_path(path: &str) -> String {
    let path = path.trim();

    if let Some(stripped) = path.strip_prefix("a/") {
        return stripped.to_string();
    }
    if let Some(stripped) = path.strip_prefix("b/") {
        return stripped.to_string();
    }

    path.to_string()
}
