//! Single-pass rewriting of diff code fences in a comrak document tree.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{format_commonmark, parse_document, Arena, Options};
use patchdown_annotate::{annotate, parse_file_patch, AnnotateError};
use thiserror::Error;

use crate::config::{FenceRule, TransformConfig};

/// Outcome of one document pass.
#[derive(Debug, Default)]
pub struct TransformReport {
    /// Number of code blocks rewritten into annotated listings.
    pub rewritten: usize,
    /// Blocks that matched a rule but could not be annotated.
    pub failures: Vec<NodeFailure>,
}

impl TransformReport {
    /// True when every matching block was rewritten.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A code block that matched a rule but failed to transform.
///
/// The node itself is left in its original form; it is up to the build
/// pipeline to decide whether this fails the overall build.
#[derive(Debug)]
pub struct NodeFailure {
    /// The fence's language tag.
    pub lang: String,
    /// Why annotation failed.
    pub error: AnnotateError,
}

/// Errors produced by whole-document rewriting.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The rewritten tree could not be serialized back to CommonMark.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] std::io::Error),
}

/// Visit every code block under `root` once, in document order, and
/// rewrite the ones whose language tag matches a configured diff rule.
///
/// A matching block is overwritten in place: its info string becomes
/// `<target_tag> title="<destination path>"` and its text becomes the
/// annotated listing. A block that fails to annotate is logged, recorded
/// in the report, and left untouched; the pass always completes.
pub fn annotate_code_blocks<'a>(
    root: &'a AstNode<'a>,
    config: &TransformConfig,
) -> TransformReport {
    let mut report = TransformReport::default();

    for node in root.descendants() {
        let mut data = node.data.borrow_mut();
        let NodeValue::CodeBlock(ref mut block) = data.value else {
            continue;
        };
        if !block.fenced {
            continue;
        }

        let (lang, _meta) = split_info(&block.info);
        let Some(rule) = config.rule_for(lang) else {
            continue;
        };

        match annotate_block(&block.literal, rule) {
            Ok((info, literal)) => {
                log::debug!("rewrote `{}` block as `{}`", lang, rule.target_tag);
                block.info = info;
                block.literal = literal;
                report.rewritten += 1;
            }
            Err(error) => {
                log::warn!("leaving `{lang}` block untouched: {error}");
                report.failures.push(NodeFailure {
                    lang: lang.to_string(),
                    error,
                });
            }
        }
    }

    report
}

/// Parse `input` as CommonMark, rewrite matching fences, and serialize the
/// document back to CommonMark text.
pub fn rewrite_markdown(
    input: &str,
    config: &TransformConfig,
) -> Result<(String, TransformReport), TransformError> {
    let arena = Arena::new();
    let root = parse_document(&arena, input, &Options::default());

    let report = annotate_code_blocks(root, config);

    let mut out = Vec::new();
    format_commonmark(root, &Options::default(), &mut out)?;
    Ok((String::from_utf8_lossy(&out).into_owned(), report))
}

fn annotate_block(diff_text: &str, rule: &FenceRule) -> Result<(String, String), AnnotateError> {
    let patch = parse_file_patch(diff_text)?;
    let listing = annotate(&patch, &rule.markers())?;

    let info = format!("{} title=\"{}\"", rule.target_tag, listing.title);
    Ok((info, listing.body))
}

/// Split a fence info string into its language tag and trailing meta.
fn split_info(info: &str) -> (&str, &str) {
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => (lang, meta.trim_start()),
        None => (info, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF_FENCE: &str = r#"```diff-go
--- a/main.go
+++ b/main.go
@@ -1,2 +1,3 @@ func main() {
 func main() {
+    fmt.Println("hi")
 }
```
"#;

    #[test]
    fn test_rewrites_matching_fence() {
        let (output, report) = rewrite_markdown(DIFF_FENCE, &TransformConfig::default()).unwrap();

        assert_eq!(report.rewritten, 1);
        assert!(report.is_clean());
        assert!(output.contains("go title=\"main.go\""));
        assert!(output.contains("// highlight-next-line"));
        assert!(output.contains("    fmt.Println(\"hi\")"));
        assert!(!output.contains("diff-go"));
        assert!(!output.contains("+++ b/main.go"));
    }

    #[test]
    fn test_ignores_other_fences() {
        let doc = "```go\nfunc main() {}\n```\n";
        let (output, report) = rewrite_markdown(doc, &TransformConfig::default()).unwrap();

        assert_eq!(report.rewritten, 0);
        assert!(report.is_clean());
        assert!(output.contains("func main() {}"));
        assert!(!output.contains("title="));
    }

    #[test]
    fn test_ignores_indented_code_blocks() {
        // An indented block has no language tag to match.
        let doc = "    some indented code\n";
        let (_, report) = rewrite_markdown(doc, &TransformConfig::default()).unwrap();
        assert_eq!(report.rewritten, 0);
    }

    #[test]
    fn test_failed_block_is_left_untouched_and_pass_continues() {
        let doc = format!("```diff-go\nthis is not a diff\n```\n\n{DIFF_FENCE}");
        let (output, report) = rewrite_markdown(&doc, &TransformConfig::default()).unwrap();

        // The broken fence keeps its tag and text...
        assert!(output.contains("diff-go"));
        assert!(output.contains("this is not a diff"));
        assert!(matches!(
            report.failures.as_slice(),
            [NodeFailure {
                error: AnnotateError::MalformedDiff(_),
                ..
            }]
        ));

        // ...while the later fence is still rewritten.
        assert_eq!(report.rewritten, 1);
        assert!(output.contains("go title=\"main.go\""));
    }

    #[test]
    fn test_multi_file_diff_is_rejected() {
        let doc = r#"```diff-go
--- a/one.go
+++ b/one.go
@@ -1,1 +1,2 @@
 a
+b
--- a/two.go
+++ b/two.go
@@ -1,1 +1,2 @@
 c
+d
```
"#;
        let (output, report) = rewrite_markdown(doc, &TransformConfig::default()).unwrap();

        assert_eq!(report.rewritten, 0);
        assert!(matches!(
            report.failures.as_slice(),
            [NodeFailure {
                error: AnnotateError::MultiFileDiff { files: 2 },
                ..
            }]
        ));
        assert!(output.contains("diff-go"));
    }

    #[test]
    fn test_custom_rule() {
        let config: TransformConfig = toml::from_str(
            r##"
            [[rules]]
            diff_tag = "diff-py"
            target_tag = "python"
            comment_token = "#"
        "##,
        )
        .unwrap();

        let doc = r#"```diff-py
--- a/app.py
+++ b/app.py
@@ -1,1 +1,2 @@
 import os
+import sys
```
"#;
        let (output, report) = rewrite_markdown(doc, &config).unwrap();

        assert_eq!(report.rewritten, 1);
        assert!(output.contains("python title=\"app.py\""));
        assert!(output.contains("# highlight-next-line"));
    }

    #[test]
    fn test_split_info() {
        assert_eq!(split_info("diff-go"), ("diff-go", ""));
        assert_eq!(
            split_info("go title=\"main.go\""),
            ("go", "title=\"main.go\"")
        );
        assert_eq!(split_info(""), ("", ""));
    }
}
