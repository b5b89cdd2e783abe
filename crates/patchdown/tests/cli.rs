use assert_cmd::cargo;
use assert_cmd::Command;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const DIFF_DOC: &str = r#"# Install

Add the greeting:

```diff-go
--- a/main.go
+++ b/main.go
@@ -1,2 +1,3 @@ func main() {
 func main() {
+    fmt.Println("hi")
 }
```

Done.
"#;

const PLAIN_DOC: &str = "# About\n\nNothing to rewrite here.\n";

fn write_doc(dir: &std::path::Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

#[test]
fn rewrites_diff_fences_in_place() {
    let td = TempDir::new().unwrap();
    write_doc(td.path(), "guide/install.md", DIFF_DOC);

    let mut cmd = Command::new(cargo::cargo_bin!("patchdown"));
    cmd.arg(td.path()).assert().success();

    let rewritten = std::fs::read_to_string(td.path().join("guide/install.md")).unwrap();
    assert!(rewritten.contains("go title=\"main.go\""));
    assert!(rewritten.contains("// highlight-next-line"));
    assert!(rewritten.contains("// ..."));
    assert!(!rewritten.contains("diff-go"));
    assert!(!rewritten.contains("+++ b/main.go"));
    // Surrounding prose survives the round trip.
    assert!(rewritten.contains("# Install"));
    assert!(rewritten.contains("Done."));
}

#[test]
fn files_without_diff_fences_are_untouched() {
    let td = TempDir::new().unwrap();
    write_doc(td.path(), "about.md", PLAIN_DOC);

    let mut cmd = Command::new(cargo::cargo_bin!("patchdown"));
    cmd.arg(td.path()).assert().success();

    let content = std::fs::read_to_string(td.path().join("about.md")).unwrap();
    assert_eq!(content, PLAIN_DOC);
}

#[test]
fn check_mode_reports_pending_rewrites_without_writing() {
    let td = TempDir::new().unwrap();
    write_doc(td.path(), "guide/install.md", DIFF_DOC);

    let mut cmd = Command::new(cargo::cargo_bin!("patchdown"));
    cmd.arg(td.path()).arg("--check").assert().failure();

    let content = std::fs::read_to_string(td.path().join("guide/install.md")).unwrap();
    assert_eq!(content, DIFF_DOC);
}

#[test]
fn check_mode_passes_on_a_clean_tree() {
    let td = TempDir::new().unwrap();
    write_doc(td.path(), "about.md", PLAIN_DOC);

    let mut cmd = Command::new(cargo::cargo_bin!("patchdown"));
    cmd.arg(td.path()).arg("--check").assert().success();
}

#[test]
fn broken_diff_fence_fails_the_run_but_keeps_the_file() {
    let td = TempDir::new().unwrap();
    let doc = "```diff-go\nnot a diff at all\n```\n";
    write_doc(td.path(), "broken.md", doc);

    let mut cmd = Command::new(cargo::cargo_bin!("patchdown"));
    cmd.arg(td.path()).assert().failure();

    let content = std::fs::read_to_string(td.path().join("broken.md")).unwrap();
    assert_eq!(content, doc);
}

#[test]
fn custom_config_rule_is_applied() {
    let td = TempDir::new().unwrap();
    write_doc(
        td.path(),
        "docs/app.md",
        r#"```diff-py
--- a/app.py
+++ b/app.py
@@ -1,1 +1,2 @@
 import os
+import sys
```
"#,
    );

    let config_path = td.path().join("patchdown.toml");
    std::fs::write(
        &config_path,
        "[[rules]]\ndiff_tag = \"diff-py\"\ntarget_tag = \"python\"\ncomment_token = \"#\"\n",
    )
    .unwrap();

    let mut cmd = Command::new(cargo::cargo_bin!("patchdown"));
    cmd.arg(td.path())
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let rewritten = std::fs::read_to_string(td.path().join("docs/app.md")).unwrap();
    assert!(rewritten.contains("python title=\"app.py\""));
    assert!(rewritten.contains("# highlight-next-line"));
}

#[test]
fn missing_docs_dir_is_an_error() {
    let td = TempDir::new().unwrap();

    let mut cmd = Command::new(cargo::cargo_bin!("patchdown"));
    cmd.arg(td.path().join("no-such-dir")).assert().failure();
}
