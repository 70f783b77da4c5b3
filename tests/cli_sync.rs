use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const GUIDE: &str = "\
# <a name=\"main\"></a>Guidelines

Abstract.

## <a name=\"S-intro\"></a>In: Introduction

Read this first.

##### Reason

It helps.

## <a name=\"S-philosophy\"></a>P: Philosophy

    int x = 1;
";

#[test]
fn sync_uses_cached_source_and_writes_outputs() {
    let dir = tempdir().unwrap();

    // provide a cached source so the tool does not try to hit the network.
    fs::write(dir.path().join("guide.md"), GUIDE).unwrap();

    let mut cmd = cargo_bin_cmd!("guide2md");
    cmd.current_dir(dir.path())
        .arg("sync")
        .args(["--source", "http://127.0.0.1:9/unused.md"])
        .args(["--cache", "guide.md"])
        .args(["--out", "sections/en"])
        .args(["--annotated", "site/guide.md"])
        .args(["--json", "debug/nodes.json"]);

    cmd.assert().success();

    let sections = dir.path().join("sections").join("en");
    assert_eq!(fs::read_to_string(sections.join("empty.md")).unwrap(), "");
    assert_eq!(
        fs::read_to_string(sections.join("Guidelines.md")).unwrap(),
        "# <a name=\"main\"></a>Guidelines\n\nAbstract.\n\n"
    );
    let intro = fs::read_to_string(sections.join("In_-Introduction.md")).unwrap();
    assert!(intro.starts_with("## <a name=\"S-intro\"></a>In: Introduction"), "{intro}");
    assert!(intro.contains("##### Reason"), "{intro}");

    // the last section is never written.
    assert!(!sections.join("P_-Philosophy.md").exists());

    let annotated = fs::read_to_string(dir.path().join("site").join("guide.md")).unwrap();
    assert!(annotated.contains("!!! info \"Reason\"\n\nIt helps."), "{annotated}");
    assert!(annotated.contains("```c++\nint x = 1;\n```\n"), "{annotated}");

    let json = fs::read_to_string(dir.path().join("debug").join("nodes.json")).unwrap();
    let file: guide2md::ast::NodeFile = serde_json::from_str(&json).unwrap();
    assert_eq!(file.source.byte_len, GUIDE.len());
    assert!(!file.nodes.is_empty());
}

#[test]
fn sync_lang_flag_changes_fence_tag() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("guide.md"), GUIDE).unwrap();

    let mut cmd = cargo_bin_cmd!("guide2md");
    cmd.current_dir(dir.path())
        .args(["sync", "--cache", "guide.md", "--lang", "cpp"]);

    cmd.assert().success();

    let annotated =
        fs::read_to_string(dir.path().join("CppCoreGuidelines.annotated.md")).unwrap();
    assert!(annotated.contains("```cpp\nint x = 1;\n```"), "{annotated}");
    assert!(dir.path().join("sections").join("en").join("Guidelines.md").exists());
}

#[test]
fn sync_fails_when_source_cannot_be_fetched() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("guide2md");
    cmd.current_dir(dir.path())
        .args(["sync", "--cache", "missing.md", "--source", "ftp://example.invalid/x.md"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unsupported URL scheme"));
    assert!(!dir.path().join("missing.md").exists());
}

#[test]
fn sync_fails_on_non_utf8_source() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("guide.md"), [b'#', b' ', 0xff, b'\n']).unwrap();

    let mut cmd = cargo_bin_cmd!("guide2md");
    cmd.current_dir(dir.path()).args(["sync", "--cache", "guide.md"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn help_lists_sync() {
    let mut cmd = cargo_bin_cmd!("guide2md");
    cmd.arg("help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sync"));
}
