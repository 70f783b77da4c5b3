use std::fs;
use std::path::PathBuf;
use guide2md::{parse, render, split};

fn base_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
}

#[test]
fn test_annotated_rule() {
    let in_path = base_dir().join("001-in-rule.md");
    let want_path = base_dir().join("001-want-rule.md");

    let want_bytes = fs::read(&want_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", want_path.display()));
    let want_md = String::from_utf8_lossy(&want_bytes).into_owned();

    let in_bytes =
        fs::read(&in_path).unwrap_or_else(|e| panic!("failed to read {}: {e}", in_path.display()));
    let out = render::annotate(&in_bytes, &render::RewriteOptions::default())
        .unwrap_or_else(|e| panic!("annotate failed: {e}"));
    let actual_md = String::from_utf8_lossy(&out).into_owned();

    let out_path = base_dir().join("001-out-rule.md");
    if !actual_md.eq(&want_md) {
        fs::write(&out_path, &actual_md)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", out_path.display()));
    } else if out_path.exists() {
        fs::remove_file(&out_path)
            .unwrap_or_else(|e| panic!("failed to remove {}: {e}", out_path.display()));
    }

    assert_eq!(actual_md, want_md);
}

#[test]
fn test_rule_sections() {
    let in_path = base_dir().join("001-in-rule.md");
    let src =
        fs::read(&in_path).unwrap_or_else(|e| panic!("failed to read {}: {e}", in_path.display()));
    let nodes = parse::parse(&src).unwrap();

    let mut sections: Vec<(String, Vec<u8>)> = Vec::new();
    let cursor = split::split_sections(&src, &nodes, &mut sections).unwrap();

    let names: Vec<&str> = sections.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["empty.md", "C++-Core-Guidelines.md"]);
    assert!(sections[0].1.is_empty());
    assert_eq!(
        String::from_utf8_lossy(&sections[1].1),
        "# <a name=\"main\"></a>C++ Core Guidelines\n\nIntro text.\n\n"
    );

    // the philosophy section runs to the end and stays unwritten
    assert!(src[cursor..].starts_with(b"## <a name=\"S-philosophy\">"));
}

#[test]
fn test_decorating_twice_changes_nothing_but_fences() {
    // a decorated document still parses, and its code block is now fenced
    let src = b"Text.\n\n    int x = 1;\n\nMore.\n";
    let nodes = parse::parse(src).unwrap();
    let mut once = Vec::new();
    render::decorate_code_blocks(src, &nodes, &mut once).unwrap();

    let nodes = parse::parse(&once).unwrap();
    let mut twice = Vec::new();
    render::decorate_code_blocks(&once, &nodes, &mut twice).unwrap();

    let twice = String::from_utf8(twice).unwrap();
    assert_eq!(twice.matches("int x = 1;").count(), 1, "{twice}");
    assert_eq!(twice.matches("```c++").count(), 1, "{twice}");
    assert!(twice.ends_with("\n\nMore.\n"), "{twice}");
}
