//! Regression inputs that once tripped a pass or sit on an edge of the
//! segment model.

use guide2md::ast::*;
use guide2md::error::ParseError;
use guide2md::{parse, render, split};

fn annotate(src: &str) -> String {
    let out = render::annotate(src.as_bytes(), &render::RewriteOptions::default())
        .unwrap_or_else(|e| panic!("annotate failed on {src:?}: {e}"));
    String::from_utf8(out).unwrap()
}

#[test]
fn empty_document() {
    let nodes = parse::parse(b"").unwrap();
    assert!(nodes.is_empty());

    let mut sections: Vec<(String, Vec<u8>)> = Vec::new();
    let cursor = split::split_sections(b"", &nodes, &mut sections).unwrap();
    assert_eq!(cursor, 0);
    assert!(sections.is_empty());

    assert_eq!(annotate(""), "");
}

#[test]
fn lone_heading_is_never_written() {
    let src = b"# Only\n";
    let nodes = parse::parse(src).unwrap();
    let mut sections: Vec<(String, Vec<u8>)> = Vec::new();
    split::split_sections(src, &nodes, &mut sections).unwrap();

    // the leading section closes; the heading's own section runs to the end.
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].0, "empty.md");
    assert!(sections[0].1.is_empty());
}

#[test]
fn unclosed_fence_runs_to_end() {
    let src = "Intro.\n\n```\nint x;\nint y;\n";
    let nodes = parse::parse(src.as_bytes()).unwrap();
    let code = nodes
        .iter()
        .find(|n| matches!(n.kind, NodeKind::CodeBlock { .. }))
        .unwrap();
    assert_eq!(code.segments.len(), 2);

    let out = annotate(src);
    assert!(out.contains("```c++\nint x;\nint y;\n```\n"), "{out}");
    assert_eq!(out.matches("```").count(), 2, "{out}");
}

#[test]
fn crlf_document() {
    let src = "# Title\r\n\r\n##### Reason\r\n\r\nBecause.\r\n";
    let nodes = parse::parse(src.as_bytes()).unwrap();
    let heading = &nodes[0];
    let text = heading.text_segment().unwrap();
    assert_eq!(&src[text.start..text.stop], "Title");

    let out = annotate(src);
    assert!(out.contains("!!! info \"Reason\""), "{out}");
    assert!(out.contains("Because.\r\n"), "{out}");
}

#[test]
fn bare_carriage_returns_do_not_overlap() {
    // `\r` alone ends a line; the code block must not reach back into the heading.
    let src = "# h\r    code\n";
    let nodes = parse::parse(src.as_bytes()).unwrap();
    let mut prev_stop = 0;
    for seg in nodes.iter().flat_map(|n| &n.segments) {
        assert!(seg.start >= prev_stop, "{seg:?}");
        prev_stop = seg.stop;
    }
    annotate(src);
}

#[test]
fn heading_without_text_is_left_alone() {
    let src = "##\n\nBody.\n\n#####\n\nMore.\n";
    let out = parse::parse_document(src.as_bytes()).unwrap();
    assert!(
        out.diagnostics
            .iter()
            .any(|d| d.code == "markdown.heading.empty")
    );

    let mut sections: Vec<(String, Vec<u8>)> = Vec::new();
    let cursor = split::split_sections(src.as_bytes(), &out.nodes, &mut sections).unwrap();
    assert!(sections.is_empty());
    assert_eq!(cursor, 0);

    assert_eq!(annotate(src), src);
}

#[test]
fn non_utf8_is_a_parse_error() {
    let err = parse::parse(b"# ok\n\xff\xfe\n").unwrap_err();
    assert!(
        matches!(err, ParseError::InvalidUtf8 { valid_up_to: 5 }),
        "{err:?}"
    );

    let err = render::annotate(b"\xc3", &render::RewriteOptions::default()).unwrap_err();
    assert!(err.to_string().contains("not valid UTF-8"), "{err}");
}

#[test]
fn node_file_round_trips_through_json() {
    let src = "# T\n\n```cpp\nx;\n```\n\n- a\n";
    let parsed = parse::parse_document(src.as_bytes()).unwrap();
    let file = NodeFile {
        schema_version: SCHEMA_VERSION,
        parser: ParserInfo::default(),
        source: SourceInfo {
            path: Some("guide.md".to_string()),
            byte_len: src.len(),
        },
        diagnostics: parsed.diagnostics,
        nodes: parsed.nodes,
    };

    let json = serde_json::to_string_pretty(&file).unwrap();
    assert!(json.contains("\"type\": \"code_block\""), "{json}");
    let back: NodeFile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, file);
}
