//! AFL++ fuzz target for `guide2md`.
//!
//! This binary is intentionally stdin-driven, so it can be used with AFL++.
//! Build and run it via `cargo-afl`:
//!
//! ```bash
//! cargo install cargo-afl
//!
//! cargo afl build --release --features afl_fuzz --bin guide2md_afl_parse
//!
//! mkdir -p fuzz/afl/out
//!
//! cargo afl fuzz \
//!   -i fuzz/afl/in \
//!   -o fuzz/afl/out \
//!   target/release/guide2md_afl_parse
//! ```
//!
//! Rust panics normally unwind and exit with a non-crashing status code.
//! AFL++ only treats crashes as signals/aborts. We therefore catch any unwind
//! and turn it into `abort()`.

use std::io::Read;

use guide2md::ast::*;
use guide2md::{parse, render, split};

const MAX_INPUT_LEN: usize = 1_000_000; // 1MB guardrail; AFL++ will typically cap this anyway.

fn check_nodes(nodes: &[BlockNode], len: usize) {
    let mut prev_stop = 0;
    for n in nodes {
        assert!(n.span.start <= n.span.stop, "invalid span: {:?}", n.span);
        assert!(n.span.stop <= len, "span out of bounds (len={len}): {:?}", n.span);
        for s in &n.segments {
            assert!(s.start <= s.stop, "invalid segment: {s:?}");
            assert!(s.stop <= len, "segment out of bounds (len={len}): {s:?}");
            assert!(s.start >= prev_stop, "segment overlaps previous: {s:?}");
            prev_stop = s.stop;
        }
    }
}

fn run_one_input(data: &[u8]) {
    if data.len() > MAX_INPUT_LEN {
        // guardrail: avoid pathological OOM / quadratic behavior on enormous inputs.
        return;
    }

    // arbitrary bytes are allowed to fail parsing, never to panic.
    let Ok(out) = parse::parse_document(data) else {
        return;
    };

    // invariants that must hold for any input that parses:
    // - segments never go out of bounds or overlap
    // - every pass visits every node and keeps its cursor in bounds
    check_nodes(&out.nodes, data.len());

    let mut sink: Vec<(String, Vec<u8>)> = Vec::new();
    let cursor = split::split_sections(data, &out.nodes, &mut sink).unwrap();
    assert!(cursor <= data.len());
    let joined: Vec<u8> = sink.into_iter().flat_map(|(_, bytes)| bytes).collect();
    assert_eq!(joined, &data[..cursor]);

    let mut decorated = Vec::new();
    let summary = render::decorate_code_blocks(data, &out.nodes, &mut decorated).unwrap();
    assert_eq!(summary.nodes_visited, out.nodes.len());
    assert!(summary.cursor <= data.len());

    let mut rewritten = Vec::new();
    let summary = render::rewrite_admonitions(data, &out.nodes, &mut rewritten).unwrap();
    assert_eq!(summary.nodes_visited, out.nodes.len());
    assert!(summary.cursor <= data.len());

    // the two-pass driver re-parses its own output; that must never fail.
    render::annotate(data, &render::RewriteOptions::default()).unwrap();

    // JSON round-trip must never panic.
    let json = serde_json::to_vec(&out.nodes).unwrap();
    let back: Vec<BlockNode> = serde_json::from_slice(&json).unwrap();
    assert_eq!(back, out.nodes);
}

fn main() {
    let mut data = Vec::new();
    std::io::stdin().read_to_end(&mut data).unwrap();

    // convert any panic into an abort().
    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}
