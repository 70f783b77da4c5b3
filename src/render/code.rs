use std::io::Write;

use crate::ast::{BlockNode, CodeBlockStyle, NodeKind, merge_segments};
use crate::error::RewriteError;
use crate::render::{DEFAULT_CODE_LANG, Emitter, PassSummary, next_line_start};

/// Re-emit `buf` with every code block wrapped in a ```` ```c++ ```` fence.
pub fn decorate_code_blocks(
    buf: &[u8],
    nodes: &[BlockNode],
    sink: impl Write,
) -> Result<PassSummary, RewriteError> {
    decorate_code_blocks_with_lang(buf, nodes, DEFAULT_CODE_LANG, sink)
}

/// Like [`decorate_code_blocks`], with a caller-chosen language tag.
///
/// The original fence lines (or indentation) are not copied: the cursor
/// jumps from wherever it was to the end of the block (past the closing
/// fence, if there is one), and a generated fence pair goes out in their
/// place. The generated fence is longer than any backtick run that opens a
/// content line, so code that itself contains a fence cannot close it.
pub fn decorate_code_blocks_with_lang(
    buf: &[u8],
    nodes: &[BlockNode],
    lang: &str,
    sink: impl Write,
) -> Result<PassSummary, RewriteError> {
    let mut em = Emitter::new(buf, sink);

    for node in nodes {
        match node.kind {
            NodeKind::CodeBlock { style } => {
                let Some(last) = node.last_segment() else {
                    log::warn!("skipping empty code block at byte {}", node.span.start);
                    continue;
                };
                let block = merge_segments(buf, &node.segments);
                let fence = fence_for(&block);
                em.emit(format!("\n\n{fence}{lang}\n").as_bytes())?;
                em.emit(&block)?;
                if !block.ends_with(b"\n") {
                    em.emit(b"\n")?;
                }
                em.emit(format!("{fence}\n").as_bytes())?;
                // the closing fence line goes with its terminator.
                let end = match style {
                    CodeBlockStyle::Fenced => {
                        next_line_start(buf, node.span.stop.max(last.stop))
                    }
                    CodeBlockStyle::Indented => last.stop,
                };
                em.skip_to(end);
            }
            NodeKind::Heading { .. }
            | NodeKind::Paragraph
            | NodeKind::List
            | NodeKind::Other => em.pass_through(node)?,
        }
    }

    em.finish(nodes.len())
}

/// A backtick fence one longer than the longest run opening any line of
/// `block`, and never shorter than three.
fn fence_for(block: &[u8]) -> String {
    let longest = block
        .split(|&b| b == b'\n' || b == b'\r')
        .map(|line| {
            line.iter()
                .skip_while(|&&b| b == b' ' || b == b'\t')
                .take_while(|&&b| b == b'`')
                .count()
        })
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}
