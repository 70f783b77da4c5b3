//! Markdown -> flat block sequence.
//!
//! The heavy lifting is done by `pulldown-cmark`; this layer only keeps the
//! document root's immediate children and records, for each, the byte
//! segments the rewrites need:
//! - headings: the inline text (markers stripped),
//! - code blocks: each content line (fences and indentation stripped),
//! - everything else: each physical line.
//!
//! Nested content is not flattened. Headings and code blocks that matter to
//! the rewrites only ever appear at the top level.

mod util;

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::ast::*;
use crate::error::ParseError;

/// Result of parsing a document.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub nodes: Vec<BlockNode>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a markdown buffer into its top-level blocks.
pub fn parse(buf: &[u8]) -> Result<Vec<BlockNode>, ParseError> {
    Ok(parse_document(buf)?.nodes)
}

/// Parse a markdown buffer, keeping soft diagnostics for degenerate blocks.
///
/// Segments are byte offsets into `buf`.
pub fn parse_document(buf: &[u8]) -> Result<ParseOutput, ParseError> {
    let src = std::str::from_utf8(buf).map_err(|e| ParseError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })?;

    let mut diagnostics = Vec::new();
    let mut nodes = Vec::new();
    let mut depth: usize = 0;

    for (event, range) in Parser::new_ext(src, Options::ENABLE_TABLES).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    // a block never reaches back into the one before it.
                    let floor = nodes.last().map_or(0, |n: &BlockNode| n.span.stop);
                    nodes.push(build_node(src, &tag, range, floor, &mut diagnostics));
                }
                depth += 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            // leaf events at the root: thematic breaks and the like.
            _ if depth == 0 => nodes.push(other_node(src, range)),
            _ => {}
        }
    }

    check_order(&nodes, buf.len())?;
    Ok(ParseOutput { nodes, diagnostics })
}

fn build_node(
    src: &str,
    tag: &Tag<'_>,
    range: Range<usize>,
    floor: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> BlockNode {
    let span = Segment::new(range.start, range.end);
    let first_line = util::line_start(src, range.start).max(floor);
    match tag {
        Tag::Heading { level, .. } => {
            let lines = util::lines_in(src, first_line, range.end);
            let segments = match lines
                .first()
                .and_then(|line| util::atx_heading_text(src, *line))
            {
                Some(text) => text.into_iter().collect(),
                None => util::setext_heading_text(src, &lines),
            };
            if segments.is_empty() {
                diagnostics.push(Diagnostic::warning(
                    "markdown.heading.empty",
                    "heading has no text",
                    span,
                ));
            }
            BlockNode {
                span,
                kind: NodeKind::Heading {
                    level: heading_level_to_u8(*level),
                },
                segments,
            }
        }
        Tag::CodeBlock(kind) => {
            let lines = util::lines_in(src, first_line, range.end);
            let (style, segments) = match kind {
                CodeBlockKind::Fenced(_) => (
                    CodeBlockStyle::Fenced,
                    util::fenced_code_segments(src, &lines),
                ),
                CodeBlockKind::Indented => (
                    CodeBlockStyle::Indented,
                    util::indented_code_segments(src, &lines),
                ),
            };
            if segments.is_empty() {
                diagnostics.push(Diagnostic::warning(
                    "markdown.code_block.empty",
                    "code block has no content",
                    span,
                ));
            }
            BlockNode {
                span,
                kind: NodeKind::CodeBlock { style },
                segments,
            }
        }
        Tag::Paragraph => line_node(src, NodeKind::Paragraph, range),
        Tag::List(_) => line_node(src, NodeKind::List, range),
        _ => other_node(src, range),
    }
}

fn other_node(src: &str, range: Range<usize>) -> BlockNode {
    line_node(src, NodeKind::Other, range)
}

fn line_node(src: &str, kind: NodeKind, range: Range<usize>) -> BlockNode {
    let lines = util::lines_in(src, range.start, range.end);
    BlockNode {
        span: Segment::new(range.start, range.end),
        kind,
        segments: util::line_segments(&lines),
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Segments must be in bounds, ordered within a node, and must not overlap
/// across consecutive nodes. Gaps are fine.
fn check_order(nodes: &[BlockNode], len: usize) -> Result<(), ParseError> {
    let mut prev_stop = 0;
    for (index, node) in nodes.iter().enumerate() {
        for seg in &node.segments {
            if seg.start < prev_stop || seg.stop > len || seg.start > seg.stop {
                return Err(ParseError::Overlap { index });
            }
            prev_stop = seg.stop;
        }
    }
    Ok(())
}
