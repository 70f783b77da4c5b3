use std::fmt;
use std::io::Write;

use crate::ast::{BlockNode, NodeKind};
use crate::error::RewriteError;
use crate::headings::cut_index;
use crate::render::{DEFAULT_ADMONITION_MIN_LEVEL, Emitter, PassSummary};

/// Callout style tags understood by mkdocs-material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmonitionStyle {
    Info,
    Success,
    Failure,
    Example,
    Tip,
    Quote,
    Warning,
    Note,
}

impl AdmonitionStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmonitionStyle::Info => "info",
            AdmonitionStyle::Success => "success",
            AdmonitionStyle::Failure => "failure",
            AdmonitionStyle::Example => "example",
            AdmonitionStyle::Tip => "tip",
            AdmonitionStyle::Quote => "quote",
            AdmonitionStyle::Warning => "warning",
            AdmonitionStyle::Note => "note",
        }
    }
}

impl fmt::Display for AdmonitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a sub-heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admonition {
    pub style: AdmonitionStyle,

    /// Whether the body would be indented under the callout. Computed but
    /// not applied by [`rewrite_admonitions`].
    pub indent: bool,
}

/// Pick a callout style from a heading's text. First matching rule wins;
/// anything unrecognised ("See also", "Alternative", ...) is a note.
pub fn classify(text: &str) -> Admonition {
    let (style, indent) = if text.contains("Reason") {
        (AdmonitionStyle::Info, true)
    } else if text.contains("Example") {
        if text.contains(", good") {
            (AdmonitionStyle::Success, false)
        } else if text.contains(", bad") {
            (AdmonitionStyle::Failure, false)
        } else {
            (AdmonitionStyle::Example, false)
        }
    } else if text.contains("Enforcement") {
        (AdmonitionStyle::Tip, true)
    } else if text.contains("Discussion") {
        (AdmonitionStyle::Quote, true)
    } else if text.contains("Exception") {
        (AdmonitionStyle::Warning, true)
    } else {
        (AdmonitionStyle::Note, false)
    };
    Admonition { style, indent }
}

/// The generated header line, `!!! <style> "<text>"`, without a newline.
pub fn admonition_header(text: &str) -> String {
    format!("!!! {} \"{}\"", classify(text).style, text)
}

/// Re-emit `buf` with level 4+ headings replaced by admonition headers.
pub fn rewrite_admonitions(
    buf: &[u8],
    nodes: &[BlockNode],
    sink: impl Write,
) -> Result<PassSummary, RewriteError> {
    rewrite_admonitions_from_level(buf, nodes, DEFAULT_ADMONITION_MIN_LEVEL, sink)
}

/// Like [`rewrite_admonitions`], with a caller-chosen minimum heading level.
///
/// The heading marker and text are replaced; anything on the heading line
/// after the text segment (a closing `##` sequence, trailing spaces) is
/// dropped with them.
pub fn rewrite_admonitions_from_level(
    buf: &[u8],
    nodes: &[BlockNode],
    min_level: u8,
    sink: impl Write,
) -> Result<PassSummary, RewriteError> {
    let mut em = Emitter::new(buf, sink);

    for node in nodes {
        match node.kind {
            NodeKind::Heading { level } if level >= min_level => {
                let Some(text) = node.text_segment() else {
                    let err = RewriteError::MalformedSegment {
                        kind: node.kind.name(),
                        offset: node.span.start,
                    };
                    log::warn!("leaving heading as is: {err}");
                    continue;
                };
                let cut = cut_index(text, level, em.pos());
                em.copy_through(cut)?;
                let header = admonition_header(&String::from_utf8_lossy(text.slice(buf)));
                em.emit(header.as_bytes())?;
                em.skip_to(line_end(buf, text.stop));
            }
            NodeKind::Heading { .. }
            | NodeKind::CodeBlock { .. }
            | NodeKind::Paragraph
            | NodeKind::List
            | NodeKind::Other => em.pass_through(node)?,
        }
    }

    em.finish(nodes.len())
}

/// Offset of the line terminator at or after `from`.
fn line_end(buf: &[u8], from: usize) -> usize {
    buf[from..]
        .iter()
        .position(|&b| b == b'\n' || b == b'\r')
        .map_or(buf.len(), |i| from + i)
}
