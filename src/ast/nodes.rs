use crate::ast::Segment;
use serde::{Deserialize, Serialize};

/// One top-level block of the parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockNode {
    /// Span covering the whole block, markers included.
    pub span: Segment,

    #[serde(flatten)]
    pub kind: NodeKind,

    /// Content ranges owned by the block, in source order.
    ///
    /// For headings the first segment is the inline text; for code blocks
    /// each segment is one content line.
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// Block-level node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Heading {
        /// Heading level (1..=6).
        level: u8,
    },

    CodeBlock {
        style: CodeBlockStyle,
    },

    Paragraph,

    List,

    /// Block quotes, HTML blocks, tables, thematic breaks and anything else
    /// the rewrites pass through untouched.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeBlockStyle {
    /// ```` ``` ```` or `~~~` delimited.
    Fenced,
    /// Lines indented by four or more columns.
    Indented,
}

impl BlockNode {
    /// The heading level, if this node is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Heading { level } => Some(level),
            _ => None,
        }
    }

    /// The segment holding a heading's inline text.
    pub fn text_segment(&self) -> Option<Segment> {
        self.segments.first().copied()
    }

    pub fn last_segment(&self) -> Option<Segment> {
        self.segments.last().copied()
    }
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Heading { .. } => "heading",
            NodeKind::CodeBlock { .. } => "code block",
            NodeKind::Paragraph => "paragraph",
            NodeKind::List => "list",
            NodeKind::Other => "block",
        }
    }
}
