//! Heading selection over a parsed node sequence.

use crate::ast::{BlockNode, Segment};

/// A heading node picked out of the top-level sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    pub level: u8,
    pub node: &'a BlockNode,
}

impl Heading<'_> {
    /// The heading's inline text range, if it has any text.
    pub fn text_segment(&self) -> Option<Segment> {
        self.node.text_segment()
    }
}

/// Offset of the heading marker in front of `text`.
///
/// Walks back over `level` hashes and one space. The result is clamped to
/// `[floor, text.start]` so a cursor at `floor` never moves backwards, even
/// for setext headings or unusual spacing.
pub fn cut_index(text: Segment, level: u8, floor: usize) -> usize {
    text.start
        .saturating_sub(usize::from(level) + 1)
        .max(floor)
        .min(text.start.max(floor))
}

/// Every heading with `level <= max_level`, in document order.
///
/// The returned iterator borrows `nodes` and can be recreated at will; it
/// holds no state beyond its position.
pub fn filter_headings(nodes: &[BlockNode], max_level: u8) -> impl Iterator<Item = Heading<'_>> {
    nodes.iter().filter_map(move |node| match node.heading_level() {
        Some(level) if level <= max_level => Some(Heading { level, node }),
        _ => None,
    })
}
