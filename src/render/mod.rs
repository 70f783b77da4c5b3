//! Segment-window rewrites.
//!
//! Every rewrite walks the top-level node sequence once with a single
//! cursor into the source buffer. Untouched nodes are copied verbatim as
//! `buf[pos..segment.stop]`, which also carries along the gap bytes (blank
//! lines, link definitions) in front of them. Rewritten nodes skip their
//! source bytes and emit generated markup instead.
//!
//! The cursor only moves forward, so no byte is emitted twice.

mod admonition;
mod code;

pub use admonition::*;
pub use code::*;

use std::io::Write;

use crate::ast::BlockNode;
use crate::error::RewriteError;
use crate::parse;

/// Language tag put on every decorated code fence.
pub const DEFAULT_CODE_LANG: &str = "c++";

/// Headings at this level or deeper become admonitions. The guidelines use
/// level 5 but a handful are mistyped as level 4.
pub const DEFAULT_ADMONITION_MIN_LEVEL: u8 = 4;

/// Options that control the annotated output.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    pub code_lang: String,
    pub admonition_min_level: u8,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            code_lang: DEFAULT_CODE_LANG.to_string(),
            admonition_min_level: DEFAULT_ADMONITION_MIN_LEVEL,
        }
    }
}

/// What a finished pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    /// Number of nodes visited; always the length of the node sequence.
    pub nodes_visited: usize,

    /// Final cursor position. Never past the end of the buffer.
    pub cursor: usize,
}

/// Forward-only cursor over the source buffer.
pub(crate) struct Emitter<'a, W: Write> {
    src: &'a [u8],
    out: W,
    pos: usize,
}

impl<'a, W: Write> Emitter<'a, W> {
    pub(crate) fn new(src: &'a [u8], out: W) -> Self {
        Self { src, out, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Emit `src[pos..stop]` and move the cursor to `stop`.
    pub(crate) fn copy_through(&mut self, stop: usize) -> Result<(), RewriteError> {
        let stop = stop.min(self.src.len());
        if stop > self.pos {
            self.out.write_all(&self.src[self.pos..stop])?;
            self.pos = stop;
        }
        Ok(())
    }

    /// Move the cursor to `stop` without emitting anything.
    pub(crate) fn skip_to(&mut self, stop: usize) {
        self.pos = self.pos.max(stop.min(self.src.len()));
    }

    /// Emit generated bytes; the cursor does not move.
    pub(crate) fn emit(&mut self, bytes: &[u8]) -> Result<(), RewriteError> {
        self.out.write_all(bytes)?;
        Ok(())
    }

    /// Verbatim copy of a node, gap bytes in front of it included.
    pub(crate) fn pass_through(&mut self, node: &BlockNode) -> Result<(), RewriteError> {
        for seg in &node.segments {
            self.copy_through(seg.stop)?;
        }
        Ok(())
    }

    /// Copy whatever follows the last node and flush.
    pub(crate) fn finish(mut self, nodes_visited: usize) -> Result<PassSummary, RewriteError> {
        self.copy_through(self.src.len())?;
        self.out.flush()?;
        Ok(PassSummary {
            nodes_visited,
            cursor: self.pos,
        })
    }
}

/// Offset just past the terminator of the line `at` falls on. An offset
/// already at the start of a line is returned as is.
pub(crate) fn next_line_start(buf: &[u8], at: usize) -> usize {
    let at = at.min(buf.len());
    match at.checked_sub(1).map(|i| buf[i]) {
        None | Some(b'\n') => return at,
        Some(b'\r') if buf.get(at) == Some(&b'\n') => return at + 1,
        Some(b'\r') => return at,
        Some(_) => {}
    }
    match buf[at..].iter().position(|&b| b == b'\n' || b == b'\r') {
        Some(i) => {
            let end = at + i;
            if buf[end] == b'\r' && buf.get(end + 1) == Some(&b'\n') {
                end + 2
            } else {
                end + 1
            }
        }
        None => buf.len(),
    }
}

/// Build the annotated single-file variant of `buf`.
///
/// Code blocks are decorated first; the result is parsed again so the
/// admonition pass sees offsets into the decorated text.
pub fn annotate(buf: &[u8], opts: &RewriteOptions) -> Result<Vec<u8>, RewriteError> {
    let nodes = parse::parse(buf)?;
    let mut decorated = Vec::with_capacity(buf.len() + buf.len() / 8);
    decorate_code_blocks_with_lang(buf, &nodes, &opts.code_lang, &mut decorated)?;

    let nodes = parse::parse(&decorated)?;
    let mut out = Vec::with_capacity(decorated.len());
    rewrite_admonitions_from_level(&decorated, &nodes, opts.admonition_min_level, &mut out)?;
    Ok(out)
}
