//! Section splitting at level 1 and 2 headings.
//!
//! Each section is the raw byte window from one cut to the next; nothing is
//! re-rendered. A section is named after the heading that opens it; content
//! before the first heading goes to `empty.md`.
//!
//! The section that starts at the last qualifying heading runs to the end of
//! the buffer and is never written. Callers that need it can take
//! `buf[cursor..]` from the returned cursor.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::BlockNode;
use crate::error::RewriteError;
use crate::headings::{cut_index, filter_headings};

/// Deepest heading level that starts a new section.
pub const SPLIT_MAX_LEVEL: u8 = 2;

/// Title used for whatever precedes the first heading.
pub const LEADING_SECTION_TITLE: &str = "empty";

/// Receives each section as it is cut.
pub trait SectionSink {
    fn write_section(&mut self, filename: &str, bytes: &[u8]) -> Result<(), RewriteError>;
}

/// Writes sections as files under a directory, which must already exist.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SectionSink for DirSink {
    fn write_section(&mut self, filename: &str, bytes: &[u8]) -> Result<(), RewriteError> {
        let path = self.dir.join(filename);
        fs::write(&path, bytes).map_err(|source| RewriteError::Section { path, source })
    }
}

/// Collects `(filename, bytes)` pairs in memory.
impl SectionSink for Vec<(String, Vec<u8>)> {
    fn write_section(&mut self, filename: &str, bytes: &[u8]) -> Result<(), RewriteError> {
        self.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}

/// Discard everything up to and including the first `</a>`.
///
/// Titles in the guidelines start with an anchor like `<a name="S-intro"></a>`.
pub fn drop_html(title: &str) -> &str {
    match title.find("</a>") {
        Some(idx) => &title[idx + "</a>".len()..],
        None => title,
    }
}

/// Make a title usable as a file name on any platform.
///
/// Deletes `, ( ) " '`, maps `.` to `-`, `:` to `_`, and space and `/` to `-`.
/// Applying it twice gives the same result as applying it once.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter_map(|c| match c {
            ',' | '(' | ')' | '"' | '\'' => None,
            '.' | ' ' | '/' => Some('-'),
            ':' => Some('_'),
            _ => Some(c),
        })
        .collect()
}

pub fn section_filename(title: &str) -> String {
    format!("{}.md", normalize_title(title))
}

/// Write every section of `buf` but the last into a directory.
pub fn split_sections_to_dir(
    buf: &[u8],
    nodes: &[BlockNode],
    dir: &Path,
) -> Result<usize, RewriteError> {
    split_sections(buf, nodes, &mut DirSink::new(dir))
}

/// Cut `buf` in front of every level 1 and 2 heading and hand each section to
/// `sink`.
///
/// Returns the cursor after the last cut. Any sink error aborts the pass;
/// sections already written stay written.
pub fn split_sections(
    buf: &[u8],
    nodes: &[BlockNode],
    sink: &mut impl SectionSink,
) -> Result<usize, RewriteError> {
    let mut pos: usize = 0;
    let mut pending_title = LEADING_SECTION_TITLE.to_string();

    for head in filter_headings(nodes, SPLIT_MAX_LEVEL) {
        let Some(text) = head.text_segment() else {
            let err = RewriteError::MalformedSegment {
                kind: head.node.kind.name(),
                offset: head.node.span.start,
            };
            log::warn!("skipping section cut: {err}");
            continue;
        };

        let raw = String::from_utf8_lossy(text.slice(buf));
        let title = drop_html(&raw).to_string();
        match head.level {
            1 => log::debug!("{title}"),
            _ => log::debug!("- {title}"),
        }

        let filename = section_filename(&pending_title);
        let cut = cut_index(text, head.level, pos);
        log::debug!("writing {filename} ({} bytes)", cut - pos);
        sink.write_section(&filename, &buf[pos..cut])?;

        pos = cut;
        pending_title = title;
    }

    Ok(pos)
}
