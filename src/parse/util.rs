use crate::ast::Segment;

/// A physical source line.
///
/// `[start, end)` excludes the line terminator (`\n` or `\r\n`); `next` is the
/// offset just past the terminator (or the end of the scanned range).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line {
    pub start: usize,
    pub end: usize,
    pub next: usize,
}

/// Split `src[start..stop]` into physical lines. `\n`, `\r\n` and a bare
/// `\r` all end a line.
pub(crate) fn lines_in(src: &str, start: usize, stop: usize) -> Vec<Line> {
    let bytes = src.as_bytes();
    let stop = stop.min(bytes.len());
    let mut lines = Vec::new();
    let mut pos = start;
    while pos < stop {
        let (end, next) = match bytes[pos..stop]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
        {
            Some(i) => {
                let end = pos + i;
                let crlf = bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n');
                let next = if crlf { end + 2 } else { end + 1 };
                (end, next.min(stop))
            }
            None => (stop, stop),
        };
        lines.push(Line {
            start: pos,
            end,
            next,
        });
        pos = next;
    }
    lines
}

/// Offset of the first byte of the line containing `offset`.
pub(crate) fn line_start(src: &str, offset: usize) -> usize {
    src[..offset]
        .rfind(['\n', '\r'])
        .map_or(0, |i| i + 1)
}

fn leading_spaces(line: &[u8]) -> usize {
    line.iter().take_while(|&&b| b == b' ').count()
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t')
}

/// End offset of `line[floor..]` with trailing spaces and tabs removed.
fn trim_end(line: &[u8], floor: usize) -> usize {
    let mut end = line.len();
    while end > floor && is_blank(line[end - 1]) {
        end -= 1;
    }
    end
}

/// Number of leading bytes covering at most `cols` columns of indentation.
/// Tabs advance to the next multiple of four.
fn indent_bytes(line: &[u8], cols: usize) -> usize {
    let mut col = 0;
    let mut i = 0;
    while i < line.len() && col < cols {
        match line[i] {
            b' ' => col += 1,
            b'\t' => col = (col / 4 + 1) * 4,
            _ => break,
        }
        i += 1;
    }
    i
}

/// Inline text of an ATX heading line.
///
/// Returns `None` if the line is not an ATX heading, `Some(None)` if it is one
/// with no text (e.g. `##` alone).
pub(crate) fn atx_heading_text(src: &str, line: Line) -> Option<Option<Segment>> {
    let b = &src.as_bytes()[line.start..line.end];
    let indent = leading_spaces(b);
    if indent > 3 {
        return None;
    }
    let hashes = b[indent..].iter().take_while(|&&c| c == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let after = indent + hashes;
    if after < b.len() && !is_blank(b[after]) {
        return None;
    }

    let mut start = after;
    while start < b.len() && is_blank(b[start]) {
        start += 1;
    }
    let mut end = trim_end(b, start);

    // optional closing sequence: `## Title ##`
    let closing = b[start..end].iter().rev().take_while(|&&c| c == b'#').count();
    if closing > 0 {
        let before = end - closing;
        if before == start {
            end = start;
        } else if is_blank(b[before - 1]) {
            end = trim_end(&b[..before], start);
        }
    }

    if start >= end {
        return Some(None);
    }
    Some(Some(Segment::new(line.start + start, line.start + end)))
}

/// Text lines of a setext heading: every line but the underline, trimmed.
pub(crate) fn setext_heading_text(src: &str, lines: &[Line]) -> Vec<Segment> {
    let Some((_underline, text)) = lines.split_last() else {
        return Vec::new();
    };
    let bytes = src.as_bytes();
    text.iter()
        .filter_map(|line| {
            let b = &bytes[line.start..line.end];
            let start = b.iter().take_while(|&&c| is_blank(c)).count();
            let end = trim_end(b, start);
            (start < end).then(|| Segment::new(line.start + start, line.start + end))
        })
        .collect()
}

/// Content lines of a fenced code block, fences excluded.
///
/// Each segment keeps its line terminator. Up to the opening fence's own
/// indentation is stripped from every content line.
pub(crate) fn fenced_code_segments(src: &str, lines: &[Line]) -> Vec<Segment> {
    let Some((open, body)) = lines.split_first() else {
        return Vec::new();
    };
    let bytes = src.as_bytes();
    let ob = &bytes[open.start..open.end];
    let indent = leading_spaces(ob);
    let fence_char = ob.get(indent).copied().unwrap_or(b'`');
    let fence_len = ob[indent..].iter().take_while(|&&c| c == fence_char).count();

    let mut segments = Vec::new();
    for line in body {
        let lb = &bytes[line.start..line.end];
        if is_closing_fence(lb, fence_char, fence_len) {
            break;
        }
        let strip = leading_spaces(lb).min(indent);
        segments.push(Segment::new(line.start + strip, line.next));
    }
    segments
}

fn is_closing_fence(line: &[u8], fence_char: u8, fence_len: usize) -> bool {
    let indent = leading_spaces(line);
    if indent > 3 {
        return false;
    }
    let run = line[indent..].iter().take_while(|&&c| c == fence_char).count();
    run >= fence_len && line[indent + run..].iter().all(|&c| is_blank(c))
}

/// Content lines of an indented code block with four columns of indentation
/// removed. Trailing blank lines are not part of the block.
pub(crate) fn indented_code_segments(src: &str, lines: &[Line]) -> Vec<Segment> {
    let bytes = src.as_bytes();
    let mut segments: Vec<Segment> = lines
        .iter()
        .map(|line| {
            let strip = indent_bytes(&bytes[line.start..line.end], 4);
            Segment::new(line.start + strip, line.next)
        })
        .collect();
    while segments
        .last()
        .is_some_and(|s| bytes[s.start..s.stop].iter().all(u8::is_ascii_whitespace))
    {
        segments.pop();
    }
    segments
}

/// One segment per physical line, terminators included.
pub(crate) fn line_segments(lines: &[Line]) -> Vec<Segment> {
    lines
        .iter()
        .map(|line| Segment::new(line.start, line.next))
        .collect()
}
