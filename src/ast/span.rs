use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, stop)` into the **raw** source buffer.
///
/// Offsets are measured in bytes (UTF-8). Every rewrite slices the original
/// buffer with these, so they must never be computed against a normalized
/// copy of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
pub struct Segment {
    pub start: usize,
    pub stop: usize,
}

impl Segment {
    #[inline]
    pub fn new(start: usize, stop: usize) -> Self {
        debug_assert!(start <= stop, "Segment start must be <= stop");
        Self { start, stop }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.stop
    }

    /// Borrow the bytes this segment covers.
    ///
    /// Panics if the segment is out of bounds for `buf`.
    #[inline]
    pub fn slice<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.start..self.stop]
    }

    /// Returns a segment that covers both `self` and `other`.
    #[inline]
    pub fn cover(self, other: Segment) -> Segment {
        Segment {
            start: self.start.min(other.start),
            stop: self.stop.max(other.stop),
        }
    }
}

/// Concatenate the bytes of every segment, in order.
///
/// A code block's content is recorded line by line, so reading it back is a
/// merge rather than a single slice.
pub fn merge_segments(buf: &[u8], segments: &[Segment]) -> Vec<u8> {
    let mut out = Vec::with_capacity(segments.iter().map(Segment::len).sum());
    for seg in segments {
        out.extend_from_slice(seg.slice(buf));
    }
    out
}
