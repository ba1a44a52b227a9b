use std::ops::Range;

/// A contiguous span of text from one byte index to another in a single
/// (trimmed) input line.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    /// The byte index of the first character.
    pub start: usize,
    /// The byte index after the last character.
    pub end: usize,
}
impl Span {
    /// Returns a 0-length span at the given index.
    pub fn empty(idx: usize) -> Self {
        Self {
            start: idx,
            end: idx,
        }
    }
    /// Returns the number of bytes covered by this span.
    pub fn len(self) -> usize {
        self.end - self.start
    }
    /// Returns true if this span covers no text.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
    /// Returns the 1-indexed column of the first character of this span
    /// within `line`.
    pub fn column(self, line: &str) -> usize {
        line[..self.start].chars().count() + 1
    }
}
impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}
