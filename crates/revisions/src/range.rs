//! Line range value type shared by the revision model and the diff applier.

use std::fmt;

/// A contiguous span of lines: start line plus line count.
///
/// Plain value type; an empty range (`line_count == 0`) is representable but
/// never appears in an adjusted-range sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start_line: usize,
    line_count: usize,
}

impl LineRange {
    pub fn new(start_line: usize, line_count: usize) -> Self {
        Self {
            start_line,
            line_count,
        }
    }

    /// First line of the range.
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Number of lines in the range.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// First line past the range (exclusive end).
    pub fn end_line(&self) -> usize {
        self.start_line + self.line_count
    }

    /// Returns true if `line` falls inside the range.
    pub fn contains(&self, line: usize) -> bool {
        self.start_line <= line && line < self.end_line()
    }

    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}+{})", self.start_line, self.line_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let range = LineRange::new(3, 2);
        assert!(!range.contains(2));
        assert!(range.contains(3));
        assert!(range.contains(4));
        assert!(!range.contains(5));
    }

    #[test]
    fn empty_range_contains_nothing() {
        let range = LineRange::new(3, 0);
        assert!(range.is_empty());
        assert!(!range.contains(3));
        assert_eq!(range.end_line(), 3);
    }
}
