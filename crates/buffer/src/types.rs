use std::fmt;

/// Start offset and length of one line, excluding the trailing delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// Character offset of the first character of the line.
    pub offset: usize,
    /// Number of characters on the line, not counting the `'\n'`.
    pub length: usize,
}

/// Position-validity errors for buffer and line operations.
///
/// These are reported before any mutation takes place, so a failed operation
/// never leaves the buffer partially edited. Negative offsets and lengths are
/// unrepresentable (`usize` arguments), so the classic "offset < 0" case
/// cannot arise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionError {
    /// A character range reached past the end of the buffer:
    /// `offset + length > size`.
    OffsetOutOfBounds {
        offset: usize,
        length: usize,
        size: usize,
    },
    /// A line number was not in `0..line_count`.
    LineOutOfBounds { line: usize, line_count: usize },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PositionError::OffsetOutOfBounds {
                offset,
                length,
                size,
            } => write!(
                f,
                "character range {}..{} is out of bounds for buffer of size {}",
                offset,
                offset + length,
                size
            ),
            PositionError::LineOutOfBounds { line, line_count } => write!(
                f,
                "line {} is out of bounds for buffer with {} lines",
                line, line_count
            ),
        }
    }
}

impl std::error::Error for PositionError {}
