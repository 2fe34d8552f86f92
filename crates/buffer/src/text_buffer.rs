//! TextBuffer is the document facade over the gap buffer and line index.
//!
//! All mutation funnels through [`TextBuffer::replace`]; the line index is
//! patched before the call returns, so line queries are never stale. Line
//! arguments are validated and reported as [`PositionError`] rather than the
//! raw `Option`s of the inner index.

use crate::gap_buffer::{GapBuffer, GapConfig};
use crate::line_index::LineIndex;
use crate::types::{LineInfo, PositionError};

/// How often (in mutations) the debug build cross-checks the incremental
/// line index against a full rescan.
#[cfg(debug_assertions)]
const DEBUG_VALIDATE_INTERVAL: u64 = 1024;

/// A line-oriented text document backed by a gap buffer.
///
/// The buffer maintains:
/// - Content storage via a gap buffer (cheap localized edits)
/// - Line boundary tracking for O(1) line-based access
/// - A modification stamp so collaborators can detect edits
///
/// Single-threaded by design: the owning editing session serializes edits
/// and reads.
#[derive(Debug)]
pub struct TextBuffer {
    buffer: GapBuffer,
    line_index: LineIndex,
    /// Bumped on every successful mutation.
    modification_stamp: u64,
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self::from_str("")
    }

    /// Creates a text buffer initialized with the given content.
    ///
    /// Note: We don't implement `FromStr` because it requires returning
    /// `Result`, but parsing a string into a TextBuffer cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        Self::with_config(content, GapConfig::default())
    }

    /// Creates a text buffer with explicit gap tuning parameters.
    pub fn with_config(content: &str, config: GapConfig) -> Self {
        let buffer = GapBuffer::with_config(content, config);
        let mut line_index = LineIndex::new();
        line_index.rebuild(content.chars());

        Self {
            buffer,
            line_index,
            modification_stamp: 0,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    // ==================== Mutation ====================

    /// Replaces `length` characters at `offset` with `text`.
    ///
    /// The single mutation entry point: bounds are validated before any
    /// change, so a failed replace is a no-op. On success the line index is
    /// patched incrementally and the modification stamp is bumped.
    pub fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<(), PositionError> {
        self.buffer.replace(offset, length, text)?;
        self.line_index.replaced(offset, length, text);
        self.modification_stamp += 1;

        #[cfg(debug_assertions)]
        {
            self.debug_mutation_count += 1;
            if self.debug_mutation_count % DEBUG_VALIDATE_INTERVAL == 0 {
                self.debug_validate_line_index();
            }
        }

        Ok(())
    }

    // ==================== Content access ====================

    /// Returns the logical length in characters.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the buffer holds no characters.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the entire content as a `String`.
    pub fn content(&self) -> String {
        self.buffer.chars().collect()
    }

    /// Returns the character at `offset`.
    pub fn char_at(&self, offset: usize) -> Result<char, PositionError> {
        self.buffer.char_at(offset)
    }

    /// Returns `length` characters starting at `offset`.
    pub fn slice(&self, offset: usize, length: usize) -> Result<String, PositionError> {
        self.buffer.slice(offset, length)
    }

    /// Counter that increases on every successful mutation. Collaborators
    /// (like the line differ) use it to detect that a resynchronization is
    /// needed.
    pub fn modification_stamp(&self) -> u64 {
        self.modification_stamp
    }

    // ==================== Line access ====================

    /// Returns the number of lines; always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Returns the character offset where `line` starts.
    pub fn offset_of_line(&self, line: usize) -> Result<usize, PositionError> {
        self.line_index
            .line_start(line)
            .ok_or(PositionError::LineOutOfBounds {
                line,
                line_count: self.line_count(),
            })
    }

    /// Returns the line containing `offset`. `offset == len()` resolves to
    /// the last line.
    pub fn line_of_offset(&self, offset: usize) -> Result<usize, PositionError> {
        if offset > self.len() {
            return Err(PositionError::OffsetOutOfBounds {
                offset,
                length: 0,
                size: self.len(),
            });
        }
        Ok(self.line_index.line_at_offset(offset))
    }

    /// Returns start offset and length of `line`, excluding the delimiter.
    pub fn line_info(&self, line: usize) -> Result<LineInfo, PositionError> {
        let offset = self.offset_of_line(line)?;
        let length = self
            .line_index
            .line_len(line, self.len())
            .ok_or(PositionError::LineOutOfBounds {
                line,
                line_count: self.line_count(),
            })?;
        Ok(LineInfo { offset, length })
    }

    /// Returns the text of `line`, excluding the delimiter.
    pub fn line_content(&self, line: usize) -> Result<String, PositionError> {
        let info = self.line_info(line)?;
        self.slice(info.offset, info.length)
    }

    /// Cross-checks the incrementally patched line index against a full
    /// rescan. Sampled in debug builds only.
    #[cfg(debug_assertions)]
    fn debug_validate_line_index(&self) {
        let mut fresh = LineIndex::new();
        fresh.rebuild(self.buffer.chars());
        debug_assert_eq!(
            self.line_index.line_starts(),
            fresh.line_starts(),
            "incremental line index diverged from content"
        );
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
