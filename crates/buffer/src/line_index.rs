//! Line index for tracking line boundaries in the text buffer.
//!
//! Maintains an array of line start offsets for O(1) line count and O(1)
//! line access. After an edit, only the edited region is rescanned: line
//! starts past it are shifted in bulk by the net length delta.

/// Tracks line boundaries in a text buffer.
///
/// The index maintains a list of character offsets where each line starts.
/// Line `i` starts one character past the `(i-1)`-th `'\n'`; line 0 starts at
/// offset 0; the line count equals the delimiter count + 1.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Character offsets where each line starts. line_starts[0] = 0 always.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new line index with a single empty line.
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
        }
    }

    /// Rebuilds the line index from the given content.
    ///
    /// This is O(n) and only needed for bulk operations like loading a
    /// document; per-edit maintenance goes through [`LineIndex::replaced`].
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.line_starts.clear();
        self.line_starts.push(0);

        let mut offset = 0;
        for ch in content {
            offset += 1;
            if ch == '\n' {
                self.line_starts.push(offset);
            }
        }
    }

    /// Returns the number of lines.
    ///
    /// A buffer always has at least one line (even if empty).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the character offset where the given line starts, or `None`
    /// if the line number is out of bounds.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Returns the character offset of the end of the given line, excluding
    /// the delimiter.
    ///
    /// `total_len` is the total number of characters in the buffer.
    pub fn line_end(&self, line: usize, total_len: usize) -> Option<usize> {
        if line + 1 < self.line_count() {
            // Not the last line: end is the start of the next line minus the newline.
            Some(self.line_starts[line + 1] - 1)
        } else if line + 1 == self.line_count() {
            Some(total_len)
        } else {
            None
        }
    }

    /// Returns the length of the given line, excluding the delimiter.
    pub fn line_len(&self, line: usize, total_len: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = self.line_end(line, total_len)?;
        Some(end - start)
    }

    /// Returns the line number containing the given character offset.
    ///
    /// Uses binary search for O(log n) lookup. Offsets past the end of the
    /// content resolve to the last line; the delimiter belongs to the line it
    /// terminates.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Patches the index after `replace(offset, removed, inserted)` was
    /// applied to the backing store.
    ///
    /// Line starts whose delimiters were inside the removed span are
    /// dropped, starts for delimiters in `inserted` are spliced in, and all
    /// subsequent starts shift by the net length delta. Cost is O(edited
    /// region + lines after it), independent of total content length.
    pub fn replaced(&mut self, offset: usize, removed: usize, inserted: &str) {
        let line = self.line_at_offset(offset);

        // A start s corresponds to a delimiter at s - 1, so starts in
        // (offset, offset + removed] lost their delimiter.
        let splice_from = line + 1;
        let splice_to = self.line_starts.partition_point(|&s| s <= offset + removed);
        debug_assert!(splice_from <= splice_to);

        let mut new_starts = Vec::new();
        let mut inserted_len = 0;
        for ch in inserted.chars() {
            inserted_len += 1;
            if ch == '\n' {
                new_starts.push(offset + inserted_len);
            }
        }

        let delta = inserted_len as isize - removed as isize;
        if delta != 0 {
            for start in self.line_starts[splice_to..].iter_mut() {
                *start = (*start as isize + delta) as usize;
            }
        }

        self.line_starts.splice(splice_from..splice_to, new_starts);
    }

    /// Returns the raw line_starts array (for debug validation).
    #[cfg(any(debug_assertions, test))]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
