//! Gap buffer implementation for efficient text editing.
//!
//! A gap buffer is a character array split into two occupied segments around
//! one contiguous unused region (the gap). An edit first moves the gap to the
//! edit offset, then consumes or widens it. The cost of an edit is
//! O(distance from the previous edit + inserted length), which amortizes to
//! O(1) per edit for the clustered edit patterns of interactive typing.

use crate::types::PositionError;

/// Tuning parameters for gap sizing and reallocation.
///
/// Requires `low_water <= high_water`.
#[derive(Debug, Clone, Copy)]
pub struct GapConfig {
    /// Spare capacity (gap size) allocated when the buffer is created.
    pub initial_gap: usize,
    /// Reallocation never produces a gap smaller than this.
    pub low_water: usize,
    /// A gap left larger than this after an edit triggers a shrinking
    /// reallocation, so a large deletion does not pin memory forever.
    pub high_water: usize,
    /// Target gap size as a fraction of content length when the buffer
    /// reallocates, clamped to the watermarks.
    pub gap_ratio: f32,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            initial_gap: 64,
            low_water: 64,
            high_water: 4096,
            gap_ratio: 0.1,
        }
    }
}

/// A gap buffer for efficient text storage and manipulation.
///
/// All offsets are in characters, in logical coordinates: reading any offset
/// in `[0, len)` returns the same character regardless of where the physical
/// gap currently sits.
#[derive(Debug)]
pub struct GapBuffer {
    /// The underlying storage. Contains [pre-gap content | gap | post-gap content].
    data: Vec<char>,
    /// Index where the gap starts (first unused position).
    gap_start: usize,
    /// Index where the gap ends (first used position after gap).
    gap_end: usize,
    config: GapConfig,
}

impl GapBuffer {
    /// Creates a new empty gap buffer with the default configuration.
    pub fn new() -> Self {
        Self::with_config("", GapConfig::default())
    }

    /// Creates a gap buffer initialized with the given text.
    pub fn from_str(text: &str) -> Self {
        Self::with_config(text, GapConfig::default())
    }

    /// Creates a gap buffer with explicit tuning parameters.
    pub fn with_config(text: &str, config: GapConfig) -> Self {
        debug_assert!(config.low_water <= config.high_water);

        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let capacity = len + config.initial_gap;

        let mut data = Vec::with_capacity(capacity);
        data.extend(chars);
        data.resize(capacity, '\0');

        Self {
            data,
            gap_start: len,
            gap_end: capacity,
            config,
        }
    }

    /// Returns the logical length of the buffer (excluding the gap).
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current gap size.
    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Replaces `length` characters starting at `offset` with `text`.
    ///
    /// This is the single mutation entry point: insertion is a zero-`length`
    /// replace, deletion is a replace with empty `text`, and
    /// `offset == len()` is a pure append. Bounds are checked before any
    /// mutation, so a failed replace leaves the content untouched.
    pub fn replace(&mut self, offset: usize, length: usize, text: &str) -> Result<(), PositionError> {
        self.check_range(offset, length)?;

        self.move_gap_to(offset);
        // The doomed span now sits immediately past the gap; widening the
        // gap over it is the deletion.
        self.gap_end += length;

        let inserted: Vec<char> = text.chars().collect();
        self.ensure_gap(inserted.len());
        for ch in inserted {
            self.data[self.gap_start] = ch;
            self.gap_start += 1;
        }

        self.shrink_oversized_gap();
        Ok(())
    }

    /// Returns the character at the given logical offset.
    pub fn char_at(&self, offset: usize) -> Result<char, PositionError> {
        self.check_range(offset, 1)?;
        let physical = if offset < self.gap_start {
            offset
        } else {
            offset + self.gap_len()
        };
        Ok(self.data[physical])
    }

    /// Returns `length` characters starting at `offset` as a `String`.
    pub fn slice(&self, offset: usize, length: usize) -> Result<String, PositionError> {
        self.check_range(offset, length)?;
        let end = offset + length;

        let mut out = String::with_capacity(length);
        // Portion left of the gap.
        if offset < self.gap_start {
            out.extend(&self.data[offset..end.min(self.gap_start)]);
        }
        // Portion right of the gap, shifted by the gap width.
        if end > self.gap_start {
            let from = offset.max(self.gap_start) + self.gap_len();
            out.extend(&self.data[from..end + self.gap_len()]);
        }
        Ok(out)
    }

    /// Returns an iterator over all characters in the buffer.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.data[..self.gap_start]
            .iter()
            .chain(self.data[self.gap_end..].iter())
            .copied()
    }

    /// Validates that `offset..offset + length` lies inside the buffer.
    fn check_range(&self, offset: usize, length: usize) -> Result<(), PositionError> {
        let size = self.len();
        let in_bounds = offset
            .checked_add(length)
            .map(|end| end <= size)
            .unwrap_or(false);
        if in_bounds {
            Ok(())
        } else {
            Err(PositionError::OffsetOutOfBounds {
                offset,
                length,
                size,
            })
        }
    }

    /// Moves the gap to the specified logical position.
    ///
    /// This is O(distance): only the characters between the old and new gap
    /// positions are shifted, whichever side of the gap they fall on.
    fn move_gap_to(&mut self, pos: usize) {
        if pos < self.gap_start {
            // Move gap left: shift [pos..gap_start] up against gap_end.
            let shift = self.gap_start - pos;
            self.data.copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start = pos;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            // Move gap right: shift [gap_end..gap_end + shift] down to gap_start.
            let shift = pos - self.gap_start;
            self.data.copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Ensures the gap can hold at least `needed` characters, reallocating
    /// per the configured ratio and watermarks if it cannot.
    fn ensure_gap(&mut self, needed: usize) {
        if self.gap_len() >= needed {
            return;
        }
        let target = self.target_gap(self.len() + needed);
        // Leave at least low_water spare beyond the immediate insertion so a
        // burst of typing does not reallocate on every character.
        self.reallocate(target.max(needed + self.config.low_water));
    }

    /// Shrinks the gap back toward the target size if a deletion left it
    /// above the high watermark.
    fn shrink_oversized_gap(&mut self) {
        if self.gap_len() > self.config.high_water {
            self.reallocate(self.target_gap(self.len()));
        }
    }

    /// Target gap size for a buffer holding `content_len` characters.
    fn target_gap(&self, content_len: usize) -> usize {
        let scaled = (content_len as f32 * self.config.gap_ratio) as usize;
        scaled.clamp(self.config.low_water, self.config.high_water)
    }

    /// Rebuilds the backing store with a gap of exactly `new_gap` characters
    /// at the current gap position, copying both occupied segments around
    /// the relocated gap.
    fn reallocate(&mut self, new_gap: usize) {
        let pre = self.gap_start;
        let post = self.data.len() - self.gap_end;

        let mut data = Vec::with_capacity(pre + new_gap + post);
        data.extend_from_slice(&self.data[..pre]);
        data.resize(pre + new_gap, '\0');
        data.extend_from_slice(&self.data[self.gap_end..]);

        self.data = data;
        self.gap_end = pre + new_gap;
    }

    /// Current gap size, exposed for reallocation-policy tests.
    #[cfg(test)]
    fn gap_size(&self) -> usize {
        self.gap_len()
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in self.chars() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
