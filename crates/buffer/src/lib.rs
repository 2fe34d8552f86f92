//! revline-buffer: gap-buffer text store with line tracking.
//!
//! This crate is the leaf of the revline workspace. It provides
//! [`TextBuffer`], a line-oriented document backed by a gap buffer, with a
//! single checked mutation entry point:
//!
//! ```
//! use revline_buffer::TextBuffer;
//!
//! let mut doc = TextBuffer::from_str("hello\nworld\n");
//! doc.replace(6, 5, "there").unwrap();
//! assert_eq!(doc.content(), "hello\nthere\n");
//! assert_eq!(doc.line_count(), 3);
//! assert_eq!(doc.line_content(1).unwrap(), "there");
//! ```
//!
//! # Cost model
//!
//! Edits cost O(distance from the previous edit + inserted length), not
//! O(document size); a run of edits clustered at one location is O(1) per
//! edit. Reallocation is governed by [`GapConfig`]: the gap is kept between
//! the low and high watermarks, sized by `gap_ratio` when the buffer grows
//! or shrinks.
//!
//! # Error handling
//!
//! Every offset, length, and line argument is validated before any mutation;
//! violations surface as [`PositionError`] and leave the content untouched.

mod gap_buffer;
mod line_index;
mod text_buffer;
mod types;

pub use gap_buffer::{GapBuffer, GapConfig};
pub use line_index::LineIndex;
pub use text_buffer::TextBuffer;
pub use types::{LineInfo, PositionError};
