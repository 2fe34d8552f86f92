//! revline-revisions: revision tracking and incremental diff application.
//!
//! This crate keeps a set of line-range revision annotations continuously
//! correct as a document is edited, without re-running the full diff on
//! every keystroke.
//!
//! # Overview
//!
//! - [`RevisionInformation`] / [`Revision`] / [`ChangeRegion`] model which
//!   revision owns which *original* lines, and where those lines sit in the
//!   current document (the *adjusted* ranges).
//! - [`LineDiff`] is the oracle seam: a per-line classification of the
//!   current document against a reference document. [`DocumentLineDiffer`]
//!   implements it with a background worker over [`similar`], exposing a
//!   synchronized flag with a bounded wait.
//! - [`DiffApplier`] rewrites every region's adjusted ranges from the
//!   oracle's classification in one linear walk over current lines.
//! - [`RevisionHover`] is the pure state machine behind annotation hovers.
//!
//! # Flow
//!
//! ```
//! use std::time::{Duration, SystemTime};
//! use revline_buffer::TextBuffer;
//! use revline_revisions::{
//!     DocumentLineDiffer, LineRange, Revision, RevisionInformation, Rgb,
//! };
//!
//! let mut document = TextBuffer::from_str("alpha\nbeta\ngamma\n");
//! let differ = DocumentLineDiffer::new(document.content());
//! differ.connect(&document);
//!
//! let mut info = RevisionInformation::new();
//! let mut rev = Revision::new("r1", SystemTime::now(), Rgb { r: 200, g: 80, b: 40 }, "r1");
//! rev.add_region(LineRange::new(1, 2));
//! info.add_revision(rev);
//!
//! // Edit, resynchronize, reapply.
//! document.replace(0, 0, "intro\n").unwrap();
//! differ.document_changed(&document);
//! assert!(differ.wait_for_synchronization(Duration::from_secs(10)));
//! info.apply_diff(&differ, document.line_count());
//!
//! let region = &info.revisions()[0].regions()[0];
//! assert_eq!(region.adjusted_ranges(), &[LineRange::new(2, 2)]);
//! ```

mod applier;
mod differ;
mod hover;
mod range;
mod revision;

pub use applier::DiffApplier;
pub use differ::{DocumentLineDiffer, LineClass, LineDiff, ReferenceProvider};
pub use hover::{HoverEvent, HoverState, RevisionHover};
pub use range::LineRange;
pub use revision::{ChangeRegion, Revision, RevisionInformation, Rgb};
