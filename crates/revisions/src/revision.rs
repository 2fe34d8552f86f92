//! Revision model: which revision owns which original lines, and where
//! those lines sit in the current document.
//!
//! Ownership runs strictly downward: [`RevisionInformation`] owns its
//! [`Revision`]s, each revision owns its [`ChangeRegion`]s. A region carries
//! its revision's id as a non-owning back-reference; metadata lookup goes
//! through [`RevisionInformation::revision_by_id`].

use std::time::SystemTime;

use crate::applier::DiffApplier;
use crate::differ::LineDiff;
use crate::range::LineRange;

/// Display color attached to a revision.
///
/// Rendering and theme assignment are external; this is carried metadata
/// only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One contiguous *original* span of lines attributed to a revision at the
/// time the diff was last fully computed.
///
/// The original range is fixed at construction. The adjusted ranges — where
/// that span's content currently sits — are rewritten by the diff applier
/// after every document synchronization: pairwise disjoint, ascending by
/// start line, possibly split by interior edits, and empty once the original
/// content has been entirely deleted. Zero-length entries never appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRegion {
    revision_id: String,
    original: LineRange,
    adjusted: Vec<LineRange>,
}

impl ChangeRegion {
    /// Creates a region owned by the revision with `revision_id`, covering
    /// `original`. A fresh region's adjusted sequence is exactly its
    /// original range.
    pub fn new(revision_id: impl Into<String>, original: LineRange) -> Self {
        Self {
            revision_id: revision_id.into(),
            original,
            adjusted: vec![original],
        }
    }

    /// Id of the owning revision.
    pub fn revision_id(&self) -> &str {
        &self.revision_id
    }

    /// The immutable original line range captured when the region was
    /// created.
    pub fn original_range(&self) -> LineRange {
        self.original
    }

    /// The span's current position(s) in the live document.
    pub fn adjusted_ranges(&self) -> &[LineRange] {
        &self.adjusted
    }

    pub(crate) fn clear_adjusted(&mut self) {
        self.adjusted.clear();
    }

    pub(crate) fn push_adjusted(&mut self, range: LineRange) {
        debug_assert!(!range.is_empty());
        debug_assert!(
            self.adjusted
                .last()
                .map_or(true, |last| last.end_line() <= range.start_line()),
            "adjusted ranges must stay disjoint and ascending"
        );
        self.adjusted.push(range);
    }

    /// Grows the most recently emitted adjusted range by one line. Only the
    /// applier calls this, and only right after a push.
    pub(crate) fn extend_last_adjusted(&mut self) {
        let last = self
            .adjusted
            .last_mut()
            .expect("extend_last_adjusted on empty adjusted sequence");
        *last = LineRange::new(last.start_line(), last.line_count() + 1);
    }
}

/// One logical change-set/author: id, timestamp, display color, and an
/// opaque hover payload, plus the regions it owns.
///
/// Immutable after construction except for region additions.
#[derive(Debug, Clone)]
pub struct Revision {
    id: String,
    date: SystemTime,
    color: Rgb,
    hover_info: String,
    regions: Vec<ChangeRegion>,
}

impl Revision {
    pub fn new(
        id: impl Into<String>,
        date: SystemTime,
        color: Rgb,
        hover_info: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            color,
            hover_info: hover_info.into(),
            regions: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> SystemTime {
        self.date
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn hover_info(&self) -> &str {
        &self.hover_info
    }

    /// Appends a region covering `original`. Regions accumulate in call
    /// order (chronological) and are never removed.
    pub fn add_region(&mut self, original: LineRange) {
        self.regions
            .push(ChangeRegion::new(self.id.clone(), original));
    }

    /// The regions owned by this revision, in insertion order.
    pub fn regions(&self) -> &[ChangeRegion] {
        &self.regions
    }
}

/// Encapsulates revision information for one line-based document: a flat,
/// ordered, append-only collection of revisions.
///
/// Externally this is a read-only view; the backing containers are never
/// exposed mutably.
#[derive(Debug, Default)]
pub struct RevisionInformation {
    revisions: Vec<Revision>,
}

impl RevisionInformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a revision. Revisions accumulate in call order.
    pub fn add_revision(&mut self, revision: Revision) {
        self.revisions.push(revision);
    }

    /// The contained revisions, in insertion order.
    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    /// Looks up a revision by id (the back-reference carried by each
    /// region).
    pub fn revision_by_id(&self, id: &str) -> Option<&Revision> {
        self.revisions.iter().find(|rev| rev.id() == id)
    }

    /// Returns the revision whose region currently covers `line`, if any.
    ///
    /// Consults adjusted ranges, so the answer tracks the live document as
    /// long as the diff applier has run since the last edit.
    pub fn revision_at_line(&self, line: usize) -> Option<&Revision> {
        self.revisions.iter().find(|rev| {
            rev.regions().iter().any(|region| {
                region
                    .adjusted_ranges()
                    .iter()
                    .any(|range| range.contains(line))
            })
        })
    }

    /// Recomputes the adjusted ranges of every region of every revision
    /// from the oracle's classification of the current document.
    ///
    /// The caller must have waited for oracle synchronization first; see
    /// [`crate::DocumentLineDiffer::wait_for_synchronization`].
    pub fn apply_diff<D>(&mut self, diff: &D, line_count: usize)
    where
        D: LineDiff + ?Sized,
    {
        let regions = self
            .revisions
            .iter_mut()
            .flat_map(|rev| rev.regions.iter_mut());
        DiffApplier::new().apply_diff(regions, diff, line_count);
    }
}
