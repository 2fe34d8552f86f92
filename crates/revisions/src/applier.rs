//! The diff applier: rewrites every change region's adjusted ranges after a
//! document synchronization.
//!
//! The original line space (captured when regions were created) and the
//! current line space (the live document) are related only through the
//! line-diff oracle. The applier walks current lines `0..line_count` once,
//! keeping a cursor into the original-start-sorted region list. Each maximal
//! run of consecutive current lines that maps to consecutive original lines
//! inside one region's original range becomes one adjusted sub-range of that
//! region.
//!
//! "Incremental" refers to reusing the oracle's already-synchronized diff
//! state, not to avoiding the walk: every call is a full linear pass, at
//! O(current line count + region count).

use crate::differ::{LineClass, LineDiff};
use crate::range::LineRange;
use crate::revision::ChangeRegion;

/// The line a current line was last attributed to, used to decide between
/// extending the open run and starting a new sub-range.
#[derive(Clone, Copy)]
struct Attribution {
    region: usize,
    line: usize,
    original: usize,
}

/// Recomputes change-region adjusted ranges from the oracle's line
/// classifications.
///
/// A pure, synchronous function of (regions, oracle state, line count); the
/// caller is responsible for waiting on oracle synchronization before
/// invoking it. Out-of-range lines or non-monotonic oracle output are
/// contract violations, not recoverable errors.
#[derive(Debug, Default)]
pub struct DiffApplier;

impl DiffApplier {
    pub fn new() -> Self {
        Self
    }

    /// Recomputes the adjusted ranges of every region in `regions` against
    /// the current document of `line_count` lines.
    ///
    /// The effect per region follows entirely from the walk:
    /// - edits strictly before a region shift its single range by the net
    ///   line delta;
    /// - deletions truncating a region shrink its range, down to an empty
    ///   sequence on full removal (never a zero-length entry);
    /// - insertions or changes inside a region break the run and split it
    ///   into independently shifted sub-ranges;
    /// - lines of replacement text are never attributed back to the region
    ///   they replaced;
    /// - untouched regions reproduce their original range exactly.
    pub fn apply_diff<'a, I, D>(&self, regions: I, diff: &D, line_count: usize)
    where
        I: IntoIterator<Item = &'a mut ChangeRegion>,
        D: LineDiff + ?Sized,
    {
        let mut regions: Vec<&mut ChangeRegion> = regions.into_iter().collect();
        regions.sort_by_key(|region| region.original_range().start_line());
        for region in regions.iter_mut() {
            region.clear_adjusted();
        }

        // Cursor into the sorted region list. Oracle originals are
        // monotonic, so it only ever moves forward.
        let mut idx = 0;
        let mut last: Option<Attribution> = None;

        for line in 0..line_count {
            let original = match diff.line_class(line) {
                LineClass::Unchanged { original } => original,
                LineClass::Added | LineClass::Changed => continue,
            };

            while idx < regions.len() && regions[idx].original_range().end_line() <= original {
                idx += 1;
            }
            if idx == regions.len() {
                // Every remaining current line maps past the last region.
                break;
            }
            if !regions[idx].original_range().contains(original) {
                continue;
            }

            // Extend the open run only if this line is adjacent on both
            // axes; a gap on either side starts a new sub-range.
            let contiguous = last.is_some_and(|prev| {
                prev.region == idx && prev.line + 1 == line && prev.original + 1 == original
            });
            if contiguous {
                regions[idx].extend_last_adjusted();
            } else {
                regions[idx].push_adjusted(LineRange::new(line, 1));
            }
            last = Some(Attribution {
                region: idx,
                line,
                original,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canned classification standing in for a synchronized differ.
    struct StubDiff(Vec<LineClass>);

    impl StubDiff {
        /// Identity classification for `lines` lines.
        fn identity(lines: usize) -> Self {
            Self((0..lines).map(|i| LineClass::Unchanged { original: i }).collect())
        }
    }

    impl LineDiff for StubDiff {
        fn line_class(&self, line: usize) -> LineClass {
            self.0[line]
        }
    }

    fn region(start: usize, count: usize) -> ChangeRegion {
        ChangeRegion::new("rev", LineRange::new(start, count))
    }

    fn adjusted(region: &ChangeRegion) -> Vec<(usize, usize)> {
        region
            .adjusted_ranges()
            .iter()
            .map(|r| (r.start_line(), r.line_count()))
            .collect()
    }

    #[test]
    fn identity_walk_reproduces_original_ranges() {
        let mut regions = vec![region(0, 2), region(4, 3)];
        let diff = StubDiff::identity(10);
        DiffApplier::new().apply_diff(regions.iter_mut(), &diff, 10);

        assert_eq!(adjusted(&regions[0]), vec![(0, 2)]);
        assert_eq!(adjusted(&regions[1]), vec![(4, 3)]);
    }

    #[test]
    fn insertion_before_a_region_shifts_it() {
        // Three lines inserted at the top: current 0..3 added, then identity.
        let mut classes = vec![LineClass::Added; 3];
        classes.extend((0..8).map(|i| LineClass::Unchanged { original: i }));
        let diff = StubDiff(classes);

        let mut regions = vec![region(2, 4)];
        DiffApplier::new().apply_diff(regions.iter_mut(), &diff, 11);
        assert_eq!(adjusted(&regions[0]), vec![(5, 4)]);
    }

    #[test]
    fn deletion_before_a_region_shifts_it_back() {
        // Originals 0..2 deleted.
        let diff = StubDiff((0..6).map(|i| LineClass::Unchanged { original: i + 2 }).collect());
        let mut regions = vec![region(3, 2)];
        DiffApplier::new().apply_diff(regions.iter_mut(), &diff, 6);
        assert_eq!(adjusted(&regions[0]), vec![(1, 2)]);
    }

    #[test]
    fn insertion_inside_a_region_splits_it() {
        // Region originals 2..6; two added lines land between originals 3 and 4.
        let classes = vec![
            LineClass::Unchanged { original: 0 },
            LineClass::Unchanged { original: 1 },
            LineClass::Unchanged { original: 2 },
            LineClass::Unchanged { original: 3 },
            LineClass::Added,
            LineClass::Added,
            LineClass::Unchanged { original: 4 },
            LineClass::Unchanged { original: 5 },
        ];
        let mut regions = vec![region(2, 4)];
        DiffApplier::new().apply_diff(regions.iter_mut(), &StubDiff(classes), 8);

        // Split into two entries whose lengths sum to the original length.
        assert_eq!(adjusted(&regions[0]), vec![(2, 2), (6, 2)]);
    }

    #[test]
    fn interior_deletion_splits_on_the_original_axis() {
        // Originals 3 and 4 deleted out of region 2..6: current lines stay
        // consecutive but the original mapping jumps, so the run breaks.
        let classes = vec![
            LineClass::Unchanged { original: 0 },
            LineClass::Unchanged { original: 1 },
            LineClass::Unchanged { original: 2 },
            LineClass::Unchanged { original: 5 },
            LineClass::Unchanged { original: 6 },
        ];
        let mut regions = vec![region(2, 4)];
        DiffApplier::new().apply_diff(regions.iter_mut(), &StubDiff(classes), 5);

        assert_eq!(adjusted(&regions[0]), vec![(2, 1), (3, 1)]);
    }

    #[test]
    fn fully_deleted_region_has_no_adjusted_ranges() {
        // Originals 2..4 gone entirely.
        let classes = vec![
            LineClass::Unchanged { original: 0 },
            LineClass::Unchanged { original: 1 },
            LineClass::Unchanged { original: 4 },
        ];
        let mut regions = vec![region(0, 2), region(2, 2), region(4, 1)];
        DiffApplier::new().apply_diff(regions.iter_mut(), &StubDiff(classes), 3);

        assert_eq!(adjusted(&regions[0]), vec![(0, 2)]);
        assert!(regions[1].adjusted_ranges().is_empty());
        assert_eq!(adjusted(&regions[2]), vec![(2, 1)]);
    }

    #[test]
    fn replacement_lines_are_not_attributed_to_the_old_region() {
        // Region originals 1..3 replaced by three changed lines.
        let classes = vec![
            LineClass::Unchanged { original: 0 },
            LineClass::Changed,
            LineClass::Changed,
            LineClass::Changed,
            LineClass::Unchanged { original: 3 },
        ];
        let mut regions = vec![region(1, 2)];
        DiffApplier::new().apply_diff(regions.iter_mut(), &StubDiff(classes), 5);
        assert!(regions[0].adjusted_ranges().is_empty());
    }

    #[test]
    fn truncating_deletion_shrinks_from_the_edge() {
        // Original 2 (the region's first line) deleted; 3 and 4 survive.
        let classes = vec![
            LineClass::Unchanged { original: 0 },
            LineClass::Unchanged { original: 1 },
            LineClass::Unchanged { original: 3 },
            LineClass::Unchanged { original: 4 },
        ];
        let mut regions = vec![region(2, 3)];
        DiffApplier::new().apply_diff(regions.iter_mut(), &StubDiff(classes), 4);
        assert_eq!(adjusted(&regions[0]), vec![(2, 2)]);
    }

    #[test]
    fn unsorted_input_regions_are_handled() {
        let mut regions = vec![region(4, 3), region(0, 2)];
        let diff = StubDiff::identity(10);
        DiffApplier::new().apply_diff(regions.iter_mut(), &diff, 10);

        assert_eq!(adjusted(&regions[0]), vec![(4, 3)]);
        assert_eq!(adjusted(&regions[1]), vec![(0, 2)]);
    }

    #[test]
    fn reapplying_after_identity_is_stable() {
        let mut regions = vec![region(1, 2)];
        let diff = StubDiff::identity(5);
        let applier = DiffApplier::new();
        applier.apply_diff(regions.iter_mut(), &diff, 5);
        applier.apply_diff(regions.iter_mut(), &diff, 5);
        assert_eq!(adjusted(&regions[0]), vec![(1, 2)]);
    }

    #[test]
    fn adjacent_regions_split_runs_between_them() {
        // Two back-to-back regions over originals 0..2 and 2..4, identity
        // diff: the walk must not merge them into one range.
        let mut regions = vec![region(0, 2), region(2, 2)];
        let diff = StubDiff::identity(4);
        DiffApplier::new().apply_diff(regions.iter_mut(), &diff, 4);

        assert_eq!(adjusted(&regions[0]), vec![(0, 2)]);
        assert_eq!(adjusted(&regions[1]), vec![(2, 2)]);
    }
}
