//! Hover lifecycle for revision annotations.
//!
//! The widget-level hover plumbing (pointer tracking, popup windows) lives
//! outside this engine. What lives here is the lifecycle itself, modeled as
//! an explicit state machine driven by discrete input events: the caller
//! owns timers and widgets, feeds events in, and reads the state and hover
//! payload out. The engine is consulted only through the read-only
//! adjusted-range API.

use crate::revision::{Revision, RevisionInformation};

/// Discrete inputs driving the hover lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    /// Pointer entered or moved within the annotation ruler at `line`.
    PointerAt { line: usize },
    /// Pointer left the ruler.
    PointerLeft,
    /// The arming dwell elapsed. Timer ownership is the caller's; the event
    /// is ignored unless the machine is armed.
    DwellElapsed,
    /// Any key press dismisses the hover.
    KeyPressed,
}

/// Hover lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverState {
    /// No pointer interaction with an annotated line.
    Idle,
    /// Pointer resting on an annotated line, waiting for the dwell.
    Armed { line: usize },
    /// Hover payload for `line` is visible.
    Shown { line: usize },
}

/// Pure hover state machine: Idle → Armed → Shown.
#[derive(Debug)]
pub struct RevisionHover {
    state: HoverState,
}

impl RevisionHover {
    pub fn new() -> Self {
        Self {
            state: HoverState::Idle,
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Feeds one event and returns the resulting state.
    ///
    /// `info` supplies the current adjusted ranges: the machine only arms
    /// over lines some revision currently covers, and pointer movement to a
    /// different annotated line re-arms (a shown hover does not follow the
    /// pointer without a new dwell).
    pub fn on_event(&mut self, event: HoverEvent, info: &RevisionInformation) -> HoverState {
        self.state = match (self.state, event) {
            (_, HoverEvent::PointerLeft) | (_, HoverEvent::KeyPressed) => HoverState::Idle,

            (state, HoverEvent::PointerAt { line }) => {
                if info.revision_at_line(line).is_none() {
                    HoverState::Idle
                } else {
                    match state {
                        HoverState::Shown { line: shown } if shown == line => state,
                        _ => HoverState::Armed { line },
                    }
                }
            }

            (HoverState::Armed { line }, HoverEvent::DwellElapsed) => HoverState::Shown { line },
            (state, HoverEvent::DwellElapsed) => state,
        };
        self.state
    }

    /// The revision behind the currently shown hover, if any.
    pub fn shown_revision<'a>(&self, info: &'a RevisionInformation) -> Option<&'a Revision> {
        match self.state {
            HoverState::Shown { line } => info.revision_at_line(line),
            _ => None,
        }
    }
}

impl Default for RevisionHover {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::LineRange;
    use crate::revision::Rgb;
    use std::time::SystemTime;

    /// One revision "r1" covering lines 3..5.
    fn info() -> RevisionInformation {
        let mut info = RevisionInformation::new();
        let mut rev = Revision::new(
            "r1",
            SystemTime::UNIX_EPOCH,
            Rgb { r: 10, g: 20, b: 30 },
            "r1 changed these lines",
        );
        rev.add_region(LineRange::new(3, 2));
        info.add_revision(rev);
        info
    }

    #[test]
    fn arms_only_over_annotated_lines() {
        let info = info();
        let mut hover = RevisionHover::new();

        assert_eq!(
            hover.on_event(HoverEvent::PointerAt { line: 0 }, &info),
            HoverState::Idle
        );
        assert_eq!(
            hover.on_event(HoverEvent::PointerAt { line: 3 }, &info),
            HoverState::Armed { line: 3 }
        );
    }

    #[test]
    fn dwell_shows_and_exposes_the_payload() {
        let info = info();
        let mut hover = RevisionHover::new();

        hover.on_event(HoverEvent::PointerAt { line: 4 }, &info);
        assert_eq!(
            hover.on_event(HoverEvent::DwellElapsed, &info),
            HoverState::Shown { line: 4 }
        );
        assert_eq!(
            hover.shown_revision(&info).unwrap().hover_info(),
            "r1 changed these lines"
        );
    }

    #[test]
    fn dwell_without_arming_is_ignored() {
        let info = info();
        let mut hover = RevisionHover::new();
        assert_eq!(hover.on_event(HoverEvent::DwellElapsed, &info), HoverState::Idle);
        assert!(hover.shown_revision(&info).is_none());
    }

    #[test]
    fn moving_to_another_annotated_line_rearms() {
        let info = info();
        let mut hover = RevisionHover::new();

        hover.on_event(HoverEvent::PointerAt { line: 3 }, &info);
        hover.on_event(HoverEvent::DwellElapsed, &info);
        assert_eq!(
            hover.on_event(HoverEvent::PointerAt { line: 4 }, &info),
            HoverState::Armed { line: 4 }
        );
    }

    #[test]
    fn staying_on_the_shown_line_keeps_it_shown() {
        let info = info();
        let mut hover = RevisionHover::new();

        hover.on_event(HoverEvent::PointerAt { line: 3 }, &info);
        hover.on_event(HoverEvent::DwellElapsed, &info);
        assert_eq!(
            hover.on_event(HoverEvent::PointerAt { line: 3 }, &info),
            HoverState::Shown { line: 3 }
        );
    }

    #[test]
    fn leave_and_keypress_dismiss() {
        let info = info();
        let mut hover = RevisionHover::new();

        hover.on_event(HoverEvent::PointerAt { line: 3 }, &info);
        hover.on_event(HoverEvent::DwellElapsed, &info);
        assert_eq!(hover.on_event(HoverEvent::KeyPressed, &info), HoverState::Idle);

        hover.on_event(HoverEvent::PointerAt { line: 3 }, &info);
        assert_eq!(hover.on_event(HoverEvent::PointerLeft, &info), HoverState::Idle);
    }

    #[test]
    fn pointer_over_unannotated_line_disarms() {
        let info = info();
        let mut hover = RevisionHover::new();

        hover.on_event(HoverEvent::PointerAt { line: 3 }, &info);
        assert_eq!(
            hover.on_event(HoverEvent::PointerAt { line: 9 }, &info),
            HoverState::Idle
        );
    }
}
