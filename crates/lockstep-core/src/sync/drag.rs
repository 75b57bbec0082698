//! Drag guard for seek and delay sliders
//!
//! Distinguishes "the user is actively dragging this control" from
//! "the value changed programmatically". While a drag is active the
//! owning controller keeps updating its displayed value but must not
//! command the audio primitive; the authoritative commit happens exactly
//! once, on the release transition. An explicit state machine replaces
//! previous-value diffing so the commit is a transition, not an
//! observation.

/// Drag lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Per-control drag state machine
///
/// `Idle → Dragging` on press, `Dragging → Idle` on release. The
/// release transition reports the commit; everything else is silent.
#[derive(Debug, Default)]
pub struct DragGuard {
    state: DragState,
}

impl DragGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press: enter the dragging state. Idempotent while held.
    pub fn begin(&mut self) {
        self.state = DragState::Dragging;
    }

    /// Release: returns true exactly once per completed drag.
    ///
    /// A release without a matching press (or a programmatic value
    /// change while idle) reports no commit.
    pub fn end(&mut self) -> bool {
        let commit = self.state == DragState::Dragging;
        self.state = DragState::Idle;
        commit
    }

    /// Whether the control is currently held
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }
}
