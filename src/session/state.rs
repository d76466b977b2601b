//! Selection session state machine
//!
//! One machine per capture attempt. Signals are applied synchronously on the
//! session's execution context; the machine answers with the effect the
//! owning session should carry out. Once a terminal phase is reached every
//! further signal is ignored, which is what makes completion at-most-once
//! even when drag-end and escape race.

use crate::domain::transform;
use crate::domain::{Point, Rect, Screen};

/// Minimum selection edge length in pixels; anything at or below cancels
pub const MIN_SELECTION_SIZE: f64 = 10.0;

/// Phase of a selection session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Selecting,
    /// Selection became the authoritative capture target (terminal)
    Committed,
    /// Session ended without a capture target (terminal)
    Cancelled,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Committed | Phase::Cancelled)
    }
}

/// The authoritative capture target, created once on commit
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureRequest {
    pub screen: Screen,
    pub rect: Rect,
}

/// Effect of applying one signal to the machine
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Signal is not valid in the current phase; nothing to do
    Ignored,
    /// Selection rect changed, in screen space; drives redraw
    RectChanged(Rect),
    /// First and only transition into `Committed`
    Committed(CaptureRequest),
    /// First and only transition into `Cancelled`
    Cancelled,
}

/// Tracks one drag-select attempt against a single target screen
pub struct SelectionStateMachine {
    phase: Phase,
    start_point: Point,
    current_point: Point,
    screen: Screen,
}

impl SelectionStateMachine {
    pub fn new(screen: Screen) -> Self {
        Self {
            phase: Phase::Idle,
            start_point: Point::default(),
            current_point: Point::default(),
            screen,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Selection rect in the target screen's native space
    fn selection_rect(&self) -> Rect {
        transform::to_screen_space(
            transform::normalize(self.start_point, self.current_point),
            &self.screen,
        )
    }

    /// Pointer went down: `Idle -> Selecting`
    pub fn begin_drag(&mut self, point: Point) -> Outcome {
        if self.phase != Phase::Idle {
            log::debug!("begin_drag ignored in {:?}", self.phase);
            return Outcome::Ignored;
        }
        self.phase = Phase::Selecting;
        self.start_point = point;
        self.current_point = point;
        Outcome::RectChanged(self.selection_rect())
    }

    /// Pointer moved during a drag; recomputes the rect
    pub fn update_drag(&mut self, point: Point) -> Outcome {
        if self.phase != Phase::Selecting {
            return Outcome::Ignored;
        }
        self.current_point = point;
        Outcome::RectChanged(self.selection_rect())
    }

    /// Pointer released: commit if the selection is large enough, else cancel
    pub fn end_drag(&mut self) -> Outcome {
        if self.phase != Phase::Selecting {
            return Outcome::Ignored;
        }
        let rect = self.selection_rect();
        if rect.width > MIN_SELECTION_SIZE && rect.height > MIN_SELECTION_SIZE {
            self.phase = Phase::Committed;
            Outcome::Committed(CaptureRequest {
                screen: self.screen.clone(),
                rect,
            })
        } else {
            log::debug!(
                "selection {}x{} below minimum, treating as cancel",
                rect.width,
                rect.height
            );
            self.phase = Phase::Cancelled;
            Outcome::Cancelled
        }
    }

    /// Escape pressed; valid before or during a drag
    pub fn cancel(&mut self) -> Outcome {
        if self.phase.is_terminal() {
            return Outcome::Ignored;
        }
        self.phase = Phase::Cancelled;
        Outcome::Cancelled
    }

    /// Commit a pre-armed rect without a drag (repeat-last-area preview path)
    pub fn commit_armed(&mut self, rect: Rect) -> Outcome {
        if self.phase != Phase::Idle {
            log::debug!("armed commit ignored in {:?}", self.phase);
            return Outcome::Ignored;
        }
        self.phase = Phase::Committed;
        Outcome::Committed(CaptureRequest {
            screen: self.screen.clone(),
            rect,
        })
    }
}
