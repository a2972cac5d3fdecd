//! Drag interpretation for swipe cards
//!
//! Animation and timing stay in the presentation layer. This module only
//! answers "did this drag commit to a decision?".

/// Horizontal distance a card must travel before a release commits
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 100.0;

/// What a finished drag means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Dragged right past the threshold
    Like,
    /// Dragged left past the threshold
    Dislike,
    /// Released short of the threshold, card springs back
    Cancel,
}

/// Classify a horizontal drag distance. A magnitude equal to the
/// threshold commits. A zero-length drag never commits, whatever the
/// threshold.
pub fn interpret_drag(dx: f32, threshold: f32) -> SwipeOutcome {
    let threshold = threshold.abs();
    if !dx.is_finite() || dx == 0.0 {
        return SwipeOutcome::Cancel;
    }
    if dx >= threshold {
        SwipeOutcome::Like
    } else if dx <= -threshold {
        SwipeOutcome::Dislike
    } else {
        SwipeOutcome::Cancel
    }
}

/// State for drag interactions on the top card
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub is_dragging: bool,
    pub start_x: Option<f32>,
    pub offset_x: f32,
}

impl DragState {
    /// Pointer went down on the card
    pub fn press(&mut self, x: f32) {
        self.is_dragging = true;
        self.start_x = Some(x);
        self.offset_x = 0.0;
    }

    /// Pointer moved; returns the current card offset for rendering
    pub fn moved(&mut self, x: f32) -> f32 {
        if let (true, Some(start)) = (self.is_dragging, self.start_x) {
            self.offset_x = x - start;
        }
        self.offset_x
    }

    /// Pointer released; the drag resets and its outcome is returned.
    /// A release without a press is a cancel.
    pub fn release(&mut self, threshold: f32) -> SwipeOutcome {
        let outcome = if self.is_dragging {
            interpret_drag(self.offset_x, threshold)
        } else {
            SwipeOutcome::Cancel
        };
        *self = Self::default();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_drag() {
        assert_eq!(interpret_drag(150.0, 100.0), SwipeOutcome::Like);
        assert_eq!(interpret_drag(-150.0, 100.0), SwipeOutcome::Dislike);
        assert_eq!(interpret_drag(99.9, 100.0), SwipeOutcome::Cancel);
        assert_eq!(interpret_drag(-40.0, 100.0), SwipeOutcome::Cancel);
        assert_eq!(interpret_drag(0.0, 100.0), SwipeOutcome::Cancel);
    }

    #[test]
    fn test_threshold_boundary_commits() {
        assert_eq!(interpret_drag(100.0, 100.0), SwipeOutcome::Like);
        assert_eq!(interpret_drag(-100.0, 100.0), SwipeOutcome::Dislike);
    }

    #[test]
    fn test_non_finite_drag_cancels() {
        assert_eq!(interpret_drag(f32::NAN, 100.0), SwipeOutcome::Cancel);
        assert_eq!(interpret_drag(f32::INFINITY, 100.0), SwipeOutcome::Cancel);
    }

    #[test]
    fn test_tap_never_commits() {
        assert_eq!(interpret_drag(0.0, 0.0), SwipeOutcome::Cancel);
        assert_eq!(interpret_drag(-0.0, 0.0), SwipeOutcome::Cancel);
        assert_eq!(interpret_drag(0.5, 0.0), SwipeOutcome::Like);

        let mut drag = DragState::default();
        drag.press(10.0);
        assert_eq!(drag.release(0.0), SwipeOutcome::Cancel);
    }

    #[test]
    fn test_drag_state_tracks_offset() {
        let mut drag = DragState::default();
        drag.press(200.0);
        assert_eq!(drag.moved(260.0), 60.0);
        assert_eq!(drag.moved(340.0), 140.0);
        assert_eq!(drag.release(DEFAULT_SWIPE_THRESHOLD), SwipeOutcome::Like);
        assert!(!drag.is_dragging);
        assert_eq!(drag.offset_x, 0.0);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.moved(500.0), 0.0);
        assert_eq!(drag.release(DEFAULT_SWIPE_THRESHOLD), SwipeOutcome::Cancel);
    }

    #[test]
    fn test_short_drag_springs_back() {
        let mut drag = DragState::default();
        drag.press(100.0);
        drag.moved(50.0);
        assert_eq!(drag.release(DEFAULT_SWIPE_THRESHOLD), SwipeOutcome::Cancel);
    }
}
