//! Drag gesture tracking and release decisions

use flick_core::events::event_types::{TOUCH_END, TOUCH_START};
use flick_core::{EventType, StateTransitions};

/// Drag distance, in percent of one page width, needed to change page
pub const DRAG_THRESHOLD_PERCENT: i32 = 30;

/// Interaction state of a carousel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            // A new touch always (re)starts a drag, even over a stale one
            (_, TOUCH_START) => Some(GestureState::Dragging),
            (_, TOUCH_END) => Some(GestureState::Idle),
            _ => None,
        }
    }
}

/// Positions recorded between touch start and touch end
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub initial_x: f32,
    pub current_x: f32,
}

impl GestureSession {
    pub fn begin(x: f32) -> Self {
        Self {
            initial_x: x,
            current_x: x,
        }
    }

    pub fn track(&mut self, x: f32) {
        self.current_x = x;
    }

    /// Drag distance in percent of `content_width`
    pub fn offset_percent(&self, content_width: f32) -> i32 {
        drag_offset_percent(self.current_x, self.initial_x, content_width)
    }
}

/// Round half up (towards positive infinity), as the host's `Math.round`
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// `round((current - initial) * 100 / width)`, or 0 when width is unusable
pub fn drag_offset_percent(current: f32, initial: f32, content_width: f32) -> i32 {
    if !content_width.is_finite() || content_width <= 0.0 {
        return 0;
    }
    let delta = f64::from(current) - f64::from(initial);
    let percent = round_half_up(delta * 100.0 / f64::from(content_width));
    if percent.is_nan() {
        0
    } else {
        // `as` saturates at the i32 bounds
        percent as i32
    }
}

/// Page to settle on when a drag of `offset_percent` is released on `page`
pub fn release_target(offset_percent: i32, page: usize, page_count: usize) -> usize {
    let last = page_count.saturating_sub(1);
    if offset_percent > DRAG_THRESHOLD_PERCENT && page > 0 {
        page - 1
    } else if offset_percent < -DRAG_THRESHOLD_PERCENT && page < last {
        page + 1
    } else {
        page
    }
}
