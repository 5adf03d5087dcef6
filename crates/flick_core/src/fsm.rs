//! Enum state machines
//!
//! Interaction states are plain enums. Implement [`StateTransitions`] to map
//! `(state, event)` pairs to the next state; unmapped pairs keep the current
//! state.
//!
//! ```rust
//! use flick_core::events::event_types::*;
//! use flick_core::StateTransitions;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
//! enum Press {
//!     #[default]
//!     Up,
//!     Down,
//! }
//!
//! impl StateTransitions for Press {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Press::Up, TOUCH_START) => Some(Press::Down),
//!             (Press::Down, TOUCH_END) => Some(Press::Up),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut state = Press::default();
//! assert!(state.transition(TOUCH_START));
//! assert_eq!(state, Press::Down);
//! assert!(!state.transition(TOUCH_MOVE));
//! ```

use std::fmt::Debug;

use crate::events::EventType;

/// Trait for enum states driven by event type ids
pub trait StateTransitions: Copy + PartialEq + Debug {
    /// Next state for `event`, or `None` if the event is ignored here
    fn on_event(&self, event: EventType) -> Option<Self>;

    /// Apply `event` in place. Returns true if the state changed.
    fn transition(&mut self, event: EventType) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                tracing::trace!("fsm: {:?} --({})--> {:?}", self, event, next);
                *self = next;
                true
            }
            _ => false,
        }
    }
}
