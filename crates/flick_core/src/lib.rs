//! Flick Core
//!
//! Foundational primitives shared by the Flick crates:
//!
//! - **State cells**: [`State<T>`], a cloneable, observable value owned by
//!   whoever created it. Widgets use it for lifted (caller-owned) state.
//! - **Touch events**: [`TouchEvent`] and the [`Event`] envelope with
//!   propagation control, as delivered by the host.
//! - **State machines**: the [`StateTransitions`] trait for small enum FSMs
//!   driven by event type ids.
//!
//! # Example
//!
//! ```rust
//! use flick_core::State;
//!
//! let page = State::new(0usize);
//! let observer = page.clone();
//!
//! page.set(2);
//! assert_eq!(observer.get(), 2);
//!
//! page.update(|p| p + 1);
//! assert_eq!(observer.get(), 3);
//! ```

pub mod events;
pub mod fsm;
pub mod state;

pub use events::{event_types, Event, EventType, TouchEvent};
pub use fsm::StateTransitions;
pub use state::{State, SubscriptionId};
