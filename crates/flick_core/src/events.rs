//! Touch event types and dispatch envelope
//!
//! Hosts translate their native touch input into [`TouchEvent`]s and wrap
//! each one in an [`Event`] before handing it to a widget. Handlers call
//! [`Event::stop_propagation`] to keep ancestors from reacting to the same
//! gesture.

/// Numeric event type id, used to drive state machines
pub type EventType = u32;

/// Event type ids
pub mod event_types {
    use super::EventType;

    /// A finger touched the surface
    pub const TOUCH_START: EventType = 1;
    /// A touching finger moved
    pub const TOUCH_MOVE: EventType = 2;
    /// A finger was lifted
    pub const TOUCH_END: EventType = 3;
}

/// Touch events for touchscreens
///
/// Coordinates are client (viewport) coordinates in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchEvent {
    /// A touch started
    Started {
        /// Unique identifier for this touch
        id: u64,
        /// X position in client coordinates
        x: f32,
        /// Y position in client coordinates
        y: f32,
    },
    /// A touch moved
    Moved {
        /// Unique identifier for this touch
        id: u64,
        /// X position in client coordinates
        x: f32,
        /// Y position in client coordinates
        y: f32,
    },
    /// A touch ended
    Ended {
        /// Unique identifier for this touch
        id: u64,
        /// X position when ended
        x: f32,
        /// Y position when ended
        y: f32,
    },
}

impl TouchEvent {
    /// Shorthand for a started touch with id 0
    pub fn start(x: f32) -> Self {
        TouchEvent::Started { id: 0, x, y: 0.0 }
    }

    /// Shorthand for a moved touch with id 0
    pub fn moved(x: f32) -> Self {
        TouchEvent::Moved { id: 0, x, y: 0.0 }
    }

    /// Shorthand for an ended touch with id 0
    pub fn end(x: f32) -> Self {
        TouchEvent::Ended { id: 0, x, y: 0.0 }
    }

    /// Get the touch ID
    pub fn id(&self) -> u64 {
        match self {
            TouchEvent::Started { id, .. } => *id,
            TouchEvent::Moved { id, .. } => *id,
            TouchEvent::Ended { id, .. } => *id,
        }
    }

    /// Get the position
    pub fn position(&self) -> (f32, f32) {
        match self {
            TouchEvent::Started { x, y, .. } => (*x, *y),
            TouchEvent::Moved { x, y, .. } => (*x, *y),
            TouchEvent::Ended { x, y, .. } => (*x, *y),
        }
    }

    /// Horizontal client coordinate
    pub fn client_x(&self) -> f32 {
        self.position().0
    }

    /// Event type id for this touch phase
    pub fn event_type(&self) -> EventType {
        match self {
            TouchEvent::Started { .. } => event_types::TOUCH_START,
            TouchEvent::Moved { .. } => event_types::TOUCH_MOVE,
            TouchEvent::Ended { .. } => event_types::TOUCH_END,
        }
    }
}

/// A dispatched event
#[derive(Clone, Debug)]
pub struct Event {
    /// The touch that triggered this event
    pub data: TouchEvent,
    /// Host timestamp in milliseconds
    pub timestamp: u64,
    /// Set by a handler to keep ancestors from seeing the event
    pub propagation_stopped: bool,
}

impl Event {
    /// Wrap a touch event
    pub fn new(data: TouchEvent) -> Self {
        Self {
            data,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    /// Set the host timestamp
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Event type id of the wrapped touch
    pub fn event_type(&self) -> EventType {
        self.data.event_type()
    }

    /// Stop this event from reaching ancestor handlers
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

impl From<TouchEvent> for Event {
    fn from(data: TouchEvent) -> Self {
        Event::new(data)
    }
}
