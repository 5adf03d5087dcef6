//! Flick Widget Library
//!
//! A touch-swipeable carousel and the element tree it renders into.
//!
//! # Architecture
//!
//! 1. **Paging state machine**: each [`Carousel`] owns a gesture session and
//!    an `Idle`/`Dragging` FSM. Touch events and auto-paging ticks are turned
//!    into a page index plus a horizontal transform of the content track.
//!
//! 2. **Fast path vs render path**: while a finger drags, the track transform
//!    is written straight into the [`CarouselHandle`] without a render pass.
//!    Page changes go through the page store and show up on the next
//!    [`Carousel::render`].
//!
//! 3. **Controlled or uncontrolled**: the page index lives in a
//!    [`PageIndexStore`], either owned by the widget or supplied by the
//!    caller as a [`PageState`].
//!
//! # Example
//!
//! ```rust
//! use flick_core::{Event, TouchEvent};
//! use flick_timer::TimerScheduler;
//! use flick_widgets::prelude::*;
//!
//! let scheduler = TimerScheduler::new();
//! let config = CarouselConfig::new()
//!     .page_indicator(PageIndicator::Counter)
//!     .auto_paging(true);
//!
//! let mut carousel = Carousel::new(scheduler.handle(), config);
//! carousel.mount(320.0).unwrap();
//!
//! let slides = vec![
//!     div().key("a").text("1"),
//!     div().key("b").text("2"),
//! ];
//! carousel.render(&slides);
//!
//! // Swipe left by half a page
//! carousel.handle_touch(&mut Event::new(TouchEvent::start(300.0)));
//! carousel.handle_touch(&mut Event::new(TouchEvent::moved(140.0)));
//! carousel.handle_touch(&mut Event::new(TouchEvent::end(140.0)));
//! assert_eq!(carousel.current_page(), 1);
//! ```

pub mod carousel;
pub mod config;
pub mod element;
pub mod error;

pub use carousel::gesture::{GestureSession, GestureState, DRAG_THRESHOLD_PERCENT};
pub use carousel::indicator::PageIndicator;
pub use carousel::page_state::{LocalPageState, PageIndexStore, PageState};
pub use carousel::track::{CarouselHandle, TrackStyle, Transition};
pub use carousel::{Carousel, AUTO_PAGE_INTERVAL};
pub use config::{CarouselClasses, CarouselConfig};
pub use element::{div, li, ul, Element};
pub use error::{Result, WidgetError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::carousel::indicator::PageIndicator;
    pub use crate::carousel::page_state::{PageIndexStore, PageState};
    pub use crate::carousel::track::{CarouselHandle, Transition};
    pub use crate::carousel::Carousel;
    pub use crate::config::CarouselConfig;
    pub use crate::element::{div, li, ul, Element};
}
