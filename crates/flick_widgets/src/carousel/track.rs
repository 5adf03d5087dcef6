//! Content track transform and the imperative carousel handle
//!
//! The track is the element holding every page side by side. Paging is a
//! horizontal translation of the track by whole page widths, so page `p`
//! sits at `translateX(-p*100%)`.
//!
//! [`CarouselHandle`] writes that transform directly, outside the render
//! pass. The widget uses it for per-move drag feedback, and parents receive
//! a clone to move the track themselves.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// CSS property animated by the track transition
pub const TRANSFORM: &str = "transform";

/// Transition applied together with a track transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// Jump immediately (used while a finger is down)
    None,
    /// Animate the transform over `duration_secs`
    Animated { duration_secs: f32 },
}

impl Transition {
    /// Animated transition; negative or non-finite durations become zero
    pub fn animated(duration_secs: f32) -> Self {
        let duration_secs = if duration_secs.is_finite() {
            duration_secs.max(0.0)
        } else {
            0.0
        };
        Transition::Animated { duration_secs }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::None => f.write_str("none"),
            Transition::Animated { duration_secs } => {
                write!(f, "{} {}s", TRANSFORM, duration_secs)
            }
        }
    }
}

/// Translate offset of the track for `page`, in percent of one page width
pub fn page_offset_percent(page: usize) -> i32 {
    let page = i32::try_from(page).unwrap_or(i32::MAX);
    page.saturating_mul(100).saturating_neg()
}

/// Style of the content track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackStyle {
    /// Horizontal translation in percent of one page width
    pub translate_x_percent: i32,
    pub transition: Transition,
}

impl TrackStyle {
    /// Style that shows `page`
    pub fn for_page(page: usize, transition: Transition) -> Self {
        Self {
            translate_x_percent: page_offset_percent(page),
            transition,
        }
    }
}

impl fmt::Display for TrackStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transform: translateX({}%); transition: {}; ",
            self.translate_x_percent, self.transition
        )
    }
}

/// Imperative handle to a carousel's content track
///
/// Clones share the same track. Until the first write the track carries no
/// inline style.
#[derive(Clone, Default)]
pub struct CarouselHandle {
    style: Arc<Mutex<Option<TrackStyle>>>,
}

impl CarouselHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `page` immediately, with the given transition
    pub fn set_translate_x_style_in_carousel(&self, page: usize, transition: Transition) {
        self.apply(TrackStyle::for_page(page, transition));
    }

    /// Translate the track by an arbitrary percentage (drag feedback)
    pub(crate) fn set_translate_x_percent(&self, percent: i32, transition: Transition) {
        self.apply(TrackStyle {
            translate_x_percent: percent,
            transition,
        });
    }

    fn apply(&self, style: TrackStyle) {
        tracing::trace!("track: {}", style);
        *self.style.lock().unwrap_or_else(PoisonError::into_inner) = Some(style);
    }

    /// Current track style, if any has been applied
    pub fn track_style(&self) -> Option<TrackStyle> {
        *self.style.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current track style as an inline style string
    pub fn style_string(&self) -> Option<String> {
        self.track_style().map(|style| style.to_string())
    }

    /// Whether both handles drive the same track
    pub fn ptr_eq(&self, other: &CarouselHandle) -> bool {
        Arc::ptr_eq(&self.style, &other.style)
    }
}

impl fmt::Debug for CarouselHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselHandle")
            .field("style", &self.track_style())
            .finish()
    }
}
