//! Page indicators

use serde::{Deserialize, Serialize};

use crate::config::CarouselClasses;
use crate::element::{div, li, ul, Element};

/// Which page indicator to render after the content
///
/// Deserializes from `"dot"` or `"counter"`; anything else (or nothing)
/// renders no indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum PageIndicator {
    /// No indicator
    #[default]
    None,
    /// One dot per page, the current one selected
    Dot,
    /// "current/total" text
    Counter,
}

impl From<Option<String>> for PageIndicator {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("dot") => PageIndicator::Dot,
            Some("counter") => PageIndicator::Counter,
            _ => PageIndicator::None,
        }
    }
}

impl From<PageIndicator> for Option<String> {
    fn from(value: PageIndicator) -> Self {
        match value {
            PageIndicator::None => None,
            PageIndicator::Dot => Some("dot".into()),
            PageIndicator::Counter => Some("counter".into()),
        }
    }
}

impl PageIndicator {
    /// Render the indicator for `keys.len()` pages with `current` selected
    pub fn render(&self, classes: &CarouselClasses, keys: &[String], current: usize) -> Option<Element> {
        match self {
            PageIndicator::None => None,
            PageIndicator::Dot => Some(
                ul().class(&classes.dots).children_from(keys.iter().enumerate().map(|(i, key)| {
                    let dot = li().class(&classes.dot).key(format!("dot_{}", key));
                    if i == current {
                        dot.class(&classes.dot_selected)
                    } else {
                        dot
                    }
                })),
            ),
            PageIndicator::Counter => Some(
                div()
                    .class(&classes.counter)
                    .text(counter_text(current, keys.len())),
            ),
        }
    }
}

/// Counter label for a 0-based page, e.g. `"1/4"`
///
/// With no pages there is nothing to count, so the label is `"0/0"`.
pub fn counter_text(current: usize, count: usize) -> String {
    if count == 0 {
        return "0/0".to_string();
    }
    format!("{}/{}", current.min(count - 1) + 1, count)
}
