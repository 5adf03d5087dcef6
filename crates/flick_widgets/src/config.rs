//! Carousel configuration
//!
//! Every option is optional. Configs are built in code with the builder
//! methods or loaded from TOML:
//!
//! ```toml
//! page_indicator = "dot"
//! class_name = "hero"
//! auto_paging = true
//! transition_duration = 0.3
//! need_height_resizing = false
//!
//! [classes]
//! wrapper = "hero__wrapper"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::carousel::indicator::PageIndicator;
use crate::error::{Result, WidgetError};

/// Default transition duration in seconds
pub const DEFAULT_TRANSITION_DURATION: f32 = 0.5;

/// Carousel configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Indicator rendered after the content track
    pub page_indicator: PageIndicator,
    /// Extra class appended to the root container
    pub class_name: Option<String>,
    /// Advance one page per auto-paging interval while no gesture is active
    pub auto_paging: bool,
    /// Seconds for the animated track transition
    pub transition_duration: f32,
    /// Collapse non-current pages to zero height
    pub need_height_resizing: bool,
    /// Class names used for each rendered part
    pub classes: CarouselClasses,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            page_indicator: PageIndicator::None,
            class_name: None,
            auto_paging: false,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            need_height_resizing: false,
            classes: CarouselClasses::default(),
        }
    }
}

impl CarouselConfig {
    /// Create a new carousel config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page indicator
    pub fn page_indicator(mut self, indicator: PageIndicator) -> Self {
        self.page_indicator = indicator;
        self
    }

    /// Append a class to the root container
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Enable or disable auto-paging
    pub fn auto_paging(mut self, enabled: bool) -> Self {
        self.auto_paging = enabled;
        self
    }

    /// Set the transition duration in seconds
    pub fn transition_duration(mut self, seconds: f32) -> Self {
        self.transition_duration = seconds;
        self
    }

    /// Collapse non-current pages to zero height
    pub fn need_height_resizing(mut self, enabled: bool) -> Self {
        self.need_height_resizing = enabled;
        self
    }

    /// Override the rendered class names
    pub fn classes(mut self, classes: CarouselClasses) -> Self {
        self.classes = classes;
        self
    }

    /// Parse a config from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CarouselConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        tracing::debug!("Loading carousel config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Check values that parse but cannot be used
    pub fn validate(&self) -> Result<()> {
        if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
            return Err(WidgetError::InvalidConfig(format!(
                "transition_duration must be a non-negative number of seconds, got {}",
                self.transition_duration
            )));
        }
        Ok(())
    }
}

/// Class names for each rendered part of the carousel
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselClasses {
    /// Root container
    pub wrapper: String,
    /// Content track (the element that is translated)
    pub contents: String,
    /// One page
    pub content: String,
    /// Dot indicator list
    pub dots: String,
    /// One dot
    pub dot: String,
    /// The dot of the current page
    pub dot_selected: String,
    /// Counter indicator
    pub counter: String,
    /// Collapsed page height
    pub height_zero: String,
    /// Full page height
    pub height_full: String,
    /// Track height
    pub height_auto: String,
}

impl Default for CarouselClasses {
    fn default() -> Self {
        Self {
            wrapper: "wrapper".into(),
            contents: "contents".into(),
            content: "content".into(),
            dots: "dots".into(),
            dot: "dot".into(),
            dot_selected: "dot--selected".into(),
            counter: "counter".into(),
            height_zero: "h-0".into(),
            height_full: "h-full".into(),
            height_auto: "h-auto".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert_eq!(config.page_indicator, PageIndicator::None);
        assert!(!config.auto_paging);
        assert!(!config.need_height_resizing);
        assert_eq!(config.transition_duration, 0.5);
        assert_eq!(config.classes.dot_selected, "dot--selected");
    }

    #[test]
    fn test_from_toml() {
        let config = CarouselConfig::from_toml_str(
            r#"
            page_indicator = "counter"
            class_name = "hero"
            auto_paging = true
            transition_duration = 0.25

            [classes]
            wrapper = "hero__wrapper"
            "#,
        )
        .unwrap();

        assert_eq!(config.page_indicator, PageIndicator::Counter);
        assert_eq!(config.class_name.as_deref(), Some("hero"));
        assert!(config.auto_paging);
        assert_eq!(config.transition_duration, 0.25);
        assert_eq!(config.classes.wrapper, "hero__wrapper");
        // Unspecified class names keep their defaults
        assert_eq!(config.classes.dots, "dots");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            CarouselConfig::from_toml_str("").unwrap(),
            CarouselConfig::default()
        );
    }

    #[test]
    fn test_unknown_indicator_renders_nothing() {
        let config = CarouselConfig::from_toml_str(r#"page_indicator = "bar""#).unwrap();
        assert_eq!(config.page_indicator, PageIndicator::None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            CarouselConfig::from_toml_str("transition_duration = -1.0"),
            Err(WidgetError::InvalidConfig(_))
        ));
        assert!(matches!(
            CarouselConfig::from_toml_str("auto_paging = \"yes\""),
            Err(WidgetError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            CarouselConfig::load("/nonexistent/flick/carousel.toml"),
            Err(WidgetError::Io(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = CarouselConfig::new()
            .page_indicator(PageIndicator::Dot)
            .class_name("promo")
            .auto_paging(true)
            .transition_duration(1.0)
            .need_height_resizing(true);

        assert_eq!(config.page_indicator, PageIndicator::Dot);
        assert_eq!(config.class_name.as_deref(), Some("promo"));
        assert!(config.auto_paging && config.need_height_resizing);
        assert!(config.validate().is_ok());
    }
}
