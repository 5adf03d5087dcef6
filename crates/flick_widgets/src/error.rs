//! Widget error types

use thiserror::Error;

/// Widget-related errors
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Failed to read a configuration file
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for this widget
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The auto-paging timer could not be started
    #[error("Timer error: {0}")]
    Timer(#[from] flick_timer::TimerError),
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;
