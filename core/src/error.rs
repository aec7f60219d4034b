//! Error types for card configuration and user input

use thiserror::Error;

/// Errors from user-facing operations on the card
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("unknown sound option {key:?}")]
    UnknownSound { key: String },
}

/// Errors while loading or validating the card configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse card TOML")]
    ParseToml(#[source] toml::de::Error),

    #[error("invalid {palette} color {value:?}")]
    InvalidColor {
        palette: &'static str,
        value: String,
    },

    #[error("{palette} palette is empty")]
    EmptyPalette { palette: &'static str },

    #[error("invalid card date {value:?}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },

    #[error("reveal interval must be at least 1 ms")]
    ZeroInterval,
}
