//! Errors raised at the crate's edges: decoding pipelines and loading config.
//!
//! Validation and layout never fail; graph defects are reported as
//! [`crate::validate::Violation`] values instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input is not a well-formed pipeline document.
    #[error("invalid pipeline JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The layout config file could not be parsed.
    #[error("invalid layout config: {0}")]
    Config(#[from] toml::de::Error),

    /// The layout config parsed but holds an unusable value.
    #[error("invalid layout config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
