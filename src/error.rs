//! Error types for FoodSwipe

use thiserror::Error;

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong below the presentation layer.
///
/// Only `Validation` is surfaced by the mutation API. The rest are produced
/// by persistence and image helpers and are usually absorbed into a safe
/// default by the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Recipe rejected before it was stored (missing title or image)
    #[error("Invalid recipe: {0}")]
    Validation(String),

    /// File read/write error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted file could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Image payload could not be decoded or encoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// True when the error is a rejected recipe the user can fix
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
