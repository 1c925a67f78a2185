//! Error types for the ucatable domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Engine-level problems
//! (missing references, oversized tables, ...) are *not* errors: they are
//! reported as [`crate::Diagnostic`] values next to a renderable result.
//! This type only covers loading and parsing the model itself.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for model loading and parsing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read model file at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("JSON model parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML model parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid mode '{0}' (expected provided, notProvided or both)")]
    InvalidMode(String),

    #[error("Unknown timing type: {0}")]
    UnknownTimingType(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
