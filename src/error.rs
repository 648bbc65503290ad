//! Error types
//!
//! Only construction and persistence can fail. Per-frame simulation saturates
//! instead of erroring.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A vehicle profile with out-of-range tuning
    #[error("invalid vehicle profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },

    /// A registry must hold at least one profile
    #[error("vehicle registry is empty")]
    EmptyRegistry,

    /// World bounds must satisfy 0 < rewrap_offset < limit
    #[error("invalid world bounds: limit {limit}, rewrap offset {rewrap_offset}")]
    InvalidBounds { limit: f32, rewrap_offset: f32 },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Physics backend did not produce a live vehicle body
    #[error("physics backend has no live body for the vehicle")]
    MissingBody,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
