//! Error types for setup and configuration
//!
//! Only construction can fail. Once a `SimulationState` exists, ticking and
//! rendering are infallible.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("layer {index} has no frames")]
    EmptyLayer { index: usize },

    #[error("viewport must have a positive area, got {width}x{height}")]
    EmptyViewport { width: f32, height: f32 },

    #[error("no image loaded for `{0}`")]
    MissingAsset(String),

    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}
