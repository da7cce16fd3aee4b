//! Error types for scene manifests and asset loading.

use thiserror::Error;

/// Result type for scene tree operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised while parsing or walking a scene tree.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("manifest parse error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("node '{node}' references unknown material '{material}'")]
    UnknownMaterial { node: String, material: String },

    #[error("invalid colour '{0}'")]
    InvalidColor(String),
}

/// Errors raised while fetching the hero subject.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("fetch of {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}
