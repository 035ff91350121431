//! Error types for persistence

use isomap_core::TileError;
use thiserror::Error;

/// Errors from export, import and the local workspace
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid project format: {0}")]
    InvalidFormat(String),
    #[error("Invalid tile: {0}")]
    Tile(#[from] TileError),
}

/// Errors from a project store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid project id '{0}'")]
    InvalidId(String),
    #[error("Project payload must be a JSON object")]
    InvalidPayload,
    #[error("Project '{0}' not found")]
    NotFound(String),
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored project is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the editor settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Could not determine config directory")]
    NoConfigDir,
}
