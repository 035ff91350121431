use isomap_core::TileError;
use isomap_project::{ProjectError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Tile error: {0}")]
    Tile(#[from] TileError),
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Unknown tileset '{0}'")]
    UnknownTileset(String),
}
