//! Persistence for isomap projects
//!
//! - [`payload`]: export/import of layers and tiles, including older single-board files
//! - [`workspace`]: the local working state, hydrated key by key on startup
//! - [`store`]: named project blobs behind the [`ProjectStore`] trait
//! - [`settings`]: editor settings in the platform config directory
//!
//! Loading never applies partial data: a payload or stored key is validated in
//! full before it replaces anything.

pub mod error;
pub mod payload;
pub mod settings;
pub mod store;
pub mod workspace;

pub use error::{ProjectError, SettingsError, StoreError};
pub use payload::{parse_layers, parse_tiles, ImportedProject, ProjectPayload};
pub use settings::{EditorSettings, Tool};
pub use store::{validate_project_id, FileStore, MemoryStore, ProjectStore};
pub use workspace::{
    LocalWorkspace, WorkspaceState, LAYERS_KEY, RULES_KEY, SETS_KEY, TEMPLATE_KEY, TILES_KEY,
};
