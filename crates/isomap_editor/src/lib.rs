//! Editing session for isomap
//!
//! [`EditorSession`] owns the catalog, layers and autotile configuration and
//! turns pointer input into board edits:
//! - brush: stamp, autotile, selected tile (optionally randomized), or palette color
//! - eraser: clears a cell, re-resolving autotile neighbors when auto-tiling is on
//! - fill: bounded flood fill with the selected tile or color
//! - eyedropper: picks up the tile or color under the pointer
//!
//! A drag acts once per cell entered; see [`Stroke`].

pub mod error;
pub mod session;
pub mod stamp;
pub mod stroke;
pub mod tile_editor;

pub use error::EditorError;
pub use session::EditorSession;
pub use stamp::Stamp;
pub use stroke::{PointerAction, Stroke};
pub use tile_editor::{save_draft, DraftTarget, TileDraft, DEFAULT_TILE_SIZE};
