//! Isometric pixel-tile map editing
//!
//! This crate re-exports the isomap workspace:
//! - [`isomap_core`]: cells, boards, layers and the tile catalog
//! - [`isomap_autotile`]: masks, rule tables, templates and the autotile applier
//! - `isomap_project` (feature `project`): export/import, local workspace, project stores and settings
//! - `isomap_editor` (feature `editor`): the editing session
//!
//! Most users only need the prelude:
//!
//! ```rust,ignore
//! use isomap::prelude::*;
//!
//! let mut session = EditorSession::new();
//! session.add_demo_tiles(16)?;
//! session.brush.select(DEMO_GROUP);
//! session.paint(CellCoord::new(0, 0));
//! ```

pub use isomap_autotile;
pub use isomap_core;
#[cfg(feature = "editor")]
pub use isomap_editor;
#[cfg(feature = "project")]
pub use isomap_project;

pub mod prelude {
    pub use isomap_autotile::{
        erase_autotile, paint_autotile, AutotileBrush, AutotileConfig, AutotileContext, GroupKey,
        Mask, Role, RuleTable, Template, DEMO_GROUP,
    };
    pub use isomap_core::{
        Board, Cell, CellCoord, FillOutcome, Layer, LayerStack, TileBitmap, TileCatalog, TileRef,
        Tileset,
    };

    #[cfg(feature = "editor")]
    pub use isomap_editor::{
        DraftTarget, EditorError, EditorSession, PointerAction, Stamp, TileDraft,
    };
    #[cfg(feature = "project")]
    pub use isomap_project::{
        EditorSettings, FileStore, ImportedProject, LocalWorkspace, MemoryStore, ProjectPayload,
        ProjectStore, Tool,
    };
}
