//! The editing session: selection state, tools and pointer handling

use crate::error::EditorError;
use crate::stamp::Stamp;
use crate::stroke::{PointerAction, Stroke};
use crate::tile_editor::{save_draft, DraftTarget, TileDraft};
use isomap_autotile::{
    add_demo_tiles, erase_autotile, paint_autotile, AutotileBrush, AutotileConfig,
};
use isomap_core::{Cell, CellCoord, FillOutcome, LayerStack, TileCatalog, DEFAULT_FILL_LIMIT};
use isomap_project::{
    EditorSettings, ImportedProject, LocalWorkspace, ProjectPayload, ProjectStore, Tool,
    WorkspaceState,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Editor state between input events.
///
/// Every operation runs to completion on the active layer. Writes to a locked
/// layer are ignored.
#[derive(Debug)]
pub struct EditorSession<R = SmallRng> {
    pub catalog: TileCatalog,
    pub layers: LayerStack,
    pub autotile: AutotileConfig,
    pub brush: AutotileBrush,
    pub tool: Tool,
    /// Tileset that painting, sampling and the randomized brush use
    pub tileset: String,
    pub selected_tile: Option<u32>,
    pub color_index: usize,
    /// Paint a random tile matching `tile_filter` and `tile_search`
    pub randomize_brush: bool,
    pub tile_filter: Option<String>,
    pub tile_search: String,
    pub stamp: Option<Stamp>,
    pub fill_limit: usize,
    pub show_grid: bool,
    stroke: Stroke,
    rng: R,
}

impl EditorSession<SmallRng> {
    /// A fresh session with the built-in tilesets
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }
}

impl Default for EditorSession<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> EditorSession<R> {
    /// A fresh session drawing randomness from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self::from_state(WorkspaceState::default(), &EditorSettings::default(), rng)
    }

    /// Restore a session from stored state and settings
    pub fn from_state(state: WorkspaceState, settings: &EditorSettings, rng: R) -> Self {
        let WorkspaceState {
            catalog,
            layers,
            autotile,
        } = state;
        let mut session = Self {
            catalog,
            layers,
            autotile,
            brush: AutotileBrush::new(),
            tool: Tool::Brush,
            tileset: String::new(),
            selected_tile: None,
            color_index: 0,
            randomize_brush: false,
            tile_filter: None,
            tile_search: String::new(),
            stamp: None,
            fill_limit: DEFAULT_FILL_LIMIT,
            show_grid: true,
            stroke: Stroke::default(),
            rng,
        };
        session.apply_settings(settings);
        session
    }

    pub fn apply_settings(&mut self, settings: &EditorSettings) {
        self.tileset = if self.catalog.tileset(&settings.tileset).is_some() {
            settings.tileset.clone()
        } else {
            self.catalog
                .names()
                .next()
                .unwrap_or(settings.tileset.as_str())
                .to_string()
        };
        self.tool = settings.tool;
        self.color_index = settings.color_index;
        self.brush.group = settings.auto_group.clone();
        self.brush.active = settings.autotile_enabled;
        self.randomize_brush = settings.randomize_brush;
        self.show_grid = settings.show_grid;
        self.fill_limit = settings.fill_limit;
    }

    /// Copy session choices into `settings`, keeping its other fields
    pub fn store_settings(&self, settings: &mut EditorSettings) {
        settings.tileset = self.tileset.clone();
        settings.tool = self.tool;
        settings.color_index = self.color_index;
        settings.auto_group = self.brush.group.clone();
        settings.autotile_enabled = self.brush.active;
        settings.randomize_brush = self.randomize_brush;
        settings.show_grid = self.show_grid;
        settings.fill_limit = self.fill_limit;
    }

    // ─── Selection ────────────────────────────────────────────────────────────

    /// Switch tileset. Unknown names are refused.
    pub fn select_tileset(&mut self, name: &str) -> bool {
        if self.catalog.tileset(name).is_none() {
            return false;
        }
        if self.tileset != name {
            self.tileset = name.to_string();
            self.selected_tile = None;
        }
        true
    }

    /// Declare a tileset (grassland palette) and switch to it
    pub fn add_tileset(&mut self, name: &str) {
        self.catalog.ensure_tileset(name);
        self.select_tileset(name);
    }

    pub fn select_tile(&mut self, index: Option<u32>) {
        self.selected_tile = index;
    }

    /// Current palette color
    pub fn current_color(&self) -> Option<&str> {
        self.catalog
            .tileset(&self.tileset)?
            .palette_color(self.color_index)
    }

    // ─── Single-cell operations ───────────────────────────────────────────────

    /// Paint with the brush at `coord`.
    ///
    /// Stamp first, then autotile, then the selected tile, then the current
    /// color. Returns whether anything was written.
    pub fn paint(&mut self, coord: CellCoord) -> bool {
        let Some(board) = self.layers.active_mut().board_mut() else {
            return false;
        };

        if let Some(stamp) = &self.stamp {
            for (cell_coord, cell) in stamp.cells(coord) {
                board.set(cell_coord, cell);
            }
            return true;
        }

        if let Some(key) = self.brush.active_key(&self.tileset) {
            let ctx = self.autotile.context(&self.catalog);
            return paint_autotile(board, coord, key, &ctx, &mut self.rng);
        }

        if let Some(selected) = self.selected_tile {
            let index = if self.randomize_brush {
                let candidates = self
                    .catalog
                    .tileset(&self.tileset)
                    .map(|set| set.search(self.tile_filter.as_deref(), &self.tile_search))
                    .unwrap_or_default();
                if candidates.is_empty() {
                    selected
                } else {
                    candidates[self.rng.gen_range(0..candidates.len())]
                }
            } else {
                selected
            };
            board.set(coord, Cell::tile(self.tileset.as_str(), index));
            return true;
        }

        let color = self
            .catalog
            .tileset(&self.tileset)
            .and_then(|set| set.palette_color(self.color_index));
        match color {
            Some(color) => {
                board.set(coord, Cell::color(color));
                true
            }
            None => false,
        }
    }

    /// Clear `coord`. With auto-tiling on, its neighbors are re-resolved.
    pub fn erase(&mut self, coord: CellCoord) -> bool {
        let Some(board) = self.layers.active_mut().board_mut() else {
            return false;
        };
        if self.brush.active && !self.brush.group.is_empty() {
            let ctx = self.autotile.context(&self.catalog);
            erase_autotile(board, coord, &self.brush.group, &ctx, &mut self.rng)
        } else {
            board.remove(coord).is_some()
        }
    }

    /// Flood fill from `coord` with the selected tile or the current color
    pub fn fill(&mut self, coord: CellCoord) -> FillOutcome {
        let replacement = match self.selected_tile {
            Some(index) => Cell::tile(self.tileset.as_str(), index),
            None => match self.current_color() {
                Some(color) => Cell::color(color),
                None => return FillOutcome::Unchanged,
            },
        };
        let limit = self.fill_limit;
        self.layers
            .active_mut()
            .flood_fill(coord, &replacement, limit)
    }

    /// Pick up the tile or color at `coord`
    pub fn sample(&mut self, coord: CellCoord) {
        match self.layers.active().get(coord).cloned() {
            Some(Cell::Tile(tile)) => {
                self.tileset = tile.tileset;
                self.selected_tile = Some(tile.index);
            }
            Some(Cell::Color { color }) => {
                self.selected_tile = None;
                let position = self
                    .catalog
                    .tileset(&self.tileset)
                    .and_then(|set| set.palette.iter().position(|c| *c == color));
                if let Some(position) = position {
                    self.color_index = position;
                }
            }
            None => self.selected_tile = None,
        }
    }

    // ─── Pointer strokes ──────────────────────────────────────────────────────

    /// Start a stroke at `coord` and act on it
    pub fn pointer_down(&mut self, coord: CellCoord, action: PointerAction) -> bool {
        self.stroke.begin(action, coord);
        match action {
            PointerAction::Sample => {
                self.sample(coord);
                false
            }
            PointerAction::Secondary => self.erase(coord),
            PointerAction::Primary => match self.tool {
                Tool::Brush => self.paint(coord),
                Tool::Eraser => self.erase(coord),
                Tool::Fill => matches!(self.fill(coord), FillOutcome::Filled(_)),
                Tool::Eyedropper => {
                    self.sample(coord);
                    false
                }
            },
        }
    }

    /// Drag into `coord`. Cells already visited in this stroke are skipped,
    /// and fill and sampling only act on press.
    pub fn pointer_move(&mut self, coord: CellCoord) -> bool {
        let Some(action) = self.stroke.action() else {
            return false;
        };
        if !self.stroke.enter(coord) {
            return false;
        }
        match action {
            PointerAction::Sample => false,
            PointerAction::Secondary => self.erase(coord),
            PointerAction::Primary => match self.tool {
                Tool::Brush => self.paint(coord),
                Tool::Eraser => self.erase(coord),
                Tool::Fill | Tool::Eyedropper => false,
            },
        }
    }

    pub fn pointer_up(&mut self) {
        self.stroke.end();
    }

    // ─── Tile authoring ───────────────────────────────────────────────────────

    /// Save a pixel-editor draft into the current tileset.
    ///
    /// A newly added tile becomes the selected tile.
    pub fn save_tile(&mut self, target: DraftTarget, draft: TileDraft) -> Result<u32, EditorError> {
        let index = save_draft(&mut self.catalog, &self.tileset, target, draft)?;
        if target == DraftTarget::Add {
            self.selected_tile = Some(index);
        }
        Ok(index)
    }

    /// Draft for editing the selected tile, or a blank one when none is selected
    pub fn draft_for_selected(&self, size: u32) -> TileDraft {
        self.selected_tile
            .and_then(|index| self.catalog.tile(&self.tileset, index))
            .map(TileDraft::from_tile)
            .unwrap_or_else(|| TileDraft::blank(size))
    }

    /// Append the sixteen demo mask tiles to the current tileset
    pub fn add_demo_tiles(&mut self, size: u32) -> Result<Range<u32>, EditorError> {
        Ok(add_demo_tiles(&mut self.catalog, &self.tileset, size)?)
    }

    // ─── Persistence ──────────────────────────────────────────────────────────

    pub fn export_payload(&self) -> Result<serde_json::Value, EditorError> {
        Ok(ProjectPayload::new(&self.layers, &self.catalog).to_value()?)
    }

    /// Replace layers and tiles from a payload. On error nothing changes.
    pub fn import_payload(&mut self, payload: &serde_json::Value) -> Result<(), EditorError> {
        let imported = ImportedProject::from_value(payload)?;
        let mut layers = self.layers.clone();
        let mut catalog = self.catalog.clone();
        imported.apply(&mut layers, &mut catalog)?;
        self.layers = layers;
        self.catalog = catalog;
        if self.catalog.tileset(&self.tileset).is_none() {
            self.tileset = self.catalog.names().next().unwrap_or_default().to_string();
        }
        self.selected_tile = None;
        Ok(())
    }

    pub fn save_project(&self, store: &mut impl ProjectStore, id: &str) -> Result<(), EditorError> {
        let payload = self.export_payload()?;
        store.save(id, &payload)?;
        Ok(())
    }

    pub fn load_project(&mut self, store: &impl ProjectStore, id: &str) -> Result<(), EditorError> {
        let payload = store.load(id)?;
        self.import_payload(&payload)
    }

    /// Write the working state to the local workspace
    pub fn save_workspace(&self, workspace: &LocalWorkspace) -> Result<(), EditorError> {
        workspace.save_sets(&self.catalog)?;
        workspace.save_tiles(&self.catalog)?;
        workspace.save_layers(&self.layers)?;
        workspace.save_rules(&self.autotile.rules)?;
        workspace.save_templates(&self.autotile.templates)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditorSession<SmallRng> {
        EditorSession::with_rng(SmallRng::seed_from_u64(0))
    }

    #[test]
    fn test_color_paint_wraps_palette() {
        let mut session = session();
        session.color_index = 5;
        assert!(session.paint(CellCoord::new(0, 0)));
        assert_eq!(
            session.layers.active().get(CellCoord::new(0, 0)),
            Some(&Cell::color("#378b29"))
        );
    }

    #[test]
    fn test_locked_layer_is_untouched() {
        let mut session = session();
        session.layers.active_mut().locked = true;
        assert!(!session.paint(CellCoord::new(0, 0)));
        assert!(!session.erase(CellCoord::new(0, 0)));
        assert_eq!(session.fill(CellCoord::new(0, 0)), FillOutcome::Unchanged);
        assert!(session.layers.active().cells().is_empty());
    }

    #[test]
    fn test_erase_missing_cell() {
        let mut session = session();
        assert!(!session.erase(CellCoord::new(3, 3)));
    }

    #[test]
    fn test_sample() {
        let mut session = session();
        session.layers.active_mut().set_cell(CellCoord::new(0, 0), Cell::tile("desert", 4));
        session.layers.active_mut().set_cell(CellCoord::new(0, 1), Cell::color("#2f7a24"));

        session.sample(CellCoord::new(0, 0));
        assert_eq!(session.tileset, "desert");
        assert_eq!(session.selected_tile, Some(4));

        session.select_tileset("grassland");
        session.sample(CellCoord::new(0, 1));
        assert_eq!(session.selected_tile, None);
        assert_eq!(session.color_index, 2);

        session.selected_tile = Some(1);
        session.sample(CellCoord::new(9, 9));
        assert_eq!(session.selected_tile, None);
    }

    #[test]
    fn test_settings_round_trip() {
        let mut settings = EditorSettings {
            tileset: "cyberpunk".into(),
            tool: Tool::Eraser,
            autotile_enabled: true,
            auto_group: "ground".into(),
            ..Default::default()
        };
        let session = EditorSession::from_state(
            WorkspaceState::default(),
            &settings,
            SmallRng::seed_from_u64(1),
        );
        assert_eq!(session.tileset, "cyberpunk");
        assert!(session.brush.active_key("cyberpunk").is_some());

        settings.tileset = "unknown".into();
        let session = EditorSession::from_state(
            WorkspaceState::default(),
            &settings,
            SmallRng::seed_from_u64(1),
        );
        assert_eq!(session.tileset, "grassland");

        let mut stored = EditorSettings::default();
        session.store_settings(&mut stored);
        assert_eq!(stored.tool, Tool::Eraser);
    }
}
