//! Layers and the ordered layer stack

use crate::board::{Board, FillOutcome};
use crate::cell::{Cell, CellCoord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named board with visibility, lock state and opacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LayerRecord")]
pub struct Layer {
    pub id: String,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    opacity: f32,
    cells: Board,
}

#[derive(Deserialize)]
struct LayerRecord {
    id: String,
    name: String,
    visible: bool,
    locked: bool,
    opacity: f32,
    cells: Board,
}

impl From<LayerRecord> for Layer {
    fn from(record: LayerRecord) -> Self {
        let mut layer = Self::with_id(record.id, record.name).with_cells(record.cells);
        layer.visible = record.visible;
        layer.locked = record.locked;
        layer.set_opacity(record.opacity);
        layer
    }
}

impl Layer {
    /// Create a new empty, visible, unlocked layer with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(format!("layer-{}", Uuid::new_v4()), name)
    }

    /// Create a new empty layer with a known id
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            visible: true,
            locked: false,
            opacity: 1.0,
            cells: Board::new(),
        }
    }

    /// Replace the layer's cells
    pub fn with_cells(mut self, cells: Board) -> Self {
        self.cells = cells;
        self
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set opacity, clamped to `[0, 1]`. Non-finite values reset to fully opaque.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
    }

    pub fn cells(&self) -> &Board {
        &self.cells
    }

    /// Mutable access to the cells, or `None` when the layer is locked
    pub fn board_mut(&mut self) -> Option<&mut Board> {
        if self.locked {
            None
        } else {
            Some(&mut self.cells)
        }
    }

    pub fn get(&self, coord: CellCoord) -> Option<&Cell> {
        self.cells.get(coord)
    }

    /// Write a cell. Returns `false` when the layer is locked.
    pub fn set_cell(&mut self, coord: CellCoord, cell: Cell) -> bool {
        match self.board_mut() {
            Some(board) => {
                board.set(coord, cell);
                true
            }
            None => false,
        }
    }

    /// Clear a cell. Returns `true` only if something was removed.
    pub fn erase(&mut self, coord: CellCoord) -> bool {
        self.board_mut()
            .map(|board| board.remove(coord).is_some())
            .unwrap_or(false)
    }

    /// Flood fill on this layer. A locked layer is left unchanged.
    pub fn flood_fill(&mut self, seed: CellCoord, replacement: &Cell, limit: usize) -> FillOutcome {
        match self.board_mut() {
            Some(board) => board.flood_fill(seed, replacement, limit),
            None => FillOutcome::Unchanged,
        }
    }
}

/// A cell handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCell<'a> {
    pub layer_index: usize,
    pub opacity: f32,
    pub coord: CellCoord,
    pub cell: &'a Cell,
}

/// Ordered layers, bottom first. Always holds at least one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    layers: Vec<Layer>,
    active: usize,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack {
    /// A stack with a single empty "Layer 1"
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::new("Layer 1")],
            active: 0,
        }
    }

    /// Build a stack from existing layers. Returns `None` for an empty list.
    pub fn from_layers(layers: Vec<Layer>) -> Option<Self> {
        if layers.is_empty() {
            None
        } else {
            Some(Self { layers, active: 0 })
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Never true: a stack keeps at least one layer
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Select the active layer, clamped into range
    pub fn set_active(&mut self, index: usize) {
        self.active = index.min(self.layers.len() - 1);
    }

    pub fn active(&self) -> &Layer {
        &self.layers[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.active]
    }

    /// Append a new empty layer on top and make it active
    pub fn add_layer(&mut self) -> usize {
        let name = format!("Layer {}", self.layers.len() + 1);
        self.layers.push(Layer::new(name));
        self.active = self.layers.len() - 1;
        self.active
    }

    /// Remove a layer. The last remaining layer cannot be removed.
    pub fn remove_layer(&mut self, index: usize) -> Option<Layer> {
        if self.layers.len() <= 1 || index >= self.layers.len() {
            return None;
        }
        let removed = self.layers.remove(index);
        if self.active > index || self.active >= self.layers.len() {
            self.active = self.active.saturating_sub(1);
        }
        Some(removed)
    }

    /// Move a layer to a new position, keeping the same layer active
    pub fn move_layer(&mut self, from: usize, to: usize) -> bool {
        if from >= self.layers.len() || to >= self.layers.len() || from == to {
            return false;
        }
        let active_id = self.layers[self.active].id.clone();
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        self.active = self
            .layers
            .iter()
            .position(|l| l.id == active_id)
            .unwrap_or(0);
        true
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        self.move_layer(index, index + 1)
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        index > 0 && self.move_layer(index, index - 1)
    }

    /// Replace all layers at once. An empty list is rejected and leaves the stack unchanged.
    pub fn replace(&mut self, layers: Vec<Layer>) -> bool {
        if layers.is_empty() {
            return false;
        }
        self.layers = layers;
        self.active = self.active.min(self.layers.len() - 1);
        true
    }

    /// Cells of every visible layer, bottom layer first
    pub fn render_cells(&self) -> impl Iterator<Item = RenderCell<'_>> {
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.visible)
            .flat_map(|(layer_index, layer)| {
                layer.cells.iter().map(move |(coord, cell)| RenderCell {
                    layer_index,
                    opacity: layer.opacity,
                    coord,
                    cell,
                })
            })
    }

    pub fn into_layers(self) -> Vec<Layer> {
        self.layers
    }
}
