//! Export/import payload
//!
//! The exported shape is
//! `{ layers: [{ id, name, visible, locked, opacity, cells }], tiles: { set: [bitmap] } }`.
//! Import also accepts the single-board formats written by earlier versions:
//! `{ board: { "i,j": cell } }`, a bare `{ "i,j": cell }` map, and bare color
//! strings as cells.

use crate::error::ProjectError;
use isomap_core::{
    Board, Cell, CellCoord, Layer, LayerStack, TileBitmap, TileCatalog, BUILTIN_PALETTES,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Borrowed view of a project, ready to serialize
#[derive(Debug, Serialize)]
pub struct ProjectPayload<'a> {
    pub layers: &'a [Layer],
    pub tiles: BTreeMap<&'a str, &'a [TileBitmap]>,
}

impl<'a> ProjectPayload<'a> {
    pub fn new(layers: &'a LayerStack, catalog: &'a TileCatalog) -> Self {
        let tiles = catalog
            .tilesets()
            .iter()
            .map(|set| (set.name.as_str(), set.tiles()))
            .collect();
        Self {
            layers: layers.layers(),
            tiles,
        }
    }

    pub fn to_value(&self) -> Result<Value, ProjectError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A fully validated import, not yet applied
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedProject {
    /// `None` when the payload carried no layers; the current layers are kept
    pub layers: Option<Vec<Layer>>,
    pub tiles: BTreeMap<String, Vec<TileBitmap>>,
}

impl ImportedProject {
    /// Parse and validate a JSON string
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Validate a payload without touching any editor state
    pub fn from_value(value: &Value) -> Result<Self, ProjectError> {
        let object = value
            .as_object()
            .ok_or_else(|| ProjectError::InvalidFormat("payload is not an object".into()))?;

        let tiles = match object.get("tiles") {
            Some(tiles) => parse_tiles(tiles)?,
            None => BTreeMap::new(),
        };
        let layers = parse_layers(value)?;
        Ok(Self { layers, tiles })
    }

    /// Replace editor state with this import.
    ///
    /// Every declared tileset gets the imported tiles, or an empty list when
    /// the payload has none for it. Tilesets only present in the payload are
    /// declared.
    pub fn apply(self, stack: &mut LayerStack, catalog: &mut TileCatalog) -> Result<(), ProjectError> {
        let Self { layers, mut tiles } = self;

        let declared: Vec<String> = catalog.names().map(str::to_string).collect();
        for name in &declared {
            let imported = tiles.remove(name).unwrap_or_default();
            if let Some(set) = catalog.tileset_mut(name) {
                set.set_tiles(imported)?;
            }
        }
        for (name, imported) in tiles {
            catalog.ensure_tileset(&name).set_tiles(imported)?;
        }

        if let Some(layers) = layers {
            stack.replace(layers);
        }
        Ok(())
    }
}

/// Parse tiles keyed by tileset name. Every bitmap must be valid.
pub fn parse_tiles(value: &Value) -> Result<BTreeMap<String, Vec<TileBitmap>>, ProjectError> {
    let object = value
        .as_object()
        .ok_or_else(|| ProjectError::InvalidFormat("tiles is not an object".into()))?;

    let mut tiles = BTreeMap::new();
    for (name, list) in object {
        let bitmaps: Vec<TileBitmap> = serde_json::from_value(list.clone())?;
        for bitmap in &bitmaps {
            bitmap.validate()?;
        }
        tiles.insert(name.clone(), bitmaps);
    }
    Ok(tiles)
}

/// Parse layers from a layered payload, a bare layer array, or a legacy board.
///
/// Returns `None` when there is nothing to replace the current layers with.
pub fn parse_layers(value: &Value) -> Result<Option<Vec<Layer>>, ProjectError> {
    let list = match value {
        Value::Array(list) => Some(list),
        Value::Object(object) => match object.get("layers") {
            Some(Value::Array(list)) => Some(list),
            Some(_) => {
                return Err(ProjectError::InvalidFormat("layers is not an array".into()));
            }
            None => None,
        },
        _ => return Err(ProjectError::InvalidFormat("expected layers or a board".into())),
    };

    if let Some(list) = list {
        let layers = list.iter().map(parse_layer).collect::<Result<Vec<_>, _>>()?;
        return Ok((!layers.is_empty()).then_some(layers));
    }

    // Single-board formats from before layers existed.
    let board = match value.get("board") {
        Some(Value::Object(board)) => board,
        Some(_) => return Err(ProjectError::InvalidFormat("board is not an object".into())),
        None => value
            .as_object()
            .ok_or_else(|| ProjectError::InvalidFormat("board is not an object".into()))?,
    };
    let cells = parse_cells(board, true);
    Ok(Some(vec![Layer::new("Layer 1").with_cells(cells)]))
}

fn parse_layer(value: &Value) -> Result<Layer, ProjectError> {
    let object = value
        .as_object()
        .ok_or_else(|| ProjectError::InvalidFormat("layer is not an object".into()))?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .unwrap_or("Layer");
    let mut layer = match object.get("id").and_then(id_string) {
        Some(id) => Layer::with_id(id, name),
        None => Layer::new(name),
    };
    layer.visible = object.get("visible").and_then(Value::as_bool).unwrap_or(true);
    layer.locked = object.get("locked").and_then(Value::as_bool).unwrap_or(false);
    layer.set_opacity(
        object
            .get("opacity")
            .and_then(Value::as_f64)
            .map_or(1.0, |o| o as f32),
    );

    let cells = match object.get("cells") {
        Some(Value::Object(cells)) => parse_cells(cells, false),
        Some(Value::Null) | None => Board::new(),
        Some(_) => return Err(ProjectError::InvalidFormat("cells is not an object".into())),
    };
    Ok(layer.with_cells(cells))
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Malformed keys and cells are skipped
fn parse_cells(cells: &Map<String, Value>, legacy: bool) -> Board {
    let mut board = Board::new();
    for (key, value) in cells {
        let Ok(coord) = key.parse::<CellCoord>() else {
            log::warn!("skipping cell with malformed key '{}'", key);
            continue;
        };
        match parse_cell(value, legacy) {
            Some(cell) => {
                board.set(coord, cell);
            }
            None => log::warn!("skipping unreadable cell at {}", coord),
        }
    }
    board
}

fn parse_cell(value: &Value, legacy: bool) -> Option<Cell> {
    if legacy {
        if let Value::String(color) = value {
            return Some(Cell::color(color.clone()));
        }
    }
    match value.get("type")?.as_str()? {
        "tile" => {
            let tileset = value.get("tileSet")?.as_str()?;
            if tileset.is_empty() {
                return None;
            }
            // Old boards only ever referenced the built-in sets.
            if legacy && !BUILTIN_PALETTES.iter().any(|(name, _)| *name == tileset) {
                return None;
            }
            let index = u32::try_from(value.get("tileIndex")?.as_u64()?).ok()?;
            Some(Cell::tile(tileset, index))
        }
        "color" => {
            let color = value.get("color")?.as_str()?;
            (!color.is_empty()).then(|| Cell::color(color))
        }
        _ => None,
    }
}
