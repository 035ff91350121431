//! Tile bitmaps, tilesets and the per-project tile catalog

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Largest valid canonical neighbor mask (all four neighbors present)
pub const AUTO_MASK_MAX: u8 = 15;

/// Tilesets every new project starts with, and their palettes
pub const BUILTIN_PALETTES: [(&str, [&str; 4]); 4] = [
    ("grassland", ["#6abe30", "#378b29", "#2f7a24", "#23671b"]),
    ("desert", ["#e0c08f", "#d0a060", "#c09048", "#b08038"]),
    ("swamp", ["#4f704d", "#42633f", "#365432", "#2a4626"]),
    ("cyberpunk", ["#00ffff", "#ff00ff", "#ffff00", "#00aaff"]),
];

/// Errors raised while authoring tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    UnknownTileset(String),
    UnknownTile { tileset: String, index: u32 },
    PixelCount { size: u32, expected: usize, actual: usize },
    MaskOutOfRange(u8),
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::UnknownTileset(name) => write!(f, "unknown tileset '{name}'"),
            TileError::UnknownTile { tileset, index } => {
                write!(f, "tileset '{tileset}' has no tile {index}")
            }
            TileError::PixelCount {
                size,
                expected,
                actual,
            } => write!(
                f,
                "a {size}x{size} tile needs {expected} pixels, got {actual}"
            ),
            TileError::MaskOutOfRange(mask) => {
                write!(f, "auto mask {mask} is outside 0..={AUTO_MASK_MAX}")
            }
        }
    }
}

impl std::error::Error for TileError {}

/// A square pixel-art tile. `None` pixels are transparent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBitmap {
    pub size: u32,
    pub pixels: Vec<Option<String>>,
    /// Auto-tiling group this tile belongs to
    #[serde(rename = "autoGroup", default, skip_serializing_if = "Option::is_none")]
    pub auto_group: Option<String>,
    /// Which of the 16 neighbor configurations this tile canonically draws
    #[serde(rename = "autoMask", default, skip_serializing_if = "Option::is_none")]
    pub auto_mask: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Visual separator inserted between import batches; never painted
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub spacer: bool,
}

impl TileBitmap {
    /// A fully transparent tile
    pub fn blank(size: u32) -> Self {
        Self {
            size,
            pixels: vec![None; (size * size) as usize],
            auto_group: None,
            auto_mask: None,
            name: None,
            tags: Vec::new(),
            spacer: false,
        }
    }

    /// Build a tile from pixels, checking the pixel count
    pub fn from_pixels(size: u32, pixels: Vec<Option<String>>) -> Result<Self, TileError> {
        let tile = Self {
            size,
            pixels,
            ..Self::blank(0)
        };
        tile.validate()?;
        Ok(tile)
    }

    /// Set the auto-tiling group. An empty name clears it.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        let group = group.into();
        self.auto_group = if group.is_empty() { None } else { Some(group) };
        self
    }

    pub fn with_mask(mut self, mask: u8) -> Result<Self, TileError> {
        if mask > AUTO_MASK_MAX {
            return Err(TileError::MaskOutOfRange(mask));
        }
        self.auto_mask = Some(mask);
        Ok(self)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&str> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels
            .get((y * self.size + x) as usize)
            .and_then(|p| p.as_deref())
    }

    /// Check pixel count and mask range
    pub fn validate(&self) -> Result<(), TileError> {
        let expected = (self.size as usize) * (self.size as usize);
        if self.pixels.len() != expected {
            return Err(TileError::PixelCount {
                size: self.size,
                expected,
                actual: self.pixels.len(),
            });
        }
        match self.auto_mask {
            Some(mask) if mask > AUTO_MASK_MAX => Err(TileError::MaskOutOfRange(mask)),
            _ => Ok(()),
        }
    }

    /// Whether this tile's name or tags contain `needle` (case-insensitive)
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let name = self.name.as_deref().unwrap_or_default().to_lowercase();
        let tags = self.tags.join(" ").to_lowercase();
        name.contains(&needle) || tags.contains(&needle)
    }
}

/// A named tile collection plus its color palette.
///
/// Tiles are never removed or reordered: a tile's index is its identity and is
/// referenced by painted cells and rule tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TilesetRecord")]
pub struct Tileset {
    pub name: String,
    pub palette: Vec<String>,
    #[serde(default)]
    tiles: Vec<TileBitmap>,
}

#[derive(Deserialize)]
struct TilesetRecord {
    name: String,
    palette: Vec<String>,
    #[serde(default)]
    tiles: Vec<TileBitmap>,
}

impl TryFrom<TilesetRecord> for Tileset {
    type Error = TileError;

    fn try_from(record: TilesetRecord) -> Result<Self, TileError> {
        let mut set = Self::new(record.name, record.palette);
        set.set_tiles(record.tiles)?;
        Ok(set)
    }
}

impl Tileset {
    pub fn new(name: impl Into<String>, palette: Vec<String>) -> Self {
        Self {
            name: name.into(),
            palette,
            tiles: Vec::new(),
        }
    }

    pub fn tiles(&self) -> &[TileBitmap] {
        &self.tiles
    }

    pub fn tile(&self, index: u32) -> Option<&TileBitmap> {
        self.tiles.get(index as usize)
    }

    pub fn tile_count(&self) -> u32 {
        self.tiles.len() as u32
    }

    /// Append a tile and return its index
    pub fn push_tile(&mut self, tile: TileBitmap) -> Result<u32, TileError> {
        tile.validate()?;
        self.tiles.push(tile);
        Ok(self.tiles.len() as u32 - 1)
    }

    /// Replace a tile's content in place, keeping its index
    pub fn replace_tile(&mut self, index: u32, tile: TileBitmap) -> Result<(), TileError> {
        tile.validate()?;
        let slot = self
            .tiles
            .get_mut(index as usize)
            .ok_or_else(|| TileError::UnknownTile {
                tileset: self.name.clone(),
                index,
            })?;
        *slot = tile;
        Ok(())
    }

    /// Replace every tile at once, e.g. when hydrating from storage
    pub fn set_tiles(&mut self, tiles: Vec<TileBitmap>) -> Result<(), TileError> {
        for tile in &tiles {
            tile.validate()?;
        }
        self.tiles = tiles;
        Ok(())
    }

    /// Palette color at `index`, wrapping around the palette length
    pub fn palette_color(&self, index: usize) -> Option<&str> {
        if self.palette.is_empty() {
            return None;
        }
        self.palette
            .get(index % self.palette.len())
            .map(String::as_str)
    }

    /// Canonical mask -> tile index for one group. Later tiles win on duplicate masks.
    pub fn group_mask_map(&self, group: &str) -> HashMap<u8, u32> {
        let mut map = HashMap::new();
        for (index, tile) in self.tiles.iter().enumerate() {
            if tile.auto_group.as_deref() == Some(group) {
                if let Some(mask) = tile.auto_mask {
                    map.insert(mask, index as u32);
                }
            }
        }
        map
    }

    /// Distinct group names in tile order
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for group in self.tiles.iter().filter_map(|t| t.auto_group.as_deref()) {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }

    /// Indices of paintable tiles matching an optional group filter and search needle
    pub fn search(&self, group: Option<&str>, needle: &str) -> Vec<u32> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.spacer)
            .filter(|(_, t)| group.map_or(true, |g| t.auto_group.as_deref() == Some(g)))
            .filter(|(_, t)| t.matches_search(needle))
            .map(|(index, _)| index as u32)
            .collect()
    }
}

/// Every tileset in a project, in declaration order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileCatalog {
    tilesets: Vec<Tileset>,
}

impl TileCatalog {
    /// An empty catalog with no tilesets
    pub fn new() -> Self {
        Self::default()
    }

    /// The four built-in tilesets, each empty
    pub fn with_builtin() -> Self {
        let tilesets = BUILTIN_PALETTES
            .iter()
            .map(|(name, palette)| {
                Tileset::new(*name, palette.iter().map(|c| c.to_string()).collect())
            })
            .collect();
        Self { tilesets }
    }

    pub fn tilesets(&self) -> &[Tileset] {
        &self.tilesets
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tilesets.iter().map(|t| t.name.as_str())
    }

    pub fn tileset(&self, name: &str) -> Option<&Tileset> {
        self.tilesets.iter().find(|t| t.name == name)
    }

    pub fn tileset_mut(&mut self, name: &str) -> Option<&mut Tileset> {
        self.tilesets.iter_mut().find(|t| t.name == name)
    }

    /// Get a tileset, declaring it with the grassland palette if missing
    pub fn ensure_tileset(&mut self, name: &str) -> &mut Tileset {
        if let Some(pos) = self.tilesets.iter().position(|t| t.name == name) {
            return &mut self.tilesets[pos];
        }
        let palette = BUILTIN_PALETTES[0].1.iter().map(|c| c.to_string()).collect();
        self.tilesets.push(Tileset::new(name, palette));
        let last = self.tilesets.len() - 1;
        &mut self.tilesets[last]
    }

    pub fn tile(&self, tileset: &str, index: u32) -> Option<&TileBitmap> {
        self.tileset(tileset)?.tile(index)
    }

    /// Auto-tiling group of a tile, if it has one
    pub fn tile_group(&self, tileset: &str, index: u32) -> Option<&str> {
        self.tile(tileset, index)?.auto_group.as_deref()
    }

    /// Append a tile to an existing tileset and return its index
    pub fn add_tile(&mut self, tileset: &str, tile: TileBitmap) -> Result<u32, TileError> {
        self.tileset_mut(tileset)
            .ok_or_else(|| TileError::UnknownTileset(tileset.to_string()))?
            .push_tile(tile)
    }

    /// Canonical mask -> tile index for one tileset group
    pub fn group_mask_map(&self, tileset: &str, group: &str) -> HashMap<u8, u32> {
        self.tileset(tileset)
            .map(|t| t.group_mask_map(group))
            .unwrap_or_default()
    }
}
