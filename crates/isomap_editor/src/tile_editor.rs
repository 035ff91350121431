//! Pixel editor drafts and saving them into the catalog

use crate::error::EditorError;
use isomap_core::{TileBitmap, TileCatalog};

/// Default pixel size of a new tile
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Whether a draft becomes a new tile or replaces an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftTarget {
    Add,
    Edit(u32),
}

/// A tile being drawn in the pixel editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDraft {
    pub size: u32,
    pub pixels: Vec<Option<String>>,
    /// Empty for no group
    pub group: String,
    /// `None` keeps the existing mask when editing
    pub mask: Option<u8>,
    pub name: Option<String>,
    pub tags: Vec<String>,
}

impl TileDraft {
    pub fn blank(size: u32) -> Self {
        Self {
            size,
            pixels: vec![None; (size * size) as usize],
            group: String::new(),
            mask: None,
            name: None,
            tags: Vec::new(),
        }
    }

    /// Start editing an existing tile
    pub fn from_tile(tile: &TileBitmap) -> Self {
        Self {
            size: tile.size,
            pixels: tile.pixels.clone(),
            group: tile.auto_group.clone().unwrap_or_default(),
            mask: tile.auto_mask,
            name: tile.name.clone(),
            tags: tile.tags.clone(),
        }
    }

    /// Set one pixel; `None` erases it. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Option<&str>) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        match self.pixels.get_mut((y * self.size + x) as usize) {
            Some(pixel) => {
                *pixel = color.map(str::to_string);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = None);
    }

    fn into_bitmap(self, base: Option<&TileBitmap>) -> Result<TileBitmap, EditorError> {
        let mut tile = TileBitmap::from_pixels(self.size, self.pixels)?.with_group(self.group);
        if let Some(mask) = self.mask.or(base.and_then(|b| b.auto_mask)) {
            tile = tile.with_mask(mask)?;
        }
        tile.name = self.name.or_else(|| base.and_then(|b| b.name.clone()));
        tile.tags = if self.tags.is_empty() {
            base.map(|b| b.tags.clone()).unwrap_or_default()
        } else {
            self.tags
        };
        tile.spacer = base.map_or(false, |b| b.spacer);
        Ok(tile)
    }
}

/// Save a draft into `tileset`, returning the tile's index.
///
/// Nothing changes if the draft is invalid.
pub fn save_draft(
    catalog: &mut TileCatalog,
    tileset: &str,
    target: DraftTarget,
    draft: TileDraft,
) -> Result<u32, EditorError> {
    let set = catalog
        .tileset_mut(tileset)
        .ok_or_else(|| EditorError::UnknownTileset(tileset.to_string()))?;

    match target {
        DraftTarget::Add => {
            let index = set.push_tile(draft.into_bitmap(None)?)?;
            log::info!("added tile {} to '{}'", index, tileset);
            Ok(index)
        }
        DraftTarget::Edit(index) => {
            let existing = set.tile(index).cloned().ok_or_else(|| {
                isomap_core::TileError::UnknownTile {
                    tileset: tileset.to_string(),
                    index,
                }
            })?;
            set.replace_tile(index, draft.into_bitmap(Some(&existing))?)?;
            log::info!("updated tile {} in '{}'", index, tileset);
            Ok(index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_with_empty_group() {
        let mut catalog = TileCatalog::with_builtin();
        let mut draft = TileDraft::blank(2);
        assert!(draft.set_pixel(1, 1, Some("#ff0000")));
        assert!(!draft.set_pixel(2, 0, Some("#ff0000")));

        let index = save_draft(&mut catalog, "grassland", DraftTarget::Add, draft).unwrap();
        let tile = catalog.tile("grassland", index).unwrap();
        assert_eq!(tile.auto_group, None);
        assert_eq!(tile.auto_mask, None);
        assert_eq!(tile.pixel(1, 1), Some("#ff0000"));
    }

    #[test]
    fn test_edit_keeps_mask_when_unset() {
        let mut catalog = TileCatalog::with_builtin();
        let existing = TileBitmap::blank(2)
            .with_group("ground")
            .with_mask(6)
            .unwrap()
            .with_name("corner");
        catalog.add_tile("desert", existing).unwrap();

        let mut draft = TileDraft::blank(2);
        draft.group = "sand".into();
        save_draft(&mut catalog, "desert", DraftTarget::Edit(0), draft).unwrap();

        let tile = catalog.tile("desert", 0).unwrap();
        assert_eq!(tile.auto_group.as_deref(), Some("sand"));
        assert_eq!(tile.auto_mask, Some(6));
        assert_eq!(tile.name.as_deref(), Some("corner"));
    }

    #[test]
    fn test_invalid_drafts_change_nothing() {
        let mut catalog = TileCatalog::with_builtin();
        let mut draft = TileDraft::blank(2);
        draft.pixels.pop();
        assert!(save_draft(&mut catalog, "swamp", DraftTarget::Add, draft).is_err());

        let mut draft = TileDraft::blank(2);
        draft.mask = Some(20);
        assert!(save_draft(&mut catalog, "swamp", DraftTarget::Add, draft).is_err());

        assert!(save_draft(&mut catalog, "swamp", DraftTarget::Edit(3), TileDraft::blank(2)).is_err());
        assert!(save_draft(&mut catalog, "moon", DraftTarget::Add, TileDraft::blank(2)).is_err());
        assert_eq!(catalog.tileset("swamp").unwrap().tile_count(), 0);
    }
}
