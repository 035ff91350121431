//! Generated placeholder tiles, one per mask, for trying out auto-tiling

use crate::mask::{neighbors, Mask};
use isomap_core::{TileBitmap, TileCatalog, TileError, BUILTIN_PALETTES};
use std::ops::Range;

/// Group the demo tiles are tagged with
pub const DEMO_GROUP: &str = "ground";

const LINE_COLOR: &str = "#000000";

/// A tile filled with `base`, with a black line on each side whose bit is set in `mask`
pub fn demo_tile(size: u32, base: &str, mask: Mask) -> TileBitmap {
    let size = size.max(1);
    let border = (size / 16).max(1).min(size);
    let base = base.to_lowercase();
    let mut pixels = vec![Some(base); (size * size) as usize];

    let mut line = |x: u32, y: u32| pixels[(y * size + x) as usize] = Some(LINE_COLOR.to_string());
    for offset in 0..border {
        for k in 0..size {
            if mask.has(neighbors::N) {
                line(k, offset);
            }
            if mask.has(neighbors::E) {
                line(size - border + offset, k);
            }
            if mask.has(neighbors::S) {
                line(k, size - border + offset);
            }
            if mask.has(neighbors::W) {
                line(offset, k);
            }
        }
    }

    TileBitmap {
        size,
        pixels,
        auto_group: Some(DEMO_GROUP.to_string()),
        auto_mask: Some(mask.bits()),
        name: Some(format!("demo-{mask}")),
        tags: vec!["demo".to_string(), "auto".to_string()],
        spacer: false,
    }
}

/// The sixteen demo tiles, in mask order
pub fn demo_tiles(size: u32, base: &str) -> Vec<TileBitmap> {
    Mask::all().map(|mask| demo_tile(size, base, mask)).collect()
}

/// Append the demo tiles to a tileset, filled with its first palette color.
///
/// Returns the index range the new tiles occupy.
pub fn add_demo_tiles(
    catalog: &mut TileCatalog,
    tileset: &str,
    size: u32,
) -> Result<Range<u32>, TileError> {
    let set = catalog
        .tileset_mut(tileset)
        .ok_or_else(|| TileError::UnknownTileset(tileset.to_string()))?;
    let base = set
        .palette
        .first()
        .cloned()
        .unwrap_or_else(|| BUILTIN_PALETTES[0].1[0].to_string());

    let start = set.tile_count();
    for tile in demo_tiles(size, &base) {
        set.push_tile(tile)?;
    }
    log::info!("added demo autotile set to '{}'", tileset);
    Ok(start..set.tile_count())
}
