//! The autotile applier: mask resolution, tile selection and one-ring
//! neighbor fix-up.
//!
//! The entry points are [`paint_autotile`] and [`erase_autotile`]. Both work on
//! a single board; callers pass the board of the active layer only when that
//! layer is unlocked.

use isomap_core::{Board, Cell, CellCoord, TileCatalog};
use rand::Rng;

use crate::mask::{calculate_mask, Mask};
use crate::rules::{GroupKey, RuleTable};

// ─── Context ──────────────────────────────────────────────────────────────────

/// The two authoring stores autotiling reads from.
///
/// Neither is mutated while painting.
#[derive(Debug, Clone, Copy)]
pub struct AutotileContext<'a> {
    pub catalog: &'a TileCatalog,
    pub rules: &'a RuleTable,
}

impl<'a> AutotileContext<'a> {
    pub fn new(catalog: &'a TileCatalog, rules: &'a RuleTable) -> Self {
        Self { catalog, rules }
    }

    /// Whether a cell counts as part of `key`'s group.
    ///
    /// It must be a tile from the same tileset, and either its bitmap is tagged
    /// with the group or its index is a candidate in any of the group's rules.
    pub fn is_group_cell(&self, cell: Option<&Cell>, key: GroupKey) -> bool {
        let Some(tile) = cell.and_then(Cell::as_tile) else {
            return false;
        };
        if tile.tileset != key.tileset {
            return false;
        }
        self.catalog.tile_group(key.tileset, tile.index) == Some(key.group)
            || self.rules.is_member(key, tile.index)
    }

    /// Adjacency mask of `coord` for `key`'s group
    pub fn compute_mask(&self, board: &Board, coord: CellCoord, key: GroupKey) -> Mask {
        calculate_mask(coord, |c| self.is_group_cell(board.get(c), key))
    }

    /// Pick the tile for a mask.
    ///
    /// Rule candidates win, chosen uniformly at random. Then the catalog tile
    /// tagged with this exact mask, then the group's mask-0 tile. `None` means
    /// the group is not configured for this mask.
    pub fn resolve_tile(&self, key: GroupKey, mask: Mask, rng: &mut impl Rng) -> Option<u32> {
        let candidates = self.rules.candidates(key, mask);
        if !candidates.is_empty() {
            return Some(candidates[rng.gen_range(0..candidates.len())]);
        }

        let by_mask = self.catalog.group_mask_map(key.tileset, key.group);
        by_mask
            .get(&mask.bits())
            .or_else(|| by_mask.get(&Mask::ISOLATED.bits()))
            .copied()
    }

    /// The group a placed neighbor is re-resolved in: its own tag group, or
    /// the painting group when the tile is untagged.
    fn neighbor_group<'g>(&'g self, tileset: &str, index: u32, painting_group: &'g str) -> &'g str {
        self.catalog
            .tile_group(tileset, index)
            .filter(|group| !group.is_empty())
            .unwrap_or(painting_group)
    }
}

// ─── Placement ────────────────────────────────────────────────────────────────

/// Resolve `coord` against its current neighbors and write the chosen tile.
///
/// Returns `false` and leaves the cell untouched when no tile fits.
pub fn apply_at(
    board: &mut Board,
    coord: CellCoord,
    key: GroupKey,
    ctx: &AutotileContext,
    rng: &mut impl Rng,
) -> bool {
    let mask = ctx.compute_mask(board, coord, key);
    match ctx.resolve_tile(key, mask, rng) {
        Some(index) => {
            log::debug!(
                "autotile {} in {}/{}: mask {} -> tile {}",
                coord,
                key.tileset,
                key.group,
                mask,
                index
            );
            board.set(coord, Cell::tile(key.tileset, index));
            true
        }
        None => {
            log::debug!(
                "autotile {} in {}/{}: no tile for mask {}",
                coord,
                key.tileset,
                key.group,
                mask
            );
            false
        }
    }
}

/// Re-resolve the four orthogonal neighbors of `coord`, once each.
///
/// Neighbors two steps away are never touched. Returns how many neighbors
/// were rewritten.
pub fn refresh_neighbors(
    board: &mut Board,
    coord: CellCoord,
    painting_group: &str,
    ctx: &AutotileContext,
    rng: &mut impl Rng,
) -> usize {
    let mut rewritten = 0;
    for neighbor in coord.orthogonal_neighbors() {
        let Some(tile) = board.get(neighbor).and_then(Cell::as_tile).cloned() else {
            continue;
        };
        let group = ctx.neighbor_group(&tile.tileset, tile.index, painting_group);
        let Some(key) = GroupKey::new(&tile.tileset, group) else {
            continue;
        };
        if apply_at(board, neighbor, key, ctx, rng) {
            rewritten += 1;
        }
    }
    rewritten
}

/// Paint an autotile at `coord`, then fix up its four neighbors.
///
/// A tile of the same tileset that is not a member of the painting group is
/// cleared first, so it cannot influence the new placement. Returns whether
/// `coord` received a tile.
pub fn paint_autotile(
    board: &mut Board,
    coord: CellCoord,
    key: GroupKey,
    ctx: &AutotileContext,
    rng: &mut impl Rng,
) -> bool {
    let stale = board
        .get(coord)
        .is_some_and(|cell| cell.is_tile_of(key.tileset) && !ctx.is_group_cell(Some(cell), key));
    if stale {
        board.remove(coord);
    }

    let placed = apply_at(board, coord, key, ctx, rng);
    refresh_neighbors(board, coord, key.group, ctx, rng);
    placed
}

/// Erase `coord`, then fix up its four neighbors.
///
/// Returns `false` when the cell was already empty; the neighbors are not
/// touched in that case.
pub fn erase_autotile(
    board: &mut Board,
    coord: CellCoord,
    painting_group: &str,
    ctx: &AutotileContext,
    rng: &mut impl Rng,
) -> bool {
    if board.remove(coord).is_none() {
        return false;
    }
    refresh_neighbors(board, coord, painting_group, ctx, rng);
    true
}

// ─── Tests ───────────────────────────────────────────────────────────────────
