//! Sparse cell storage for a single layer

use crate::cell::{Cell, CellCoord};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Largest empty region a single flood fill may cover.
///
/// The board is unbounded, so filling an empty seed would otherwise never stop.
/// Regions of painted cells are bounded by the board itself and never limited.
pub const DEFAULT_FILL_LIMIT: usize = 10_000;

/// Sparse mapping from coordinates to painted cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: HashMap<CellCoord, Cell>,
}

/// Result of a flood fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// The seed already held the replacement (or the layer is locked)
    Unchanged,
    /// This many cells were overwritten
    Filled(usize),
    /// The connected empty region exceeded the limit; nothing was written
    TooLarge { limit: usize },
}

/// Cell equality as used by flood fill.
///
/// If either side references a tile, both must reference the same tileset and
/// index. Otherwise the colors are compared. Two absent cells are equal; an
/// absent cell never equals a present one.
pub fn cells_match(a: Option<&Cell>, b: Option<&Cell>) -> bool {
    match (a, b) {
        (None, None) => true,
        (None, Some(_)) | (Some(_), None) => false,
        (Some(Cell::Tile(a)), Some(Cell::Tile(b))) => a == b,
        (Some(Cell::Tile(_)), Some(_)) | (Some(_), Some(Cell::Tile(_))) => false,
        (Some(a), Some(b)) => a.as_color() == b.as_color(),
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coord: CellCoord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    /// Write a cell, returning the previous content
    pub fn set(&mut self, coord: CellCoord, cell: Cell) -> Option<Cell> {
        self.cells.insert(coord, cell)
    }

    /// Clear a cell, returning the previous content
    pub fn remove(&mut self, coord: CellCoord) -> Option<Cell> {
        self.cells.remove(&coord)
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell)> {
        self.cells.iter().map(|(coord, cell)| (*coord, cell))
    }

    /// Breadth-first 4-connected flood fill from `seed`.
    ///
    /// The region is every cell connected to the seed whose content matches the
    /// seed's content before the fill started. The region is collected in full
    /// before any cell is written, so each cell is overwritten exactly once.
    /// `limit` only applies when the seed is empty.
    pub fn flood_fill(&mut self, seed: CellCoord, replacement: &Cell, limit: usize) -> FillOutcome {
        let target = self.get(seed).cloned();
        if cells_match(target.as_ref(), Some(replacement)) {
            return FillOutcome::Unchanged;
        }

        let mut region = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([seed]);

        while let Some(coord) = queue.pop_front() {
            if !visited.insert(coord) {
                continue;
            }
            if !cells_match(self.get(coord), target.as_ref()) {
                continue;
            }
            region.push(coord);
            if target.is_none() && region.len() > limit {
                log::warn!(
                    "flood fill from {} abandoned: region exceeds {} cells",
                    seed,
                    limit
                );
                return FillOutcome::TooLarge { limit };
            }
            queue.extend(coord.orthogonal_neighbors());
        }

        let count = region.len();
        for coord in region {
            self.cells.insert(coord, replacement.clone());
        }
        FillOutcome::Filled(count)
    }
}

impl FromIterator<(CellCoord, Cell)> for Board {
    fn from_iter<T: IntoIterator<Item = (CellCoord, Cell)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Cell {
        Cell::color("#ff0000")
    }

    fn blue() -> Cell {
        Cell::color("#0000ff")
    }

    #[test]
    fn test_cells_match_is_discriminator_aware() {
        let tile = Cell::tile("grassland", 1);
        assert!(cells_match(None, None));
        assert!(!cells_match(Some(&tile), None));
        assert!(cells_match(Some(&tile), Some(&Cell::tile("grassland", 1))));
        assert!(!cells_match(Some(&tile), Some(&Cell::tile("desert", 1))));
        assert!(!cells_match(Some(&tile), Some(&Cell::tile("grassland", 2))));
        assert!(!cells_match(Some(&tile), Some(&red())));
        assert!(cells_match(Some(&red()), Some(&red())));
        assert!(!cells_match(Some(&red()), Some(&blue())));
    }

    #[test]
    fn test_fill_already_filled_is_noop() {
        let mut board: Board = (0..3).map(|j| (CellCoord::new(0, j), red())).collect();
        let before = board.clone();

        assert_eq!(
            board.flood_fill(CellCoord::new(0, 1), &red(), DEFAULT_FILL_LIMIT),
            FillOutcome::Unchanged
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_fill_stops_at_differing_cells() {
        // A 3x3 red square surrounded by a ring of blue cells.
        let mut board = Board::new();
        for i in -2i32..=2 {
            for j in -2i32..=2 {
                let ring = i.abs() == 2 || j.abs() == 2;
                board.set(CellCoord::new(i, j), if ring { blue() } else { red() });
            }
        }
        board.set(CellCoord::new(5, 5), red());

        let green = Cell::color("#00ff00");
        assert_eq!(
            board.flood_fill(CellCoord::new(0, 0), &green, DEFAULT_FILL_LIMIT),
            FillOutcome::Filled(9)
        );
        assert_eq!(board.get(CellCoord::new(1, 1)), Some(&green));
        assert_eq!(board.get(CellCoord::new(2, 2)), Some(&blue()));
        // Same color but not connected to the seed.
        assert_eq!(board.get(CellCoord::new(5, 5)), Some(&red()));
    }

    #[test]
    fn test_fill_treats_tile_and_color_as_distinct() {
        let mut board = Board::new();
        board.set(CellCoord::new(0, 0), red());
        board.set(CellCoord::new(0, 1), Cell::tile("grassland", 0));
        board.set(CellCoord::new(0, 2), red());

        assert_eq!(
            board.flood_fill(CellCoord::new(0, 0), &blue(), DEFAULT_FILL_LIMIT),
            FillOutcome::Filled(1)
        );
        assert_eq!(board.get(CellCoord::new(0, 2)), Some(&red()));
    }

    #[test]
    fn test_fill_empty_region_enclosed() {
        let mut board = Board::new();
        // Wall around the single empty cell (0, 0).
        for coord in CellCoord::new(0, 0).orthogonal_neighbors() {
            board.set(coord, blue());
        }

        assert_eq!(
            board.flood_fill(CellCoord::new(0, 0), &red(), DEFAULT_FILL_LIMIT),
            FillOutcome::Filled(1)
        );
        assert_eq!(board.len(), 5);
    }

    #[test]
    fn test_fill_painted_region_ignores_limit() {
        let mut board = Board::new();
        for i in 0..101 {
            for j in 0..101 {
                board.set(CellCoord::new(i, j), red());
            }
        }

        assert_eq!(
            board.flood_fill(CellCoord::new(50, 50), &blue(), DEFAULT_FILL_LIMIT),
            FillOutcome::Filled(101 * 101)
        );
        assert!(board.iter().all(|(_, cell)| *cell == blue()));

        assert_eq!(
            board.flood_fill(CellCoord::new(0, 0), &red(), 3),
            FillOutcome::Filled(101 * 101)
        );
    }

    #[test]
    fn test_fill_unbounded_region_is_abandoned() {
        let mut board = Board::new();
        board.set(CellCoord::new(10, 10), blue());
        let before = board.clone();

        assert_eq!(
            board.flood_fill(CellCoord::new(0, 0), &red(), 50),
            FillOutcome::TooLarge { limit: 50 }
        );
        assert_eq!(board, before);
    }
}
