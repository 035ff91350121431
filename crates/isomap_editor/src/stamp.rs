//! Multi-tile stamps picked from a tileset sheet

use isomap_core::{Cell, CellCoord};
use serde::{Deserialize, Serialize};

/// A rectangular block of tiles placed in one click.
///
/// `tiles` is row-major, `width * height` long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub tileset: String,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<u32>,
}

impl Stamp {
    /// Returns `None` unless `tiles` fills the rectangle exactly
    pub fn new(tileset: impl Into<String>, width: u32, height: u32, tiles: Vec<u32>) -> Option<Self> {
        if width == 0 || height == 0 || tiles.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            tileset: tileset.into(),
            width,
            height,
            tiles,
        })
    }

    /// The rectangle spanned by two tiles of a sheet laid out `columns` wide
    pub fn from_sheet_selection(
        tileset: impl Into<String>,
        columns: u32,
        a: u32,
        b: u32,
    ) -> Option<Self> {
        if columns == 0 {
            return None;
        }
        let (min_row, max_row) = ((a / columns).min(b / columns), (a / columns).max(b / columns));
        let (min_col, max_col) = ((a % columns).min(b % columns), (a % columns).max(b % columns));

        let mut tiles = Vec::new();
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                tiles.push(row * columns + col);
            }
        }
        Self::new(tileset, max_col - min_col + 1, max_row - min_row + 1, tiles)
    }

    /// Cells written when the stamp's top-left lands on `origin`.
    ///
    /// Columns advance along `j`, rows along `i`. Cells past the edge of the
    /// coordinate range are dropped.
    pub fn cells(&self, origin: CellCoord) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        let width = self.width as usize;
        self.tiles.iter().enumerate().filter_map(move |(n, &index)| {
            let dy = i32::try_from(n / width).ok()?;
            let dx = i32::try_from(n % width).ok()?;
            let coord = origin.offset(dy, dx)?;
            Some((coord, Cell::tile(self.tileset.as_str(), index)))
        })
    }
}
