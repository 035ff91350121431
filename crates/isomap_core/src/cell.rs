//! Cell coordinates and cell contents

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A position on the isometric grid.
///
/// `i` grows towards the south, `j` towards the east. The board is unbounded,
/// so both axes accept negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellCoord {
    pub i: i32,
    pub j: i32,
}

impl CellCoord {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Storage key in the `"{i},{j}"` form used by exported payloads
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// `None` past the edge of the coordinate range
    pub fn north(self) -> Option<Self> {
        self.offset(-1, 0)
    }

    pub fn east(self) -> Option<Self> {
        self.offset(0, 1)
    }

    pub fn south(self) -> Option<Self> {
        self.offset(1, 0)
    }

    pub fn west(self) -> Option<Self> {
        self.offset(0, -1)
    }

    /// The orthogonal neighbors in N, E, S, W order, skipping any past the edge
    pub fn orthogonal_neighbors(self) -> impl Iterator<Item = CellCoord> {
        [self.north(), self.east(), self.south(), self.west()]
            .into_iter()
            .flatten()
    }

    /// Offset this coordinate by `(di, dj)`, or `None` on overflow
    pub fn offset(self, di: i32, dj: i32) -> Option<Self> {
        Some(Self::new(self.i.checked_add(di)?, self.j.checked_add(dj)?))
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((i, j): (i32, i32)) -> Self {
        Self::new(i, j)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.i, self.j)
    }
}

/// Error returned when a `"{i},{j}"` key cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCoordError {
    pub key: String,
}

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cell key '{}', expected \"i,j\"", self.key)
    }
}

impl std::error::Error for ParseCoordError {}

impl FromStr for CellCoord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError { key: s.to_string() };
        let (i, j) = s.split_once(',').ok_or_else(err)?;
        let i = i.trim().parse::<i32>().map_err(|_| err())?;
        let j = j.trim().parse::<i32>().map_err(|_| err())?;
        Ok(Self::new(i, j))
    }
}

// Coordinates are map keys in JSON, so they travel as strings.
impl Serialize for CellCoord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellCoord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}

/// Reference to a tile bitmap: its tileset and index within that tileset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    #[serde(rename = "tileSet")]
    pub tileset: String,
    #[serde(rename = "tileIndex")]
    pub index: u32,
}

impl TileRef {
    pub fn new(tileset: impl Into<String>, index: u32) -> Self {
        Self {
            tileset: tileset.into(),
            index,
        }
    }
}

/// Content of a painted cell. An absent cell is represented by no entry at all.
///
/// A cell is either a tile or a color, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Cell {
    Tile(TileRef),
    Color { color: String },
}

impl Cell {
    pub fn tile(tileset: impl Into<String>, index: u32) -> Self {
        Cell::Tile(TileRef::new(tileset, index))
    }

    pub fn color(color: impl Into<String>) -> Self {
        Cell::Color {
            color: color.into(),
        }
    }

    /// Tile reference, if this is a tile cell
    pub fn as_tile(&self) -> Option<&TileRef> {
        match self {
            Cell::Tile(tile) => Some(tile),
            Cell::Color { .. } => None,
        }
    }

    /// Fill color, if this is a color cell
    pub fn as_color(&self) -> Option<&str> {
        match self {
            Cell::Tile(_) => None,
            Cell::Color { color } => Some(color),
        }
    }

    pub fn is_tile(&self) -> bool {
        matches!(self, Cell::Tile(_))
    }

    /// Whether this cell holds a tile from `tileset`
    pub fn is_tile_of(&self, tileset: &str) -> bool {
        matches!(self, Cell::Tile(tile) if tile.tileset == tileset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_key_round_trip() {
        let coord = CellCoord::new(-3, 12);
        assert_eq!(coord.key(), "-3,12");
        assert_eq!("-3,12".parse::<CellCoord>(), Ok(coord));
        assert_eq!(" 4 , -1 ".parse::<CellCoord>(), Ok(CellCoord::new(4, -1)));
    }

    #[test]
    fn test_coord_rejects_malformed_keys() {
        assert!("3".parse::<CellCoord>().is_err());
        assert!("a,b".parse::<CellCoord>().is_err());
        assert!("1,2,3".parse::<CellCoord>().is_err());
    }

    #[test]
    fn test_neighbor_order() {
        let c = CellCoord::new(0, 0);
        assert_eq!(
            c.orthogonal_neighbors().collect::<Vec<_>>(),
            [
                CellCoord::new(-1, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 0),
                CellCoord::new(0, -1),
            ]
        );
    }

    #[test]
    fn test_neighbors_stop_at_range_edge() {
        let corner: CellCoord = "-2147483648,2147483647".parse().unwrap();
        assert_eq!(corner.north(), None);
        assert_eq!(corner.east(), None);
        assert_eq!(
            corner.orthogonal_neighbors().collect::<Vec<_>>(),
            [CellCoord::new(i32::MIN + 1, i32::MAX), CellCoord::new(i32::MIN, i32::MAX - 1)]
        );
        assert_eq!(corner.offset(1, -1), Some(CellCoord::new(i32::MIN + 1, i32::MAX - 1)));
    }

    #[test]
    fn test_cell_json_shape() {
        let tile = Cell::tile("grassland", 7);
        let json = serde_json::to_value(&tile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "tile", "tileSet": "grassland", "tileIndex": 7 })
        );

        let color: Cell =
            serde_json::from_value(serde_json::json!({ "type": "color", "color": "#6abe30" }))
                .unwrap();
        assert_eq!(color.as_color(), Some("#6abe30"));
        assert!(color.as_tile().is_none());
    }
}
