//! Four-neighbor adjacency masks
//!
//! A mask records which orthogonal neighbors of a cell belong to the same
//! auto-tiling group. Diagonals are not part of the mask.

use isomap_core::{AUTO_MASK_MAX, CellCoord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Neighbor direction flags
pub mod neighbors {
    pub const N: u8 = 0b0001; // (i-1, j)
    pub const E: u8 = 0b0010; // (i, j+1)
    pub const S: u8 = 0b0100; // (i+1, j)
    pub const W: u8 = 0b1000; // (i, j-1)
    pub const ALL: u8 = N | E | S | W;
}

/// A 4-bit adjacency mask in `0..=15`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Mask(u8);

impl Mask {
    /// No same-group neighbors
    pub const ISOLATED: Mask = Mask(0);
    /// All four neighbors in the group
    pub const FULL: Mask = Mask(neighbors::ALL);

    pub const fn new(bits: u8) -> Option<Mask> {
        if bits <= AUTO_MASK_MAX {
            Some(Mask(bits))
        } else {
            None
        }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn has(self, flag: u8) -> bool {
        self.0 & flag == flag
    }

    /// All sixteen masks in ascending order
    pub fn all() -> impl Iterator<Item = Mask> {
        (0..=AUTO_MASK_MAX).map(Mask)
    }
}

impl TryFrom<u8> for Mask {
    type Error = String;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Mask::new(bits).ok_or_else(|| format!("mask {bits} is outside 0..={AUTO_MASK_MAX}"))
    }
}

impl From<Mask> for u8 {
    fn from(mask: Mask) -> u8 {
        mask.0
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calculate the adjacency mask of `coord`.
///
/// `is_member` is asked about each orthogonal neighbor and decides whether it
/// belongs to the group being resolved.
pub fn calculate_mask<F>(coord: CellCoord, is_member: F) -> Mask
where
    F: Fn(CellCoord) -> bool,
{
    use neighbors::*;

    let mut bits = 0u8;

    if coord.north().is_some_and(&is_member) {
        bits |= N;
    }
    if coord.east().is_some_and(&is_member) {
        bits |= E;
    }
    if coord.south().is_some_and(&is_member) {
        bits |= S;
    }
    if coord.west().is_some_and(&is_member) {
        bits |= W;
    }

    Mask(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn mask_with(present: &[CellCoord]) -> Mask {
        let set: HashSet<CellCoord> = present.iter().copied().collect();
        calculate_mask(CellCoord::new(0, 0), |c| set.contains(&c))
    }

    #[test]
    fn test_single_directions() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(mask_with(&[origin.north().unwrap()]).bits(), 1);
        assert_eq!(mask_with(&[origin.east().unwrap()]).bits(), 2);
        assert_eq!(mask_with(&[origin.south().unwrap()]).bits(), 4);
        assert_eq!(mask_with(&[origin.west().unwrap()]).bits(), 8);
    }

    #[test]
    fn test_every_combination() {
        let origin = CellCoord::new(0, 0);
        let dirs: Vec<_> = origin.orthogonal_neighbors().collect();
        for bits in 0u8..16 {
            let present: Vec<_> = (0..4)
                .filter(|b| bits & (1 << b) != 0)
                .map(|b| dirs[b])
                .collect();
            assert_eq!(mask_with(&present).bits(), bits);
        }
    }

    #[test]
    fn test_diagonals_ignored() {
        let mask = mask_with(&[CellCoord::new(-1, -1), CellCoord::new(1, 1)]);
        assert_eq!(mask, Mask::ISOLATED);
    }

    #[test]
    fn test_mask_range() {
        assert!(Mask::new(15).is_some());
        assert!(Mask::new(16).is_none());
        assert_eq!(Mask::all().count(), 16);
        assert!(Mask::FULL.has(neighbors::N | neighbors::W));
        assert!(serde_json::from_str::<Mask>("16").is_err());
    }
}
