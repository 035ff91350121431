//! Pointer strokes with per-cell deduplication

use isomap_core::CellCoord;
use std::collections::HashSet;

/// What a pointer press does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Use the selected tool
    Primary,
    /// Always erase
    Secondary,
    /// Pick up the cell under the pointer
    Sample,
}

/// A press-drag-release gesture.
///
/// Each cell is acted on at most once per stroke.
#[derive(Debug, Clone, Default)]
pub struct Stroke {
    action: Option<PointerAction>,
    visited: HashSet<CellCoord>,
}

impl Stroke {
    pub fn begin(&mut self, action: PointerAction, coord: CellCoord) {
        self.visited.clear();
        self.visited.insert(coord);
        self.action = Some(action);
    }

    /// Record entering `coord`. `false` if it was already visited.
    pub fn enter(&mut self, coord: CellCoord) -> bool {
        self.action.is_some() && self.visited.insert(coord)
    }

    pub fn end(&mut self) {
        self.action = None;
        self.visited.clear();
    }

    pub fn action(&self) -> Option<PointerAction> {
        self.action
    }

    pub fn is_active(&self) -> bool {
        self.action.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_within_stroke() {
        let mut stroke = Stroke::default();
        let a = CellCoord::new(0, 0);
        let b = CellCoord::new(0, 1);

        assert!(!stroke.enter(a));
        stroke.begin(PointerAction::Primary, a);
        assert!(!stroke.enter(a));
        assert!(stroke.enter(b));
        assert!(!stroke.enter(b));

        stroke.end();
        assert!(!stroke.is_active());
        stroke.begin(PointerAction::Secondary, b);
        assert!(stroke.enter(a));
    }
}
