//! Core data structures for isomap
//!
//! This crate provides the fundamental types for representing an isometric tile board:
//! - `CellCoord` / `Cell` - A grid position and what is painted there
//! - `Board` - Sparse cell storage with flood fill
//! - `Layer` / `LayerStack` - Ordered, lockable, blendable boards
//! - `TileBitmap` / `Tileset` / `TileCatalog` - Pixel tiles grouped per tileset
//!
//! This crate has no randomness and performs no I/O.

mod board;
mod cell;
mod layer;
mod tileset;

pub use board::{cells_match, Board, FillOutcome, DEFAULT_FILL_LIMIT};
pub use cell::{Cell, CellCoord, ParseCoordError, TileRef};
pub use layer::{Layer, LayerStack, RenderCell};
pub use tileset::{
    TileBitmap, TileCatalog, TileError, Tileset, AUTO_MASK_MAX, BUILTIN_PALETTES,
};
