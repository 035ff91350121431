//! Four-neighbor autotiling for isometric tile maps
//!
//! A painted cell looks at its north, east, south and west neighbors and
//! builds a 4-bit mask from those belonging to the same group. The mask is
//! resolved to a tile through, in order:
//! - the group's rule table (random pick among candidates)
//! - the catalog tile tagged with exactly that mask
//! - the catalog tile tagged with mask 0
//!
//! After placement the four neighbors are re-resolved once. There is no
//! further cascade.
//!
//! # Example
//!
//! ```rust,ignore
//! use isomap_autotile::{paint_autotile, AutotileConfig, GroupKey, Role};
//! use isomap_core::{Board, CellCoord, TileCatalog};
//!
//! let catalog = TileCatalog::with_builtin();
//! let mut config = AutotileConfig::new();
//! let key = GroupKey::new("grassland", "ground").unwrap();
//! config.assign_role(key, Role::Center, 0);
//!
//! let mut board = Board::new();
//! let mut rng = rand::thread_rng();
//! paint_autotile(&mut board, CellCoord::new(0, 0), key, &config.context(&catalog), &mut rng);
//! ```

pub mod apply;
pub mod config;
pub mod demo;
pub mod mask;
pub mod rules;
pub mod template;

pub use apply::{
    apply_at, erase_autotile, paint_autotile, refresh_neighbors, AutotileContext,
};
pub use config::{AutotileBrush, AutotileConfig};
pub use demo::{add_demo_tiles, demo_tile, demo_tiles, DEMO_GROUP};
pub use mask::{calculate_mask, neighbors, Mask};
pub use rules::{GroupKey, GroupRules, RuleTable};
pub use template::{apply_template_assignment, Role, Template};
