//! End-to-end autotile behavior on a board

use isomap_autotile::{
    add_demo_tiles, apply_template_assignment, paint_autotile, AutotileConfig, AutotileContext,
    GroupKey, Mask, Role, RuleTable, Template,
};
use isomap_core::{Board, Cell, CellCoord, TileBitmap, TileCatalog};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn seeded_rng() -> SmallRng {
    SmallRng::seed_from_u64(7)
}

fn ground() -> GroupKey<'static> {
    GroupKey::new("grassland", "ground").unwrap()
}

fn demo_catalog() -> TileCatalog {
    let mut catalog = TileCatalog::with_builtin();
    add_demo_tiles(&mut catalog, "grassland", 16).unwrap();
    catalog
}

fn tile_at(board: &Board, i: i32, j: i32) -> Option<u32> {
    board
        .get(CellCoord::new(i, j))
        .and_then(Cell::as_tile)
        .map(|t| t.index)
}

#[test]
fn mask_counts_only_same_group_neighbors() {
    let mut catalog = demo_catalog();
    let water = catalog
        .add_tile("grassland", TileBitmap::blank(16).with_group("water"))
        .unwrap();
    let rules = RuleTable::new();
    let ctx = AutotileContext::new(&catalog, &rules);

    let mut board = Board::new();
    board.set(CellCoord::new(-1, 0), Cell::tile("grassland", 0));
    board.set(CellCoord::new(0, 1), Cell::tile("grassland", 4));
    board.set(CellCoord::new(1, 0), Cell::tile("grassland", water));
    board.set(CellCoord::new(0, -1), Cell::tile("desert", 0));

    let mask = ctx.compute_mask(&board, CellCoord::new(0, 0), ground());
    assert_eq!(mask.bits(), 3);
}

#[test]
fn rule_members_count_as_neighbors() {
    let mut catalog = TileCatalog::with_builtin();
    for _ in 0..4 {
        catalog.add_tile("grassland", TileBitmap::blank(4)).unwrap();
    }
    let mut rules = RuleTable::new();
    rules.set_candidates(ground(), Mask::FULL, vec![3]);
    let ctx = AutotileContext::new(&catalog, &rules);

    let mut board = Board::new();
    board.set(CellCoord::new(1, 0), Cell::tile("grassland", 3));
    board.set(CellCoord::new(0, -1), Cell::tile("grassland", 2));

    assert_eq!(ctx.compute_mask(&board, CellCoord::new(0, 0), ground()).bits(), 4);
}

#[test]
fn template_roles_land_on_fixed_masks() {
    let mut template = Template::new();
    let mut rules = RuleTable::new();

    apply_template_assignment(&mut template, &mut rules, ground(), Role::Center, 1);
    apply_template_assignment(&mut template, &mut rules, ground(), Role::TopLeft, 2);
    apply_template_assignment(&mut template, &mut rules, ground(), Role::Center, 3);

    assert_eq!(rules.candidates(ground(), Mask::new(15).unwrap()), [3]);
    assert_eq!(rules.candidates(ground(), Mask::new(6).unwrap()), [2]);
    assert_eq!(template.get(ground(), Role::Center), Some(3));
}

#[test]
fn rule_beats_catalog_mask_match() {
    let catalog = demo_catalog();
    let mut config = AutotileConfig::new();
    config.set_rule(ground(), Mask::ISOLATED, vec![9]);
    let ctx = config.context(&catalog);

    let mut board = Board::new();
    assert!(paint_autotile(&mut board, CellCoord::new(0, 0), ground(), &ctx, &mut seeded_rng()));
    assert_eq!(tile_at(&board, 0, 0), Some(9));
}

#[test]
fn missing_fallback_leaves_cell_unchanged() {
    let mut catalog = TileCatalog::with_builtin();
    let edge = TileBitmap::blank(4).with_group("ground").with_mask(5).unwrap();
    catalog.add_tile("grassland", edge).unwrap();
    let rules = RuleTable::new();
    let ctx = AutotileContext::new(&catalog, &rules);

    let mut board = Board::new();
    board.set(CellCoord::new(0, 0), Cell::color("#123456"));

    assert!(!paint_autotile(&mut board, CellCoord::new(0, 0), ground(), &ctx, &mut seeded_rng()));
    assert_eq!(board.get(CellCoord::new(0, 0)), Some(&Cell::color("#123456")));
}

#[test]
fn painting_refreshes_exactly_one_ring() {
    let catalog = demo_catalog();
    let rules = RuleTable::new();
    let ctx = AutotileContext::new(&catalog, &rules);

    // Every demo tile index equals its mask, so stale tiles are easy to spot.
    let mut board = Board::new();
    for (i, j) in [(-1, 0), (1, 0), (0, 1), (0, -1), (-2, 0), (1, 1)] {
        board.set(CellCoord::new(i, j), Cell::tile("grassland", 0));
    }

    paint_autotile(&mut board, CellCoord::new(0, 0), ground(), &ctx, &mut seeded_rng());

    assert_eq!(tile_at(&board, 0, 0), Some(15));
    // North neighbor sees (-2,0) above and the new cell below.
    assert_eq!(tile_at(&board, -1, 0), Some(5));
    assert_eq!(tile_at(&board, 1, 0), Some(1 | 2));
    assert_eq!(tile_at(&board, 0, 1), Some(8 | 4));
    assert_eq!(tile_at(&board, 0, -1), Some(2));
    // Two steps away: untouched even though their masks changed.
    assert_eq!(tile_at(&board, -2, 0), Some(0));
    assert_eq!(tile_at(&board, 1, 1), Some(0));
}

#[test]
fn untagged_neighbors_follow_painting_group() {
    let mut catalog = demo_catalog();
    let plain = catalog.add_tile("grassland", TileBitmap::blank(16)).unwrap();
    let mut blank_tag = TileBitmap::blank(16);
    blank_tag.auto_group = Some(String::new());
    let blank_tag = catalog.add_tile("grassland", blank_tag).unwrap();
    let rules = RuleTable::new();
    let ctx = AutotileContext::new(&catalog, &rules);

    let mut board = Board::new();
    board.set(CellCoord::new(0, 1), Cell::tile("grassland", plain));
    board.set(CellCoord::new(1, 0), Cell::tile("grassland", blank_tag));
    board.set(CellCoord::new(0, -1), Cell::color("#ff0000"));

    paint_autotile(&mut board, CellCoord::new(0, 0), ground(), &ctx, &mut seeded_rng());

    // Neither neighbor is a member, so the center stays isolated.
    assert_eq!(tile_at(&board, 0, 0), Some(0));
    // Both are re-resolved as ground: west-only and north-only.
    assert_eq!(tile_at(&board, 0, 1), Some(8));
    assert_eq!(tile_at(&board, 1, 0), Some(1));
    assert_eq!(board.get(CellCoord::new(0, -1)), Some(&Cell::color("#ff0000")));
}

#[test]
fn painting_at_coordinate_range_edge() {
    let catalog = demo_catalog();
    let rules = RuleTable::new();
    let ctx = AutotileContext::new(&catalog, &rules);

    let edge: CellCoord = "-2147483648,0".parse().unwrap();
    let mut board = Board::new();
    board.set(CellCoord::new(i32::MIN + 1, 0), Cell::tile("grassland", 0));

    assert!(paint_autotile(&mut board, edge, ground(), &ctx, &mut seeded_rng()));
    assert_eq!(tile_at(&board, i32::MIN, 0), Some(4));
    assert_eq!(tile_at(&board, i32::MIN + 1, 0), Some(1));
}

#[test]
fn group_switch_clears_stale_tile() {
    let mut catalog = demo_catalog();
    let water = catalog
        .add_tile(
            "grassland",
            TileBitmap::blank(16).with_group("water").with_mask(0).unwrap(),
        )
        .unwrap();
    let rules = RuleTable::new();
    let ctx = AutotileContext::new(&catalog, &rules);

    let mut board = Board::new();
    board.set(CellCoord::new(0, 0), Cell::tile("grassland", water));
    board.set(CellCoord::new(0, 1), Cell::tile("grassland", water));

    let mut rng = seeded_rng();
    paint_autotile(&mut board, CellCoord::new(0, 0), ground(), &ctx, &mut rng);
    assert_eq!(tile_at(&board, 0, 0), Some(0));
    // The water neighbor re-resolves in its own group and no longer sees water to its west.
    assert_eq!(tile_at(&board, 0, 1), Some(water));

    // Painting the same coordinate again keeps it in the new group.
    paint_autotile(&mut board, CellCoord::new(0, 0), ground(), &ctx, &mut rng);
    assert_eq!(tile_at(&board, 0, 0), Some(0));

    paint_autotile(&mut board, CellCoord::new(0, 1), ground(), &ctx, &mut rng);
    assert_eq!(tile_at(&board, 0, 1), Some(8));
    assert_eq!(tile_at(&board, 0, 0), Some(2));
}

#[test]
fn same_seed_same_choice() {
    let catalog = TileCatalog::with_builtin();
    let mut rules = RuleTable::new();
    rules.set_candidates(ground(), Mask::ISOLATED, vec![4, 5, 6, 7]);
    let ctx = AutotileContext::new(&catalog, &rules);

    let mut first = Board::new();
    let mut second = Board::new();
    paint_autotile(&mut first, CellCoord::new(3, 3), ground(), &ctx, &mut seeded_rng());
    paint_autotile(&mut second, CellCoord::new(3, 3), ground(), &ctx, &mut seeded_rng());
    assert_eq!(first, second);
    assert!(matches!(tile_at(&first, 3, 3), Some(4..=7)));
}
