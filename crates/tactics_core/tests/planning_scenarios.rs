//! Scenario tests for grids, searches and multi-turn planning.
//!
//! These exercise the public API the way a game's input and animation layers
//! would: build a map, place units, ask for plans.

use tactics_core::prelude::*;
use tactics_test_utils::fixtures::{
    corridor, grid_from_layout, open_grid, place_units, pos, skirmish_map, walled_grid,
};
use tactics_test_utils::oracle::{bfs_distance, is_connected};

// =============================================================================
// Grid topology
// =============================================================================

#[test]
fn resize_down_keeps_overlapping_terrain() {
    let mut grid = open_grid(5, 5);
    for i in 0..5 {
        grid.set_tile_type(pos(i, i), TerrainType::Obstacle);
        grid.set_tile_type(pos(4 - i, i), TerrainType::Cover);
    }
    let before: Vec<(Position, TerrainType)> = grid
        .tiles()
        .filter(|t| t.position().x < 3 && t.position().y < 3)
        .map(|t| (t.position(), t.terrain()))
        .collect();

    grid.resize(3, 3).unwrap();

    assert_eq!(grid.tile_count(), 9);
    for (p, terrain) in before {
        assert_eq!(grid.tile(p).unwrap().terrain(), terrain, "at {p}");
    }
    assert!(grid.get_tile(3, 3).is_none());
}

#[test]
fn resize_up_keeps_original_region() {
    let mut grid = open_grid(5, 5);
    grid.set_tile_type(pos(0, 4), TerrainType::Obstacle);
    grid.set_tile_type(pos(4, 0), TerrainType::Cover);

    grid.resize(7, 7).unwrap();

    assert_eq!(grid.get_tile(0, 4).unwrap().terrain(), TerrainType::Obstacle);
    assert_eq!(grid.get_tile(4, 0).unwrap().terrain(), TerrainType::Cover);
    let fresh = grid
        .tiles()
        .filter(|t| t.position().x >= 5 || t.position().y >= 5);
    for tile in fresh {
        assert_eq!(tile.terrain(), TerrainType::Traversable);
    }

    // Adjacency reaches into the new region.
    let path = find_path(&grid, pos(0, 0), pos(6, 6), Ruleset::Movement);
    assert_eq!(path.moves(), Some(12));
}

#[test]
fn resize_drops_occupants() {
    let mut grid = open_grid(4, 4);
    place_units(&mut grid, &[pos(1, 1), pos(3, 3)]);

    grid.resize(4, 4).unwrap();

    assert!(grid.tiles().all(|t| !t.is_occupied()));
}

// =============================================================================
// Rulesets
// =============================================================================

#[test]
fn obstacle_row_blocks_everything() {
    let grid = walled_grid(6, 5, 2, TerrainType::Obstacle);
    assert!(find_path(&grid, pos(1, 0), pos(4, 4), Ruleset::Movement).is_empty());
    assert!(find_path(&grid, pos(1, 0), pos(4, 4), Ruleset::Attack).is_empty());
}

#[test]
fn cover_row_blocks_movement_but_not_attacks() {
    let grid = walled_grid(6, 5, 2, TerrainType::Cover);

    assert!(find_path(&grid, pos(1, 0), pos(4, 4), Ruleset::Movement).is_empty());

    let attack = find_path(&grid, pos(1, 0), pos(4, 4), Ruleset::Attack);
    assert_eq!(attack.moves(), Some(7));
    let crossings: Vec<Position> = attack.iter().copied().filter(|p| p.y == 2).collect();
    assert_eq!(crossings.len(), 1);

    // Cover tiles are passed through but never offered as places to stand.
    let reach = movement_range(&grid, pos(1, 0), 10);
    assert!(reach.iter().all(|r| r.position.y < 2));
    assert!(attack_positions(&grid, pos(4, 4), 3)
        .iter()
        .all(|&p| grid.tile(p).unwrap().terrain() == TerrainType::Traversable));
}

// =============================================================================
// Attack staging
// =============================================================================

#[test]
fn attack_position_on_open_grid() {
    let mut grid = open_grid(10, 10);
    place_units(&mut grid, &[pos(0, 0), pos(5, 5)]);

    let best = find_best_attack_position(&grid, pos(0, 0), pos(5, 5), 1).unwrap();

    let adjacent: Vec<Position> = grid.neighbors(pos(5, 5)).map(Tile::position).collect();
    assert!(adjacent.contains(&best));

    let min = adjacent
        .iter()
        .filter_map(|&p| bfs_distance(&grid, pos(0, 0), p, Ruleset::Movement))
        .min();
    assert_eq!(bfs_distance(&grid, pos(0, 0), best, Ruleset::Movement), min);
}

#[test]
fn attack_position_avoids_occupied_tiles() {
    let mut grid = open_grid(5, 1);
    // Attacker, blocker right next to the enemy, enemy.
    place_units(&mut grid, &[pos(0, 0), pos(3, 0), pos(4, 0)]);

    // Range 1 would need (3, 0), which is taken; nothing else is in range.
    assert_eq!(find_best_attack_position(&grid, pos(0, 0), pos(4, 0), 1), None);
    // Range 2 lets the attacker stand at (2, 0) and strike over the blocker.
    assert_eq!(
        find_best_attack_position(&grid, pos(0, 0), pos(4, 0), 2),
        Some(pos(2, 0))
    );
}

// =============================================================================
// Multi-turn planning
// =============================================================================

#[test]
fn corridor_three_even_turns() {
    let grid = corridor(10);
    let mut planner = Planner::default();

    let plan = planner.plan_multi_turn_movement(&grid, pos(0, 0), pos(9, 0), 3);

    assert_eq!(plan.len(), 3);
    let expected: [&[Position]; 3] = [
        &[pos(1, 0), pos(2, 0), pos(3, 0)],
        &[pos(4, 0), pos(5, 0), pos(6, 0)],
        &[pos(7, 0), pos(8, 0), pos(9, 0)],
    ];
    for (segment, tiles) in plan.iter().zip(expected) {
        assert_eq!(segment.tiles.as_slice(), tiles);
    }
    assert_eq!(plan.iter().map(|s| s.turn).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn skirmish_map_plan_matches_shortest_distance() {
    let grid = skirmish_map();
    let mut planner = Planner::default();
    let (start, target) = (pos(0, 0), pos(11, 7));

    let plan = planner.plan_multi_turn_movement(&grid, start, target, 4);

    let mut walked = vec![start];
    for segment in &plan {
        walked.extend(segment.tiles.iter());
    }
    assert!(is_connected(&walked));
    assert_eq!(walked.last(), Some(&target));
    assert_eq!(
        Some(walked.len() - 1),
        bfs_distance(&grid, start, target, Ruleset::Movement)
    );
    assert!(plan.iter().all(|s| s.tiles.len() <= 4));
}

#[test]
fn boxed_in_unit_has_no_plan() {
    let grid = grid_from_layout(
        "
        .#....
        #.#...
        .#....
        ",
    );
    let mut planner = Planner::default();
    assert!(planner
        .plan_multi_turn_movement(&grid, pos(1, 1), pos(5, 2), 3)
        .is_empty());
}

#[test]
fn terrain_edit_between_plans_is_seen() {
    let mut grid = open_grid(5, 3);
    let mut planner = Planner::default();

    let open = planner.plan_multi_turn_movement(&grid, pos(0, 1), pos(4, 1), 10);
    assert_eq!(open[0].tiles.len(), 4);

    for y in 0..3 {
        grid.set_tile_type(pos(2, y), TerrainType::Obstacle);
    }
    let blocked = planner.plan_multi_turn_movement(&grid, pos(0, 1), pos(4, 1), 10);
    assert!(blocked.is_empty());

    grid.set_tile_type(pos(2, 0), TerrainType::Traversable);
    let detour = planner.plan_multi_turn_movement(&grid, pos(0, 1), pos(4, 1), 10);
    assert_eq!(detour[0].tiles.len(), 6);
}

#[test]
fn unit_stepping_into_the_route_is_seen() {
    let mut grid = open_grid(5, 3);
    let mut planner = Planner::default();

    let open = planner.plan_multi_turn_movement(&grid, pos(0, 1), pos(4, 1), 10);
    assert_eq!(
        open[0].tiles.as_slice(),
        &[pos(1, 1), pos(2, 1), pos(3, 1), pos(4, 1)]
    );

    grid.set_occupant(pos(2, 1), OccupantId(7)).unwrap();
    let detour = planner.plan_multi_turn_movement(&grid, pos(0, 1), pos(4, 1), 10);
    assert_eq!(detour[0].tiles.len(), 6);
    assert!(!detour[0].tiles.as_slice().contains(&pos(2, 1)));

    grid.clear_occupant(pos(2, 1));
    let reopened = planner.plan_multi_turn_movement(&grid, pos(0, 1), pos(4, 1), 10);
    assert_eq!(reopened, open);
    assert_eq!(planner.cache_stats().hits, 0);
}

#[test]
fn planner_reused_across_maps() {
    let open = open_grid(3, 1);
    let walled = grid_from_layout(".#.");
    let mut planner = Planner::default();

    let first = planner.plan_multi_turn_movement(&open, pos(0, 0), pos(2, 0), 5);
    assert_eq!(first.len(), 1);

    assert!(planner
        .plan_multi_turn_movement(&walled, pos(0, 0), pos(2, 0), 5)
        .is_empty());
}

#[test]
fn attack_approach_across_skirmish_map() {
    let mut grid = skirmish_map();
    place_units(&mut grid, &[pos(0, 0), pos(6, 7)]);
    let mut planner = Planner::default();

    let plan = planner.plan_attack_approach(&grid, pos(0, 0), pos(6, 7), 3, 2);

    assert!(plan.is_reachable());
    let staging = plan.staging_tile().unwrap();
    assert!(attack_positions(&grid, pos(6, 7), 2).contains(&staging));

    let attack = plan.attack.as_ref().unwrap();
    assert_eq!(attack.end(), Some(pos(6, 7)));
    assert!(attack.tiles.len() <= 2);
    assert!(!attack.tiles.as_slice().contains(&staging));
    assert_eq!(attack.turn, plan.movement.last().unwrap().turn);
    assert!(staging.is_adjacent(attack.tiles.start().unwrap()));
}
