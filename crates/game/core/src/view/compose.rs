use std::collections::BTreeSet;

use crate::codec::CodecError;
use crate::config::DungeonConfig;
use crate::oracle::RoomOracle;
use crate::progress;
use crate::state::{DungeonGrid, Position};
use crate::view::scene::{
    LegendEntry, MapMode, PLAYER_SYMBOL, REACHABLE_SYMBOL, SceneCell, SceneDescription, SceneStats,
    WindowBounds, room_symbol,
};

/// Computes the renderable scene for one floor.
///
/// Cell precedence, outermost first: the player marker, then the
/// authoritative kind of a discovered grid cell, then the oracle
/// prediction for a cell in the visited history, then the
/// unexplored-but-reachable marker for passable neighbours of the
/// player. Anything else is blank and omitted.
///
/// `visited` is in visitation order; it doubles as the trail source.
///
/// # Errors
///
/// Propagates [`CodecError`] from the embedded progress report when the
/// visited history contains a coordinate outside the codec window.
pub fn compose(
    grid: Option<&DungeonGrid>,
    visited: &[Position],
    oracle: &(impl RoomOracle + ?Sized),
    seed: &str,
    floor: u32,
    position: Position,
    mode: MapMode,
    config: &DungeonConfig,
) -> Result<SceneDescription, CodecError> {
    let visited_set: BTreeSet<Position> = visited.iter().copied().collect();
    let window = window_bounds(grid, &visited_set, position, mode, config);

    let mut cells = Vec::new();
    let mut legend: Vec<LegendEntry> = Vec::new();
    for y in window.y0..=window.y1 {
        for x in window.x0..=window.x1 {
            let here = Position::new(x, y);
            let Some((cell, label)) =
                resolve_cell(grid, &visited_set, oracle, seed, floor, position, here)
            else {
                continue;
            };
            if !legend.iter().any(|entry| entry.symbol == cell.symbol) {
                legend.push(LegendEntry {
                    symbol: cell.symbol,
                    label,
                });
            }
            cells.push(cell);
        }
    }

    let report = progress::compute_report(oracle, seed, floor, &visited_set)?;

    Ok(SceneDescription {
        mode,
        window,
        cells,
        legend,
        trail: windowed_trail(visited, window),
        stats: SceneStats {
            discovered: report.rooms_visited,
            total: report.estimated_total_rooms,
            percentage: report.exploration_percentage,
        },
    })
}

fn window_bounds(
    grid: Option<&DungeonGrid>,
    visited: &BTreeSet<Position>,
    position: Position,
    mode: MapMode,
    config: &DungeonConfig,
) -> WindowBounds {
    match mode {
        MapMode::Local => {
            let r = config.local_radius();
            let mut bounds = WindowBounds {
                x0: position.x - r,
                y0: position.y - r,
                x1: position.x + r,
                y1: position.y + r,
            };
            if let Some(grid) = grid {
                let dims = grid.dimensions();
                bounds.x0 = bounds.x0.max(0);
                bounds.y0 = bounds.y0.max(0);
                bounds.x1 = bounds.x1.min(dims.width as i32 - 1);
                bounds.y1 = bounds.y1.min(dims.height as i32 - 1);
            }
            bounds
        }
        MapMode::Full => match grid {
            Some(grid) => {
                let dims = grid.dimensions();
                WindowBounds {
                    x0: 0,
                    y0: 0,
                    x1: dims.width as i32 - 1,
                    y1: dims.height as i32 - 1,
                }
            }
            // With no materialized grid the "entire extent" is everything
            // the run has seen, plus wherever the player stands now.
            None => {
                let mut bounds = WindowBounds {
                    x0: position.x,
                    y0: position.y,
                    x1: position.x,
                    y1: position.y,
                };
                for p in visited {
                    bounds.x0 = bounds.x0.min(p.x);
                    bounds.y0 = bounds.y0.min(p.y);
                    bounds.x1 = bounds.x1.max(p.x);
                    bounds.y1 = bounds.y1.max(p.y);
                }
                bounds
            }
        },
    }
}

fn resolve_cell(
    grid: Option<&DungeonGrid>,
    visited: &BTreeSet<Position>,
    oracle: &(impl RoomOracle + ?Sized),
    seed: &str,
    floor: u32,
    player: Position,
    here: Position,
) -> Option<(SceneCell, String)> {
    if here == player {
        return Some((
            SceneCell {
                position: here,
                symbol: PLAYER_SYMBOL,
                is_player: true,
                is_predicted: false,
            },
            "you".to_owned(),
        ));
    }

    // Grid-authoritative wins whenever the cell was actually discovered.
    if let Some(cell) = grid.and_then(|g| g.cell(here)) {
        if cell.discovered {
            return Some((
                SceneCell {
                    position: here,
                    symbol: room_symbol(cell.kind),
                    is_player: false,
                    is_predicted: false,
                },
                cell.kind.to_string(),
            ));
        }
    }

    // History-only reconstruction: the cell was visited in some past
    // invocation but the grid copy at hand does not mark it discovered
    // (or there is no grid at all).
    if visited.contains(&here) {
        let kind = oracle.room_kind(seed, floor, here);
        return Some((
            SceneCell {
                position: here,
                symbol: room_symbol(kind),
                is_player: false,
                is_predicted: true,
            },
            kind.to_string(),
        ));
    }

    // Adjacency reveal: passable neighbours of the player show up as a
    // reachable marker without giving the kind away.
    if here.is_adjacent(player) && is_passable(grid, here) {
        return Some((
            SceneCell {
                position: here,
                symbol: REACHABLE_SYMBOL,
                is_player: false,
                is_predicted: false,
            },
            "unexplored".to_owned(),
        ));
    }

    None
}

fn is_passable(grid: Option<&DungeonGrid>, position: Position) -> bool {
    match grid {
        // Without a grid there is nothing to rule the neighbour out.
        None => true,
        Some(grid) => grid
            .cell(position)
            .map(|cell| cell.is_passable())
            .unwrap_or(false),
    }
}

fn windowed_trail(visited: &[Position], window: WindowBounds) -> Vec<Position> {
    let mut trail: Vec<Position> = Vec::new();
    for pair in visited.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if window.contains(a) && window.contains(b) {
            if trail.last() != Some(&a) {
                trail.push(a);
            }
            trail.push(b);
        }
    }
    // A single visited cell inside the window still anchors the trail.
    if trail.is_empty() && visited.len() == 1 && window.contains(visited[0]) {
        trail.push(visited[0]);
    }
    trail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::HashOracle;
    use crate::state::{Cell, RoomKind};
    use crate::view::scene::{PLAYER_SYMBOL, REACHABLE_SYMBOL};

    struct FixedOracle(RoomKind);

    impl RoomOracle for FixedOracle {
        fn room_kind(&self, _seed: &str, _floor: u32, _position: Position) -> RoomKind {
            self.0
        }
    }

    fn grid_5x5() -> DungeonGrid {
        DungeonGrid::new(5, 5, Cell::new(RoomKind::Empty))
    }

    fn positions(coords: &[(i32, i32)]) -> Vec<Position> {
        coords.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    fn cell_at(scene: &SceneDescription, x: i32, y: i32) -> Option<SceneCell> {
        scene
            .cells
            .iter()
            .copied()
            .find(|c| c.position == Position::new(x, y))
    }

    #[test]
    fn local_window_clips_to_grid_bounds() {
        let grid = grid_5x5();
        let scene = compose(
            Some(&grid),
            &[],
            &HashOracle,
            "seed",
            1,
            Position::new(1, 1),
            MapMode::Local,
            &DungeonConfig::default(),
        )
        .unwrap();

        // Radius 3 around (1, 1) would reach -2; the grid clips it.
        assert_eq!(
            scene.window,
            WindowBounds {
                x0: 0,
                y0: 0,
                x1: 4,
                y1: 4
            }
        );
    }

    #[test]
    fn local_window_is_unclipped_without_a_grid() {
        let scene = compose(
            None,
            &[],
            &HashOracle,
            "seed",
            1,
            Position::new(0, 0),
            MapMode::Local,
            &DungeonConfig::default(),
        )
        .unwrap();
        assert_eq!(
            scene.window,
            WindowBounds {
                x0: -3,
                y0: -3,
                x1: 3,
                y1: 3
            }
        );
    }

    #[test]
    fn discovered_grid_cell_beats_prediction() {
        let mut grid = grid_5x5();
        grid.set_cell(Position::new(2, 1), Cell::new(RoomKind::Monster));
        grid.mark_discovered(Position::new(2, 1));

        // The oracle would claim loot everywhere; the discovered grid cell
        // must win.
        let scene = compose(
            Some(&grid),
            &positions(&[(2, 1)]),
            &FixedOracle(RoomKind::Loot),
            "seed",
            1,
            Position::new(0, 0),
            MapMode::Full,
            &DungeonConfig::default(),
        )
        .unwrap();

        let cell = cell_at(&scene, 2, 1).unwrap();
        assert_eq!(cell.symbol, room_symbol(RoomKind::Monster));
        assert!(!cell.is_predicted);
    }

    #[test]
    fn undiscovered_visited_cell_is_predicted() {
        let grid = grid_5x5();
        let scene = compose(
            Some(&grid),
            &positions(&[(3, 4)]),
            &FixedOracle(RoomKind::Trap),
            "seed",
            1,
            Position::new(0, 0),
            MapMode::Full,
            &DungeonConfig::default(),
        )
        .unwrap();

        let cell = cell_at(&scene, 3, 4).unwrap();
        assert_eq!(cell.symbol, room_symbol(RoomKind::Trap));
        assert!(cell.is_predicted);
    }

    #[test]
    fn adjacency_reveal_hides_the_kind_and_skips_walls() {
        let mut grid = grid_5x5();
        grid.set_cell(Position::new(0, 1), Cell::new(RoomKind::Wall));

        let scene = compose(
            Some(&grid),
            &[],
            &HashOracle,
            "seed",
            1,
            Position::new(1, 1),
            MapMode::Full,
            &DungeonConfig::default(),
        )
        .unwrap();

        // Passable neighbours show the reachable marker only.
        let north = cell_at(&scene, 1, 0).unwrap();
        assert_eq!(north.symbol, REACHABLE_SYMBOL);
        assert!(!north.is_predicted);

        // The wall neighbour stays blank, and diagonals are not revealed.
        assert!(cell_at(&scene, 0, 1).is_none());
        assert!(cell_at(&scene, 2, 2).is_none());

        let player = cell_at(&scene, 1, 1).unwrap();
        assert_eq!(player.symbol, PLAYER_SYMBOL);
        assert!(player.is_player);
    }

    #[test]
    fn legend_is_deduplicated_and_in_first_use_order() {
        let scene = compose(
            None,
            &positions(&[(1, 0), (2, 0), (3, 0)]),
            &FixedOracle(RoomKind::Shop),
            "seed",
            1,
            Position::new(0, 0),
            MapMode::Full,
            &DungeonConfig::default(),
        )
        .unwrap();

        let symbols: Vec<char> = scene.legend.iter().map(|entry| entry.symbol).collect();
        // Three shop cells yield one legend row; row-major order puts the
        // player first on this single-row layout.
        assert_eq!(symbols, vec![PLAYER_SYMBOL, room_symbol(RoomKind::Shop)]);
        let shop = &scene.legend[1];
        assert_eq!(shop.label, "shop");
    }

    #[test]
    fn trail_keeps_only_segments_fully_inside_the_window() {
        let grid = grid_5x5();
        let visited = positions(&[(0, 0), (1, 0), (9, 9), (2, 0)]);
        let scene = compose(
            Some(&grid),
            &visited,
            &HashOracle,
            "seed",
            1,
            Position::new(0, 0),
            MapMode::Full,
            &DungeonConfig::default(),
        )
        .unwrap();

        // (1,0)->(9,9) and (9,9)->(2,0) each have an endpoint outside.
        assert_eq!(scene.trail, positions(&[(0, 0), (1, 0)]));
    }

    #[test]
    fn full_mode_without_grid_covers_the_visited_bounding_box() {
        let scene = compose(
            None,
            &positions(&[(2, 3), (5, 1)]),
            &HashOracle,
            "seed",
            1,
            Position::new(0, 0),
            MapMode::Full,
            &DungeonConfig::default(),
        )
        .unwrap();
        assert_eq!(
            scene.window,
            WindowBounds {
                x0: 0,
                y0: 0,
                x1: 5,
                y1: 3
            }
        );
    }

    #[test]
    fn stats_match_the_progress_report() {
        let visited = positions(&[(0, 0), (1, 0), (2, 3)]);
        let visited_set: BTreeSet<Position> = visited.iter().copied().collect();
        let report = progress::compute_report(&HashOracle, "abc123", 2, &visited_set).unwrap();

        let scene = compose(
            None,
            &visited,
            &HashOracle,
            "abc123",
            2,
            Position::new(2, 3),
            MapMode::Local,
            &DungeonConfig::default(),
        )
        .unwrap();

        assert_eq!(scene.stats.discovered, report.rooms_visited);
        assert_eq!(scene.stats.total, report.estimated_total_rooms);
        assert_eq!(scene.stats.percentage, report.exploration_percentage);
    }
}
