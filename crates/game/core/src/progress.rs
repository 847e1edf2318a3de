//! Exploration-progress estimation.
//!
//! Percentages are computed against a seed-derived room estimate rather
//! than the real grid size, so progress stays stable whether or not the
//! grid is materialized for the current invocation.

use std::collections::BTreeSet;

use crate::codec::{self, CodecError};
use crate::config::DungeonConfig;
use crate::oracle::{HashOracle, RoomOracle};
use crate::state::Position;

/// Derived, ephemeral exploration statistics for one floor.
///
/// Never persisted directly: the store keeps only `compressed_history`
/// and everything else is recomputed on demand.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorationReport {
    pub rooms_visited: u32,
    pub estimated_total_rooms: u32,
    /// Percent of the floor explored, clamped to 100 and rounded to two
    /// decimals.
    pub exploration_percentage: f64,
    pub special_rooms_found: u32,
    pub exploration_score: u32,
    pub is_floor_complete: bool,
    pub compressed_history: String,
}

/// Deterministic, seed-derived estimate of a floor's room count.
///
/// A base count in `TOTAL_ROOMS_MIN..TOTAL_ROOMS_MIN + TOTAL_ROOMS_SPREAD`
/// plus a fixed increment per floor above the first. Derived from the
/// same keyed hash as room classification so it needs no grid and never
/// changes between calls.
pub fn estimate_total_rooms(seed: &str, floor: u32) -> u32 {
    let key = format!("{seed}:{floor}:total");
    let base =
        DungeonConfig::TOTAL_ROOMS_MIN + (HashOracle::keyed_hash(&key) % DungeonConfig::TOTAL_ROOMS_SPREAD as u64) as u32;
    base + floor.saturating_sub(1) * DungeonConfig::ROOMS_PER_EXTRA_FLOOR
}

/// Computes the full exploration report for a visited set.
///
/// Every visited cell is classified through the oracle; cells classified
/// as boss, shop, loot, or event count as special finds.
///
/// # Errors
///
/// Propagates [`CodecError`] when the visited set cannot be encoded
/// (coordinate outside the codec window).
pub fn compute_report(
    oracle: &(impl RoomOracle + ?Sized),
    seed: &str,
    floor: u32,
    visited: &BTreeSet<Position>,
) -> Result<ExplorationReport, CodecError> {
    let rooms_visited = visited.len() as u32;
    let special_rooms_found = visited
        .iter()
        .filter(|&&position| oracle.room_kind(seed, floor, position).is_special())
        .count() as u32;

    let estimated_total_rooms = estimate_total_rooms(seed, floor);
    let raw = f64::from(rooms_visited) / f64::from(estimated_total_rooms) * 100.0;
    let exploration_percentage = (raw.min(100.0) * 100.0).round() / 100.0;

    Ok(ExplorationReport {
        rooms_visited,
        estimated_total_rooms,
        exploration_percentage,
        special_rooms_found,
        exploration_score: rooms_visited * DungeonConfig::ROOM_SCORE
            + special_rooms_found * DungeonConfig::SPECIAL_ROOM_SCORE,
        is_floor_complete: exploration_percentage >= DungeonConfig::COMPLETION_THRESHOLD,
        compressed_history: codec::encode(visited)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RoomKind;

    struct FixedOracle(RoomKind);

    impl RoomOracle for FixedOracle {
        fn room_kind(&self, _seed: &str, _floor: u32, _position: Position) -> RoomKind {
            self.0
        }
    }

    fn visited(coords: &[(i32, i32)]) -> BTreeSet<Position> {
        coords.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn empty_set_reports_zero_progress() {
        let report = compute_report(&HashOracle, "abc123", 1, &BTreeSet::new()).unwrap();
        assert_eq!(report.rooms_visited, 0);
        assert_eq!(report.exploration_percentage, 0.0);
        assert_eq!(report.special_rooms_found, 0);
        assert_eq!(report.exploration_score, 0);
        assert!(!report.is_floor_complete);
        assert_eq!(report.compressed_history, "");
    }

    #[test]
    fn total_estimate_is_stable_and_floor_scaled() {
        let first = estimate_total_rooms("abc123", 1);
        assert_eq!(first, estimate_total_rooms("abc123", 1));
        assert!(
            (DungeonConfig::TOTAL_ROOMS_MIN
                ..DungeonConfig::TOTAL_ROOMS_MIN + DungeonConfig::TOTAL_ROOMS_SPREAD)
                .contains(&first)
        );

        let deeper = estimate_total_rooms("abc123", 5);
        assert!(deeper >= DungeonConfig::TOTAL_ROOMS_MIN + 4 * DungeonConfig::ROOMS_PER_EXTRA_FLOOR);
    }

    #[test]
    fn specials_and_score_follow_classification() {
        let cells = visited(&[(0, 0), (1, 0), (2, 0)]);

        let all_special = compute_report(&FixedOracle(RoomKind::Shop), "s", 1, &cells).unwrap();
        assert_eq!(all_special.special_rooms_found, 3);
        assert_eq!(
            all_special.exploration_score,
            3 * DungeonConfig::ROOM_SCORE + 3 * DungeonConfig::SPECIAL_ROOM_SCORE
        );

        let none_special = compute_report(&FixedOracle(RoomKind::Empty), "s", 1, &cells).unwrap();
        assert_eq!(none_special.special_rooms_found, 0);
        assert_eq!(none_special.exploration_score, 3 * DungeonConfig::ROOM_SCORE);
    }

    #[test]
    fn percentage_clamps_at_one_hundred() {
        // More visited cells than the largest possible estimate for floor 1.
        let many: BTreeSet<Position> = (0..15)
            .flat_map(|x| (0..15).map(move |y| Position::new(x, y)))
            .collect();
        let report = compute_report(&FixedOracle(RoomKind::Empty), "s", 1, &many).unwrap();
        assert_eq!(report.exploration_percentage, 100.0);
        assert!(report.is_floor_complete);
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        let report = compute_report(&FixedOracle(RoomKind::Empty), "s", 1, &visited(&[(0, 0)])).unwrap();
        let scaled = report.exploration_percentage * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }

    #[test]
    fn report_propagates_codec_rejection() {
        let out_of_window = visited(&[(500, 0)]);
        assert!(compute_report(&HashOracle, "s", 1, &out_of_window).is_err());
    }
}
