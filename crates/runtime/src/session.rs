use std::collections::BTreeSet;

use delve_core::codec::{self, CodecError};
use delve_core::progress;
use delve_core::{ExplorationReport, Position, RoomOracle};

/// Per-session owner of the visited set for one active run.
///
/// Created (or rehydrated from a compressed history) at the start of a
/// command invocation, mutated by at most one movement or lookup, then
/// compressed again for the store. Instances must not be shared across
/// concurrent invocations for the same run; the command layer serializes
/// access so there is at most one writer per run at any instant.
#[derive(Clone, Debug, Default)]
pub struct ExplorationTracker {
    /// Visitation order, for trail rendering.
    order: Vec<Position>,
    /// Canonical membership index; also the codec input.
    index: BTreeSet<Position>,
}

impl ExplorationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates a tracker from a persisted history string.
    pub fn from_compressed(compressed: &str) -> Self {
        let mut tracker = Self::new();
        tracker.load_from(compressed);
        tracker
    }

    /// Clears the tracker and decodes `compressed` into it.
    ///
    /// A corrupt string is a recoverable condition: the history can be
    /// re-discovered by walking, while failing the command cannot be
    /// recovered at all. The tracker logs a warning and starts empty.
    pub fn load_from(&mut self, compressed: &str) {
        self.order.clear();
        self.index.clear();
        match codec::decode(compressed) {
            Ok(coords) => {
                // Decoded order is canonical, not historical; it is the
                // best visitation order available after rehydration.
                self.order.extend(coords.iter().copied());
                self.index = coords;
            }
            Err(error) => {
                tracing::warn!(%error, "corrupt exploration history, falling back to empty set");
            }
        }
    }

    /// Idempotent insert. Returns true when the cell was newly visited.
    ///
    /// # Errors
    ///
    /// [`CodecError::CoordinateOutOfRange`] for coordinates the codec
    /// window cannot hold; rejecting here keeps the owned set encodable
    /// at all times.
    pub fn mark_visited(&mut self, position: Position) -> Result<bool, CodecError> {
        if !codec::supports(position) {
            return Err(CodecError::CoordinateOutOfRange { position });
        }
        if self.index.insert(position) {
            self.order.push(position);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn is_visited(&self, position: Position) -> bool {
        self.index.contains(&position)
    }

    /// Visited cells in visitation order.
    pub fn visited(&self) -> &[Position] {
        &self.order
    }

    pub fn visited_set(&self) -> &BTreeSet<Position> {
        &self.index
    }

    /// Canonical compressed form of the current visited set.
    pub fn save_to_compressed(&self) -> String {
        // The window check in mark_visited keeps the set encodable.
        codec::encode(&self.index).unwrap_or_default()
    }

    /// Full exploration report for the current set, compressed form
    /// attached.
    pub fn generate_report(
        &self,
        oracle: &(impl RoomOracle + ?Sized),
        seed: &str,
        floor: u32,
    ) -> ExplorationReport {
        progress::compute_report(oracle, seed, floor, &self.index).unwrap_or_else(|error| {
            // Unreachable while the mark_visited window check holds.
            tracing::warn!(%error, "visited set failed to encode, reporting empty progress");
            ExplorationReport {
                rooms_visited: 0,
                estimated_total_rooms: progress::estimate_total_rooms(seed, floor),
                exploration_percentage: 0.0,
                special_rooms_found: 0,
                exploration_score: 0,
                is_floor_complete: false,
                compressed_history: String::new(),
            }
        })
    }
}
