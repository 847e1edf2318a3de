use std::str::FromStr;

use delve_core::{Direction, ExplorationReport, Position, RoomKind, RoomOracle};
use serde::{Deserialize, Serialize};

use crate::event::{RoomEvent, RoomEventSink};
use crate::session::ExplorationTracker;
use crate::types::RunState;

/// Why a movement attempt was turned down. These are user-facing
/// rejections, not faults: the run continues and nothing changed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveRejection {
    #[error("unrecognized direction token {token:?}")]
    UnknownDirection { token: String },

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("no cell exists at {destination}")]
    MissingCell { destination: Position },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },

    #[error("current room has no {direction} exit")]
    NoExit { direction: Direction },
}

/// Result of one movement attempt, shaped for the command surface: it
/// either renders the new room and report, or the rejection reason.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<MoveRejection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_kind: Option<RoomKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ExplorationReport>,
}

impl MoveOutcome {
    fn moved(position: Position, room_kind: RoomKind, report: ExplorationReport) -> Self {
        Self {
            accepted: true,
            reason: None,
            new_position: Some(position),
            room_kind: Some(room_kind),
            report: Some(report),
        }
    }

    fn rejected(reason: MoveRejection) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
            new_position: None,
            room_kind: None,
            report: None,
        }
    }
}

/// Orchestrates a single player move.
///
/// One state per dungeon cell, transitions driven by direction tokens
/// from the closed {north, south, east, west} set (aliases are resolved
/// by the command surface). A failed guard leaves every piece of state
/// untouched and reports why; a passed guard updates position and
/// discovery, refreshes the report, writes the new compressed history
/// back onto the run record, and notifies the event sink.
pub struct PositionController<'a, O: RoomOracle + ?Sized> {
    oracle: &'a O,
}

impl<'a, O: RoomOracle + ?Sized> PositionController<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }

    pub fn step(
        &self,
        run: &mut RunState,
        tracker: &mut ExplorationTracker,
        sink: &mut dyn RoomEventSink,
        token: &str,
    ) -> MoveOutcome {
        let direction = match Direction::from_str(token) {
            Ok(direction) => direction,
            Err(unknown) => {
                return MoveOutcome::rejected(MoveRejection::UnknownDirection {
                    token: unknown.token,
                });
            }
        };
        let destination = run.position.step(direction);

        // Guards against the authoritative grid, when one exists. Without
        // a grid the move is optimistic and the kind is predicted.
        let room_kind = match &run.grid {
            Some(grid) => {
                if !grid.contains(destination) {
                    return MoveOutcome::rejected(MoveRejection::OutOfBounds { destination });
                }
                let declared_exits = grid
                    .cell(run.position)
                    .map(|cell| cell.exits)
                    .unwrap_or_default();
                if !declared_exits.permits(direction) {
                    return MoveOutcome::rejected(MoveRejection::NoExit { direction });
                }
                let Some(cell) = grid.cell(destination) else {
                    return MoveOutcome::rejected(MoveRejection::MissingCell { destination });
                };
                if !cell.is_passable() {
                    return MoveOutcome::rejected(MoveRejection::Blocked { destination });
                }
                cell.kind
            }
            None => self.oracle.room_kind(&run.seed, run.floor, destination),
        };

        // A gridless walk can leave the codec window; reject before any
        // state changes so persisted history stays intact.
        if tracker.mark_visited(destination).is_err() {
            return MoveOutcome::rejected(MoveRejection::OutOfBounds { destination });
        }

        if let Some(grid) = &mut run.grid {
            grid.mark_discovered(destination);
        }
        run.position = destination;

        let report = tracker.generate_report(self.oracle, &run.seed, run.floor);
        run.compressed_history = report.compressed_history.clone();

        tracing::debug!(%direction, %destination, %room_kind, "move accepted");
        if let Some(event) = RoomEvent::for_room(room_kind, destination) {
            sink.notify(event);
        }

        MoveOutcome::moved(destination, room_kind, report)
    }
}
