//! Per-session exploration layer.
//!
//! Wraps the pure `delve-core` computations with the state that lives for
//! exactly one command invocation: the visited-set tracker, the position
//! controller that resolves a move against the run record, and the
//! room-event boundary to the combat/quest collaborators. Nothing here
//! performs I/O; persistence hands records in and takes them back.
pub mod controller;
pub mod event;
pub mod session;
pub mod types;

pub use controller::{MoveOutcome, MoveRejection, PositionController};
pub use event::{NullSink, RoomEvent, RoomEventSink};
pub use session::ExplorationTracker;
pub use types::RunState;
