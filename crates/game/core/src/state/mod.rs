//! Grid-domain value types shared by every component.
mod common;
mod grid;
mod room;

pub use common::{Direction, ExitSet, Position, UnknownDirection};
pub use grid::{Cell, DungeonGrid, GridDimensions};
pub use room::RoomKind;
