//! Deterministic dungeon-exploration rules and data types.
//!
//! `delve-core` defines the canonical exploration logic behind the
//! dungeon-crawl feature: the seed-keyed room oracle, the visited-set
//! compression codec, the progress estimator, and the map-view scene
//! computation. Everything here is a pure computation over caller-owned
//! values; the session layer (`delve-runtime`) and the surrounding
//! chat/storage collaborators depend on the types re-exported here.
pub mod codec;
pub mod config;
pub mod oracle;
pub mod progress;
pub mod state;
pub mod view;

pub use codec::CodecError;
pub use config::DungeonConfig;
pub use oracle::{HashOracle, RoomOracle};
pub use progress::{ExplorationReport, compute_report, estimate_total_rooms};
pub use state::{
    Cell, Direction, DungeonGrid, ExitSet, GridDimensions, Position, RoomKind, UnknownDirection,
};
pub use view::{
    LegendEntry, MapMode, SceneCell, SceneDescription, SceneStats, WindowBounds, compose,
};
