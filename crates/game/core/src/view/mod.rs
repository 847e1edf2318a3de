//! Map view.
//!
//! Computes a bounded, renderer-agnostic scene from whatever exploration
//! data exists: the authoritative grid when one is materialized, the
//! visited history with oracle predictions when it is not, and an
//! adjacency reveal around the player either way. Turning the scene into
//! raster or vector bytes is the job of an external collaborator.
mod compose;
mod scene;

pub use compose::compose;
pub use scene::{
    LegendEntry, MapMode, PLAYER_SYMBOL, REACHABLE_SYMBOL, SceneCell, SceneDescription, SceneStats,
    WindowBounds, room_symbol,
};
