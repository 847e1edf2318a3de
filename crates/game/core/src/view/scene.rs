use crate::state::{Position, RoomKind};

/// How much of the floor a scene covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MapMode {
    /// Fixed odd-sized square centered on the player, clipped to grid
    /// bounds.
    Local,
    /// The entire grid extent (or the visited bounding box when no grid
    /// is materialized).
    Full,
}

/// Inclusive rectangular window of cells covered by a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowBounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl WindowBounds {
    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.x0
            && position.x <= self.x1
            && position.y >= self.y0
            && position.y <= self.y1
    }

    pub fn width(&self) -> u32 {
        (self.x1 - self.x0 + 1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y1 - self.y0 + 1).max(0) as u32
    }
}

/// One renderable cell. Blank/unknown cells are omitted from the scene;
/// the rendering collaborator paints the background for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneCell {
    pub position: Position,
    pub symbol: char,
    pub is_player: bool,
    /// True when the kind came from the oracle rather than a discovered
    /// grid cell.
    pub is_predicted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegendEntry {
    pub symbol: char,
    pub label: String,
}

/// Summary statistics attached to a scene, taken from the progress
/// estimator so they match what the chat surface reports elsewhere.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneStats {
    pub discovered: u32,
    pub total: u32,
    pub percentage: f64,
}

/// Renderer-agnostic description of a map view.
///
/// This is the whole contract with the raster/vector backend: it turns a
/// scene into opaque bytes and nothing in this crate depends on how.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneDescription {
    pub mode: MapMode,
    pub window: WindowBounds,
    pub cells: Vec<SceneCell>,
    /// Symbol/meaning pairs actually used, in first-use order.
    pub legend: Vec<LegendEntry>,
    /// Visitation-order polyline, restricted to segments with both
    /// endpoints inside the window.
    pub trail: Vec<Position>,
    pub stats: SceneStats,
}

/// Marker for the player's current cell.
pub const PLAYER_SYMBOL: char = '@';
/// Marker for an unexplored cell adjacent to the player. The kind is
/// deliberately not revealed.
pub const REACHABLE_SYMBOL: char = '?';

/// Map symbol for a room kind. Exhaustive on purpose: a new kind without
/// a glyph is a compile-time error, not a silent blank.
pub fn room_symbol(kind: RoomKind) -> char {
    match kind {
        RoomKind::Entrance => '>',
        RoomKind::Empty => '.',
        RoomKind::Monster => 'M',
        RoomKind::Trap => '^',
        RoomKind::Event => '!',
        RoomKind::Shop => '$',
        RoomKind::Loot => '*',
        RoomKind::Boss => 'B',
        RoomKind::Wall => '#',
    }
}
