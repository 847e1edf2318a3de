use strum::{Display, EnumIter};

/// Canonical classification of a dungeon cell.
///
/// The enumeration is closed on purpose: renderers, the oracle, and the
/// progress estimator all match on it exhaustively, so adding a variant is
/// a compile-time event rather than a silent fallback at run time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomKind {
    /// Floor entry point. Placed explicitly at grid generation time, never
    /// predicted by the oracle.
    Entrance,
    Empty,
    Monster,
    Trap,
    Event,
    Shop,
    Loot,
    Boss,
    /// Impassable cell. Covers both carved walls and obstacles.
    Wall,
}

impl RoomKind {
    /// Rooms that count toward the "special rooms found" statistic.
    pub fn is_special(self) -> bool {
        matches!(
            self,
            RoomKind::Boss | RoomKind::Shop | RoomKind::Loot | RoomKind::Event
        )
    }

    pub fn is_passable(self) -> bool {
        !matches!(self, RoomKind::Wall)
    }
}
