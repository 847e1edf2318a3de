/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonConfig {
    /// Side length of the local map window, in cells. Must be odd so the
    /// window centers on the player.
    pub local_window: u32,
}

impl DungeonConfig {
    // ===== scoring and completion constants =====
    /// Score contribution of every visited room.
    pub const ROOM_SCORE: u32 = 10;
    /// Extra score contribution of each special room found.
    pub const SPECIAL_ROOM_SCORE: u32 = 50;
    /// Exploration percentage at which a floor counts as complete. Short of
    /// 100 because some cells are intentionally unreachable walls.
    pub const COMPLETION_THRESHOLD: f64 = 95.0;

    // ===== total-room estimate constants =====
    /// Smallest seed-derived base room count for a floor.
    pub const TOTAL_ROOMS_MIN: u32 = 40;
    /// Width of the seed-derived base range (base is MIN..MIN + SPREAD).
    pub const TOTAL_ROOMS_SPREAD: u32 = 41;
    /// Additional rooms per floor above the first.
    pub const ROOMS_PER_EXTRA_FLOOR: u32 = 12;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LOCAL_WINDOW: u32 = 7;

    pub fn new() -> Self {
        Self {
            local_window: Self::DEFAULT_LOCAL_WINDOW,
        }
    }

    /// Half-width of the local window, excluding the center cell.
    pub fn local_radius(&self) -> i32 {
        (self.local_window / 2) as i32
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self::new()
    }
}
