use delve_core::{DungeonGrid, Position};
use serde::{Deserialize, Serialize};

/// The externally-owned record for one active run.
///
/// The persistence collaborator hands this in at the start of a command
/// invocation and stores it back afterwards. This layer reads and updates
/// `position` and `compressed_history`; `grid`, when present, is the
/// authoritative source of cell data and must not be contradicted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub seed: String,
    /// Floor number, starting at 1.
    pub floor: u32,
    pub position: Position,
    pub grid: Option<DungeonGrid>,
    /// Opaque encoded visited set; only the visit codec produces or
    /// consumes it.
    pub compressed_history: String,
}

impl RunState {
    pub fn new(seed: impl Into<String>, floor: u32, position: Position) -> Self {
        Self {
            seed: seed.into(),
            floor,
            position,
            grid: None,
            compressed_history: String::new(),
        }
    }

    pub fn with_grid(mut self, grid: DungeonGrid) -> Self {
        self.grid = Some(grid);
        self
    }
}
