use crate::state::{ExitSet, Position, RoomKind};

/// Width/height of a materialized dungeon grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// One materialized dungeon cell.
///
/// `kind` is authoritative: whenever a grid exists, predictions from the
/// room oracle must not contradict it for discovered cells. `exits` is
/// only a guard when non-empty; see [`ExitSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub kind: RoomKind,
    pub discovered: bool,
    pub exits: ExitSet,
    pub is_obstacle: bool,
}

impl Cell {
    pub fn new(kind: RoomKind) -> Self {
        Self {
            kind,
            discovered: false,
            exits: ExitSet::empty(),
            is_obstacle: matches!(kind, RoomKind::Wall),
        }
    }

    pub fn with_exits(mut self, exits: ExitSet) -> Self {
        self.exits = exits;
        self
    }

    pub fn is_passable(&self) -> bool {
        self.kind.is_passable() && !self.is_obstacle
    }
}

/// Row-major materialized grid, `(0, 0)` at the top-left corner.
///
/// The grid is owned by the run record; the core only ever mutates the
/// `discovered` flag of individual cells during movement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonGrid {
    dimensions: GridDimensions,
    cells: Vec<Cell>,
}

impl DungeonGrid {
    /// Builds a grid filled with `fill`. Callers populate real layouts via
    /// [`DungeonGrid::set_cell`].
    pub fn new(width: u32, height: u32, fill: Cell) -> Self {
        Self {
            dimensions: GridDimensions::new(width, height),
            cells: vec![fill; (width * height) as usize],
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| (position.y as u32 * self.dimensions.width + position.x as u32) as usize)
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index(position).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.index(position).map(move |i| &mut self.cells[i])
    }

    pub fn set_cell(&mut self, position: Position, cell: Cell) -> bool {
        match self.cell_mut(position) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Marks a cell discovered; returns false when the position is outside
    /// the grid.
    pub fn mark_discovered(&mut self, position: Position) -> bool {
        match self.cell_mut(position) {
            Some(cell) => {
                cell.discovered = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_grid(width: u32, height: u32) -> DungeonGrid {
        DungeonGrid::new(width, height, Cell::new(RoomKind::Empty))
    }

    #[test]
    fn bounds_checks_reject_negative_and_overflowing_positions() {
        let grid = empty_grid(4, 3);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(3, 2)));
        assert!(!grid.contains(Position::new(4, 0)));
        assert!(!grid.contains(Position::new(0, 3)));
        assert!(!grid.contains(Position::new(-1, 1)));
        assert!(grid.cell(Position::new(-1, 1)).is_none());
    }

    #[test]
    fn mark_discovered_flips_only_the_target_cell() {
        let mut grid = empty_grid(3, 3);
        assert!(grid.mark_discovered(Position::new(1, 2)));
        assert!(grid.cell(Position::new(1, 2)).unwrap().discovered);
        assert!(!grid.cell(Position::new(2, 1)).unwrap().discovered);
        assert!(!grid.mark_discovered(Position::new(9, 9)));
    }

    #[test]
    fn wall_cells_default_to_obstacles() {
        let wall = Cell::new(RoomKind::Wall);
        assert!(!wall.is_passable());

        let floor = Cell::new(RoomKind::Monster);
        assert!(floor.is_passable());
    }
}
