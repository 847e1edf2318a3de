use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

/// Discrete grid position expressed in cell coordinates.
///
/// `Ord` is derived field-by-field (x, then y), which is exactly the
/// canonical ordering the visit codec expects, so ordered containers of
/// positions need no extra sorting before encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// True when `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: Self) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement directions. Aliases ("n", "up", ...) are resolved by
/// the command surface before tokens reach this crate; parsing here accepts
/// only the canonical lowercase names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Grid delta for one step. Row 0 is the top of the map, so north
    /// decreases `y`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized direction token {token:?}")]
pub struct UnknownDirection {
    pub token: String,
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            other => Err(UnknownDirection {
                token: other.to_owned(),
            }),
        }
    }
}

bitflags! {
    /// Declared exits on a grid cell.
    ///
    /// An empty set means "no authoritative exit data was generated for
    /// this cell", not "no exits": movement validation only consults the
    /// set when it is non-empty.
    ///
    /// Serialization comes from the `bitflags/serde` feature, enabled
    /// together with this crate's `serde` feature.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ExitSet: u8 {
        const NORTH = 1 << 0;
        const SOUTH = 1 << 1;
        const EAST = 1 << 2;
        const WEST = 1 << 3;
    }
}

impl ExitSet {
    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::NORTH,
            Direction::South => Self::SOUTH,
            Direction::East => Self::EAST,
            Direction::West => Self::WEST,
        }
    }

    /// True when `direction` is declared, or when no exit data exists at
    /// all (in which case the guard does not apply).
    pub fn permits(self, direction: Direction) -> bool {
        self.is_empty() || self.contains(Self::from_direction(direction))
    }
}
