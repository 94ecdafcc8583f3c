#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Groundwork placement engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative grid, and the preview systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands
//! against its ground grid, and then notifies observers with [`TileEvent`]
//! values so visual layers can stay in sync. Shapes are rotated through the
//! pure helpers in [`shape`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod shape;

pub use shape::{rotate_shape, GridTile, TileShape};

/// Identifies what occupies a single grid cell.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GroundType {
    /// Empty, unoccupied cell.
    #[default]
    None,
    /// Bare rock.
    Rock,
    /// Loose sand.
    Sand,
    /// Grassland.
    Grass,
    /// Standing water.
    Lake,
    /// Impassable high ground.
    Mountain,
}

impl GroundType {
    /// Every occupied ground type in declaration order.
    pub const ALL_GROUND: [GroundType; 5] = [
        GroundType::Rock,
        GroundType::Sand,
        GroundType::Grass,
        GroundType::Lake,
        GroundType::Mountain,
    ];

    /// Reports whether the value denotes an empty cell.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Reports whether the value denotes an occupied cell.
    #[must_use]
    pub const fn is_ground(self) -> bool {
        !self.is_none()
    }

    /// Lowercase name matching the serialized representation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rock => "rock",
            Self::Sand => "sand",
            Self::Grass => "grass",
            Self::Lake => "lake",
            Self::Mountain => "mountain",
        }
    }
}

impl fmt::Display for GroundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Location of a single grid cell.
///
/// Coordinates are signed so that anchors combined with rotated offsets can
/// step outside the grid; such cells are rejected by bounds checks rather
/// than wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    x: i32,
    y: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the cell. Rows grow downward.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Applies a shape offset to the coordinate.
    #[must_use]
    pub const fn offset_by(self, offset: CellOffset) -> Self {
        Self {
            x: self.x.saturating_add(offset.dx()),
            y: self.y.saturating_add(offset.dy()),
        }
    }

    /// The four orthogonal neighbours in north, east, south, west order.
    #[must_use]
    pub const fn neighbors(self) -> [GridCoord; 4] {
        [
            Self::new(self.x, self.y.saturating_sub(1)),
            Self::new(self.x.saturating_add(1), self.y),
            Self::new(self.x, self.y.saturating_add(1)),
            Self::new(self.x.saturating_sub(1), self.y),
        ]
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Offset of a shape cell relative to the shape's anchor at `(0, 0)`.
///
/// Serialized as a two element `[dx, dy]` array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct CellOffset {
    dx: i32,
    dy: i32,
}

impl CellOffset {
    /// The anchor cell itself.
    pub const ORIGIN: CellOffset = CellOffset::new(0, 0);

    /// Creates a new offset.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Vertical component.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }

    /// Rotates the offset clockwise about the anchor by `direction`.
    ///
    /// Each quarter turn maps `(dx, dy)` to `(-dy, dx)`, which is a clockwise
    /// turn with rows growing downward. Negation wraps, so four quarter turns
    /// restore every offset, `i32::MIN` included.
    #[must_use]
    pub const fn rotated(self, direction: Direction) -> Self {
        let (dx, dy) = (self.dx, self.dy);
        match direction {
            Direction::North => Self::new(dx, dy),
            Direction::East => Self::new(dy.wrapping_neg(), dx),
            Direction::South => Self::new(dx.wrapping_neg(), dy.wrapping_neg()),
            Direction::West => Self::new(dy, dx.wrapping_neg()),
        }
    }
}

impl From<[i32; 2]> for CellOffset {
    fn from([dx, dy]: [i32; 2]) -> Self {
        Self::new(dx, dy)
    }
}

impl From<CellOffset> for [i32; 2] {
    fn from(offset: CellOffset) -> Self {
        [offset.dx, offset.dy]
    }
}

/// Cardinal orientation applied to a tile shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Unrotated orientation.
    #[default]
    North,
    /// Rotated 90 degrees clockwise.
    East,
    /// Rotated 180 degrees.
    South,
    /// Rotated 270 degrees clockwise.
    West,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Number of clockwise quarter turns represented by the direction.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction reached after `turns` clockwise quarter turns from north.
    #[must_use]
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// Composes two rotations: rotating by `self` and then by `next`.
    #[must_use]
    pub const fn then(self, next: Direction) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + next.quarter_turns())
    }

    /// Next direction clockwise.
    #[must_use]
    pub const fn rotate_clockwise(self) -> Self {
        self.then(Direction::East)
    }

    /// Next direction counter-clockwise.
    #[must_use]
    pub const fn rotate_counter_clockwise(self) -> Self {
        self.then(Direction::West)
    }
}

/// Notifications raised by the ground grid whenever a cell changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileEvent {
    /// An empty cell received ground.
    Placed {
        /// Cell that was filled.
        cell: GridCoord,
        /// Ground now occupying the cell.
        ground: GroundType,
    },
    /// An occupied cell was cleared.
    Removed {
        /// Cell that was cleared.
        cell: GridCoord,
        /// Ground that occupied the cell before removal.
        previous: GroundType,
    },
    /// An occupied cell switched to a different ground type.
    Changed {
        /// Cell that was re-skinned.
        cell: GridCoord,
        /// Ground that occupied the cell before the change.
        previous: GroundType,
        /// Ground occupying the cell after the change.
        current: GroundType,
    },
}

impl TileEvent {
    /// Classifies a cell write, returning `None` only for an empty cell written
    /// with empty ground. Rewriting a ground over itself is a change.
    #[must_use]
    pub fn classify(cell: GridCoord, previous: GroundType, current: GroundType) -> Option<Self> {
        match (previous.is_ground(), current.is_ground()) {
            (false, true) => Some(Self::Placed {
                cell,
                ground: current,
            }),
            (true, false) => Some(Self::Removed { cell, previous }),
            (true, true) => Some(Self::Changed {
                cell,
                previous,
                current,
            }),
            _ => None,
        }
    }

    /// Cell the event refers to.
    #[must_use]
    pub const fn cell(&self) -> GridCoord {
        match self {
            Self::Placed { cell, .. } | Self::Removed { cell, .. } | Self::Changed { cell, .. } => {
                *cell
            }
        }
    }
}

/// Commands that express all permissible grid mutations.
///
/// Serialized with an `op` tag so sessions can be scripted, e.g.
/// `{ op = "remove_one_tile", cell = { x = 1, y = 2 } }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Resizes the grid and clears every cell.
    InitializeGrid {
        /// Number of columns.
        width: u32,
        /// Number of rows.
        height: u32,
    },
    /// Seeds tiles at the grid center without adjacency or collision checks.
    PlaceInitialTile {
        /// Tiles stamped in order at the center anchor.
        tiles: Vec<GridTile>,
        /// Orientation applied to every tile.
        #[serde(default)]
        direction: Direction,
    },
    /// Places a tile when the target footprint is free and touches ground.
    PlaceTile {
        /// Anchor cell the shape is applied relative to.
        anchor: GridCoord,
        /// Tile to stamp.
        tile: GridTile,
        /// Orientation of the tile.
        #[serde(default)]
        direction: Direction,
    },
    /// Clears a tile footprint that is in bounds and touches ground.
    RemoveTile {
        /// Anchor cell the shape is applied relative to.
        anchor: GridCoord,
        /// Tile whose footprint is cleared.
        tile: GridTile,
        /// Orientation of the tile.
        #[serde(default)]
        direction: Direction,
    },
    /// Clears a single cell without validation.
    RemoveOneTile {
        /// Cell to clear.
        cell: GridCoord,
    },
    /// Re-skins a footprint that is in bounds and touches ground.
    UpdateTile {
        /// Anchor cell the shape is applied relative to.
        anchor: GridCoord,
        /// Tile carrying the new ground type.
        tile: GridTile,
        /// Orientation of the tile.
        #[serde(default)]
        direction: Direction,
    },
    /// Writes a single cell without validation.
    UpdateOneTile {
        /// Cell to overwrite.
        cell: GridCoord,
        /// Ground to write.
        ground: GroundType,
    },
}

/// Reasons a tile placement is rejected by the validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum PlacementError {
    /// The grid has not been initialized with positive dimensions.
    #[error("grid has not been initialized")]
    Uninitialized,
    /// No cell of the footprint is orthogonally adjacent to existing ground.
    #[error("footprint does not touch existing ground")]
    NotNearGround,
    /// A footprint cell falls outside the grid.
    #[error("cell {cell} lies outside the grid")]
    OutOfBounds {
        /// First offending cell in footprint order.
        cell: GridCoord,
    },
    /// A footprint cell already holds ground.
    #[error("cell {cell} is already occupied")]
    Occupied {
        /// First offending cell in footprint order.
        cell: GridCoord,
    },
}
