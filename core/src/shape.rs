//! Tile footprints and the pure shape rotator.

use serde::{Deserialize, Serialize};

use crate::{CellOffset, Direction, GridCoord, GroundType};

/// Rotates every offset of a shape about the anchor by `direction`.
///
/// The output preserves the input's order and length.
#[must_use]
pub fn rotate_shape(shape: &[CellOffset], direction: Direction) -> Vec<CellOffset> {
    shape
        .iter()
        .map(|offset| offset.rotated(direction))
        .collect()
}

/// Ordered footprint of a placeable tile relative to its anchor cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileShape {
    offsets: Vec<CellOffset>,
}

impl TileShape {
    /// Creates a shape from the provided offsets.
    #[must_use]
    pub fn new(offsets: Vec<CellOffset>) -> Self {
        Self { offsets }
    }

    /// Shape covering only the anchor cell.
    #[must_use]
    pub fn single() -> Self {
        Self::new(vec![CellOffset::ORIGIN])
    }

    /// Axis-aligned rectangle of `width` by `height` cells anchored at its
    /// upper-left corner, listed row by row.
    #[must_use]
    pub fn rectangle(width: u32, height: u32) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        let offsets = (0..height)
            .flat_map(|dy| (0..width).map(move |dx| CellOffset::new(dx, dy)))
            .collect();
        Self { offsets }
    }

    /// Offsets composing the footprint.
    #[must_use]
    pub fn offsets(&self) -> &[CellOffset] {
        &self.offsets
    }

    /// Number of cells in the footprint.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Reports whether the footprint has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Component-wise maximum of the offsets, starting from the anchor.
    ///
    /// Only meaningful as a centering hint; validation never consults it.
    #[must_use]
    pub fn size(&self) -> CellOffset {
        self.offsets
            .iter()
            .fold(CellOffset::ORIGIN, |size, offset| {
                CellOffset::new(size.dx().max(offset.dx()), size.dy().max(offset.dy()))
            })
    }

    /// Returns the shape rotated about the anchor by `direction`.
    #[must_use]
    pub fn rotated(&self, direction: Direction) -> Self {
        Self::new(rotate_shape(&self.offsets, direction))
    }

    /// Absolute cells covered when the shape is anchored at `anchor` with the
    /// given orientation.
    pub fn cells_at(
        &self,
        anchor: GridCoord,
        direction: Direction,
    ) -> impl Iterator<Item = GridCoord> + '_ {
        self.offsets
            .iter()
            .map(move |offset| anchor.offset_by(offset.rotated(direction)))
    }
}

impl From<Vec<CellOffset>> for TileShape {
    fn from(offsets: Vec<CellOffset>) -> Self {
        Self::new(offsets)
    }
}

/// Stamp applied when placing: a footprint plus the ground it lays down.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridTile {
    /// Footprint of the tile.
    pub shape: TileShape,
    /// Ground written into every footprint cell.
    pub ground: GroundType,
}

impl GridTile {
    /// Creates a new tile.
    #[must_use]
    pub const fn new(shape: TileShape, ground: GroundType) -> Self {
        Self { shape, ground }
    }

    /// Single-cell tile of the provided ground.
    #[must_use]
    pub fn single(ground: GroundType) -> Self {
        Self::new(TileShape::single(), ground)
    }

    /// Centering hint for the tile's footprint.
    #[must_use]
    pub fn size(&self) -> CellOffset {
        self.shape.size()
    }
}
