//! Placement rules evaluated against a ground grid.
//!
//! A placement rotates the tile's shape by the requested direction and
//! anchors it at `(x, y)`. Three rules apply:
//!
//! * adjacency: at least one footprint cell must have an occupied orthogonal
//!   neighbour,
//! * bounds: every footprint cell must lie inside the grid,
//! * collision: no footprint cell may already hold ground.
//!
//! [`can_place_tile`] combines adjacency and bounds. [`has_tile`] reports a
//! blocked spot, and counts a footprint that fails adjacency as blocked even
//! when every cell is empty. Committing a placement requires
//! `can_place_tile && !has_tile`, see [`can_confirm`].

use groundwork_core::{
    rotate_shape, CellOffset, Direction, GridCoord, GridTile, GroundType, PlacementError,
};

use crate::grid::GroundGrid;

/// Reports whether any in-range orthogonal neighbour of `(x, y)` holds
/// ground. Returns false when `(x, y)` itself lies outside the grid.
#[must_use]
pub fn is_point_near_ground(grid: &GroundGrid, x: i32, y: i32) -> bool {
    if !grid.valid_position(x, y) {
        return false;
    }

    GridCoord::new(x, y)
        .neighbors()
        .into_iter()
        .any(|neighbor| grid.tile_at(neighbor).is_ground())
}

/// Reports whether any cell of the already rotated `shape` anchored at
/// `(x, y)` is near ground.
#[must_use]
pub fn is_tile_near_ground(grid: &GroundGrid, x: i32, y: i32, shape: &[CellOffset]) -> bool {
    let anchor = GridCoord::new(x, y);
    shape.iter().any(|offset| {
        let cell = anchor.offset_by(*offset);
        is_point_near_ground(grid, cell.x(), cell.y())
    })
}

/// Adjacency and bounds rules; collisions are not considered.
#[must_use]
pub fn can_place_tile(
    grid: &GroundGrid,
    x: i32,
    y: i32,
    tile: &GridTile,
    direction: Direction,
) -> bool {
    let rotated = rotate_shape(tile.shape.offsets(), direction);
    if !is_tile_near_ground(grid, x, y, &rotated) {
        return false;
    }

    let anchor = GridCoord::new(x, y);
    rotated.iter().all(|offset| {
        let cell = anchor.offset_by(*offset);
        grid.valid_position(cell.x(), cell.y())
    })
}

/// Reports whether the spot is unavailable: the footprint does not touch
/// ground, or an in-range footprint cell is already occupied.
///
/// Out-of-range footprint cells are not considered here; see
/// [`can_place_tile`] for the bounds rule.
#[must_use]
pub fn has_tile(grid: &GroundGrid, x: i32, y: i32, tile: &GridTile, direction: Direction) -> bool {
    let rotated = rotate_shape(tile.shape.offsets(), direction);
    if !is_tile_near_ground(grid, x, y, &rotated) {
        return true;
    }

    let anchor = GridCoord::new(x, y);
    rotated
        .iter()
        .any(|offset| grid.tile_at(anchor.offset_by(*offset)).is_ground())
}

/// Confirm-placement policy: legal footprint and a free spot.
#[must_use]
pub fn can_confirm(
    grid: &GroundGrid,
    x: i32,
    y: i32,
    tile: &GridTile,
    direction: Direction,
) -> bool {
    can_place_tile(grid, x, y, tile, direction) && !has_tile(grid, x, y, tile, direction)
}

/// Explains why a placement would be rejected.
///
/// Succeeds exactly when [`can_confirm`] holds. Rules are checked in the
/// order initialization, adjacency, bounds, collision, and the first
/// offending footprint cell is reported.
pub fn check_placement(
    grid: &GroundGrid,
    x: i32,
    y: i32,
    tile: &GridTile,
    direction: Direction,
) -> Result<(), PlacementError> {
    if !grid.is_initialized() {
        return Err(PlacementError::Uninitialized);
    }

    let rotated = rotate_shape(tile.shape.offsets(), direction);
    if !is_tile_near_ground(grid, x, y, &rotated) {
        return Err(PlacementError::NotNearGround);
    }

    let anchor = GridCoord::new(x, y);
    let cells: Vec<GridCoord> = rotated
        .iter()
        .map(|offset| anchor.offset_by(*offset))
        .collect();

    if let Some(cell) = cells
        .iter()
        .find(|cell| !grid.valid_position(cell.x(), cell.y()))
    {
        return Err(PlacementError::OutOfBounds { cell: *cell });
    }

    if let Some(cell) = cells.iter().find(|cell| grid.tile_at(**cell).is_ground()) {
        return Err(PlacementError::Occupied { cell: *cell });
    }

    Ok(())
}

/// Reports whether every cell of the unrotated `shape` anchored at `(x, y)`
/// lies inside the grid and matches `required`.
///
/// With `required == GroundType::None` any occupied ground matches, which
/// answers "is this footprint fully built up".
#[must_use]
pub fn is_ground_valid(
    grid: &GroundGrid,
    x: i32,
    y: i32,
    shape: &[CellOffset],
    required: GroundType,
) -> bool {
    let anchor = GridCoord::new(x, y);
    shape.iter().all(|offset| {
        let cell = anchor.offset_by(*offset);
        if !grid.valid_position(cell.x(), cell.y()) {
            return false;
        }
        let ground = grid.tile_at(cell);
        if required.is_none() {
            ground.is_ground()
        } else {
            ground == required
        }
    })
}
