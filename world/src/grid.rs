//! Authoritative ground occupancy storage.

use groundwork_core::{GridCoord, GroundType, TileEvent};

use crate::observers::{ObserverRegistry, SubscriptionId, TileObserver};

/// Dense `width x height` buffer of ground types, indexed `y * width + x`.
///
/// Every read and write is bounds-checked; coordinates outside the grid read
/// as [`GroundType::None`] and writes to them are ignored. The grid owns the
/// observers notified on mutation.
#[derive(Debug, Default)]
pub struct GroundGrid {
    width: u32,
    height: u32,
    cells: Vec<GroundType>,
    observers: ObserverRegistry,
}

impl GroundGrid {
    /// Creates a grid of the provided dimensions with every cell empty.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut grid = Self::default();
        grid.reset(width, height);
        grid
    }

    /// Resizes the grid and clears every cell without notifying observers.
    pub(crate) fn reset(&mut self, width: u32, height: u32) {
        let capacity_u64 = u64::from(width) * u64::from(height);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        if capacity == 0 {
            self.width = 0;
            self.height = 0;
        } else {
            self.width = width;
            self.height = height;
        }
        self.cells.clear();
        self.cells.resize(capacity, GroundType::None);
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the grid has any cells.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Reports whether `(x, y)` lies inside the grid.
    #[must_use]
    pub fn valid_position(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Ground stored at `(x, y)`, or [`GroundType::None`] outside the grid.
    #[must_use]
    pub fn tile_type(&self, x: i32, y: i32) -> GroundType {
        self.index(x, y)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(GroundType::None)
    }

    /// Convenience form of [`GroundGrid::tile_type`] taking a coordinate.
    #[must_use]
    pub fn tile_at(&self, cell: GridCoord) -> GroundType {
        self.tile_type(cell.x(), cell.y())
    }

    /// Every occupied cell in row-major order (rows outer, columns inner).
    #[must_use]
    pub fn points(&self) -> Vec<GridCoord> {
        self.occupied().map(|(cell, _)| cell).collect()
    }

    /// Iterates over occupied cells and their ground in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (GridCoord, GroundType)> + '_ {
        let width = self.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, ground)| ground.is_ground())
            .filter_map(move |(index, ground)| {
                let x = i32::try_from(index % width).ok()?;
                let y = i32::try_from(index / width).ok()?;
                Some((GridCoord::new(x, y), *ground))
            })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|ground| ground.is_ground()).count()
    }

    /// Writes `ground` into `(x, y)` and notifies observers of the transition.
    ///
    /// Out-of-range writes are ignored. Clearing an empty cell is silent;
    /// writing a ground over itself is announced as a change.
    pub(crate) fn set_cell(&mut self, x: i32, y: i32, ground: GroundType) -> Option<TileEvent> {
        let index = self.index(x, y)?;
        let slot = self.cells.get_mut(index)?;
        let previous = std::mem::replace(slot, ground);
        let event = TileEvent::classify(GridCoord::new(x, y), previous, ground)?;
        tracing::trace!(?event, "cell updated");
        self.observers.broadcast(&event);
        Some(event)
    }

    pub(crate) fn subscribe(&mut self, observer: Box<dyn TileObserver>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let column = u32::try_from(x).ok()?;
        let row = u32::try_from(y).ok()?;
        if column < self.width && row < self.height {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
