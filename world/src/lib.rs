#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative ground grid state for Groundwork.
//!
//! [`GridEngine`] owns the [`GroundGrid`] and is the only way to mutate it.
//! Every mutation is stamped cell by cell, and each stamped cell that changes
//! is announced synchronously to the registered [`TileObserver`]s before the
//! mutating call returns.

pub mod config;
pub mod grid;
pub mod observers;
pub mod placement;

use groundwork_core::{
    CellOffset, Command, Direction, GridCoord, GridTile, GroundType, PlacementError,
};

pub use config::{GridConfig, GridConfigError, DEFAULT_GRID_SIZE, MAX_GRID_CELLS};
pub use grid::GroundGrid;
pub use observers::{SubscriptionId, TileEventLog, TileObserver};

/// Façade over the ground grid exposing validated placement operations.
#[derive(Debug, Default)]
pub struct GridEngine {
    grid: GroundGrid,
}

impl GridEngine {
    /// Creates an engine whose grid has not been initialized yet.
    ///
    /// Every position is invalid and every guarded placement fails until
    /// [`GridEngine::initialize_grid`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with an empty grid of the provided dimensions.
    #[must_use]
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        let mut engine = Self::new();
        engine.initialize_grid(width, height);
        engine
    }

    /// Creates an engine from a validated configuration.
    pub fn from_config(config: &GridConfig) -> Result<Self, GridConfigError> {
        config.validate()?;
        Ok(Self::with_dimensions(config.width, config.height))
    }

    /// Resizes the grid and resets every cell to [`GroundType::None`].
    ///
    /// Clearing is silent; observers stay subscribed.
    pub fn initialize_grid(&mut self, width: u32, height: u32) {
        self.grid.reset(width, height);
        tracing::info!(
            width = self.grid.width(),
            height = self.grid.height(),
            "ground grid initialized"
        );
    }

    /// Read-only access to the underlying grid.
    #[must_use]
    pub fn grid(&self) -> &GroundGrid {
        &self.grid
    }

    /// Grid dimensions as `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.grid.width(), self.grid.height())
    }

    /// Anchor used for seed placements: `(width / 2, height / 2)`.
    #[must_use]
    pub fn center(&self) -> GridCoord {
        let x = i32::try_from(self.grid.width() / 2).unwrap_or(i32::MAX);
        let y = i32::try_from(self.grid.height() / 2).unwrap_or(i32::MAX);
        GridCoord::new(x, y)
    }

    /// Registers an observer for placed, removed and changed notifications.
    pub fn subscribe(&mut self, observer: Box<dyn TileObserver>) -> SubscriptionId {
        self.grid.subscribe(observer)
    }

    /// Removes a previously registered observer. Returns false when the
    /// handle is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.grid.unsubscribe(id)
    }

    /// Reports whether `(x, y)` lies inside the grid.
    #[must_use]
    pub fn valid_position(&self, x: i32, y: i32) -> bool {
        self.grid.valid_position(x, y)
    }

    /// Ground stored at `(x, y)`, or [`GroundType::None`] outside the grid.
    #[must_use]
    pub fn tile_type(&self, x: i32, y: i32) -> GroundType {
        self.grid.tile_type(x, y)
    }

    /// Every occupied cell in row-major order.
    #[must_use]
    pub fn points(&self) -> Vec<GridCoord> {
        self.grid.points()
    }

    /// See [`placement::has_tile`].
    #[must_use]
    pub fn has_tile(&self, x: i32, y: i32, tile: &GridTile, direction: Direction) -> bool {
        placement::has_tile(&self.grid, x, y, tile, direction)
    }

    /// See [`placement::can_place_tile`].
    #[must_use]
    pub fn can_place_tile(&self, x: i32, y: i32, tile: &GridTile, direction: Direction) -> bool {
        placement::can_place_tile(&self.grid, x, y, tile, direction)
    }

    /// See [`placement::check_placement`].
    pub fn check_placement(
        &self,
        x: i32,
        y: i32,
        tile: &GridTile,
        direction: Direction,
    ) -> Result<(), PlacementError> {
        placement::check_placement(&self.grid, x, y, tile, direction)
    }

    /// See [`placement::is_point_near_ground`].
    #[must_use]
    pub fn is_point_near_ground(&self, x: i32, y: i32) -> bool {
        placement::is_point_near_ground(&self.grid, x, y)
    }

    /// See [`placement::is_tile_near_ground`].
    #[must_use]
    pub fn is_tile_near_ground(&self, x: i32, y: i32, shape: &[CellOffset]) -> bool {
        placement::is_tile_near_ground(&self.grid, x, y, shape)
    }

    /// See [`placement::is_ground_valid`].
    #[must_use]
    pub fn is_ground_valid(
        &self,
        x: i32,
        y: i32,
        shape: &[CellOffset],
        required: GroundType,
    ) -> bool {
        placement::is_ground_valid(&self.grid, x, y, shape, required)
    }

    /// Stamps every tile at the grid center without adjacency or collision
    /// checks. Used once to bootstrap an empty world.
    ///
    /// Tiles are stamped in order, so later tiles overwrite earlier ones where
    /// they overlap. Footprint cells outside the grid are skipped.
    pub fn place_initial_tile(&mut self, tiles: &[GridTile], direction: Direction) {
        let center = self.center();
        for tile in tiles {
            let stamped = self.stamp(center, tile, tile.ground, direction);
            tracing::info!(
                anchor = %center,
                ground = %tile.ground,
                cells = stamped,
                "seed tile placed"
            );
        }
    }

    /// Places `tile` anchored at `(x, y)` when the spot is free, touches
    /// existing ground and lies fully inside the grid.
    ///
    /// Returns false and leaves the grid untouched otherwise.
    pub fn place_tile(&mut self, x: i32, y: i32, tile: &GridTile, direction: Direction) -> bool {
        let blocked = self.has_tile(x, y, tile, direction);
        if blocked || !self.footprint_in_bounds(x, y, tile, direction) {
            if let Err(reason) = self.check_placement(x, y, tile, direction) {
                tracing::debug!(x, y, ?direction, %reason, "tile placement rejected");
            }
            return false;
        }

        let _ = self.stamp(GridCoord::new(x, y), tile, tile.ground, direction);
        true
    }

    /// Clears the footprint of `tile` anchored at `(x, y)` when it is in
    /// bounds and touches ground.
    pub fn remove_tile(&mut self, x: i32, y: i32, tile: &GridTile, direction: Direction) -> bool {
        if !self.can_place_tile(x, y, tile, direction) {
            tracing::debug!(x, y, ?direction, "tile removal rejected");
            return false;
        }

        let _ = self.stamp(GridCoord::new(x, y), tile, GroundType::None, direction);
        true
    }

    /// Clears a single cell without validation.
    ///
    /// Returns false when `(x, y)` lies outside the grid. Clearing an already
    /// empty cell succeeds silently.
    pub fn remove_one_tile(&mut self, x: i32, y: i32) -> bool {
        self.write_one(x, y, GroundType::None)
    }

    /// Re-skins the footprint of `tile` anchored at `(x, y)` with the tile's
    /// ground when it is in bounds and touches ground.
    pub fn update_tile(&mut self, x: i32, y: i32, tile: &GridTile, direction: Direction) -> bool {
        if !self.can_place_tile(x, y, tile, direction) {
            tracing::debug!(x, y, ?direction, "tile update rejected");
            return false;
        }

        let _ = self.stamp(GridCoord::new(x, y), tile, tile.ground, direction);
        true
    }

    /// Writes a single cell without validation.
    ///
    /// Returns false when `(x, y)` lies outside the grid.
    pub fn update_one_tile(&mut self, x: i32, y: i32, ground: GroundType) -> bool {
        self.write_one(x, y, ground)
    }

    fn write_one(&mut self, x: i32, y: i32, ground: GroundType) -> bool {
        if !self.grid.valid_position(x, y) {
            return false;
        }
        let _ = self.grid.set_cell(x, y, ground);
        true
    }

    fn footprint_in_bounds(&self, x: i32, y: i32, tile: &GridTile, direction: Direction) -> bool {
        tile.shape
            .cells_at(GridCoord::new(x, y), direction)
            .all(|cell| self.grid.valid_position(cell.x(), cell.y()))
    }

    /// Writes `ground` into every footprint cell in shape order and returns
    /// the number of events raised.
    fn stamp(
        &mut self,
        anchor: GridCoord,
        tile: &GridTile,
        ground: GroundType,
        direction: Direction,
    ) -> usize {
        let mut events = 0;
        for cell in tile.shape.cells_at(anchor, direction) {
            if self.grid.set_cell(cell.x(), cell.y(), ground).is_some() {
                events += 1;
            }
        }
        events
    }
}

/// Applies the provided command to the engine.
///
/// Returns true when the command was carried out. Seeding and grid
/// initialization always succeed; guarded operations report their guard.
pub fn apply(engine: &mut GridEngine, command: Command) -> bool {
    match command {
        Command::InitializeGrid { width, height } => {
            engine.initialize_grid(width, height);
            true
        }
        Command::PlaceInitialTile { tiles, direction } => {
            engine.place_initial_tile(&tiles, direction);
            true
        }
        Command::PlaceTile {
            anchor,
            tile,
            direction,
        } => engine.place_tile(anchor.x(), anchor.y(), &tile, direction),
        Command::RemoveTile {
            anchor,
            tile,
            direction,
        } => engine.remove_tile(anchor.x(), anchor.y(), &tile, direction),
        Command::RemoveOneTile { cell } => engine.remove_one_tile(cell.x(), cell.y()),
        Command::UpdateTile {
            anchor,
            tile,
            direction,
        } => engine.update_tile(anchor.x(), anchor.y(), &tile, direction),
        Command::UpdateOneTile { cell, ground } => {
            engine.update_one_tile(cell.x(), cell.y(), ground)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use groundwork_core::{TileEvent, TileShape};

    use super::*;

    fn seeded(width: u32, height: u32) -> GridEngine {
        let mut engine = GridEngine::with_dimensions(width, height);
        engine.place_initial_tile(&[GridTile::single(GroundType::Grass)], Direction::North);
        engine
    }

    #[test]
    fn center_uses_integer_halves() {
        assert_eq!(
            GridEngine::with_dimensions(4, 4).center(),
            GridCoord::new(2, 2)
        );
        assert_eq!(
            GridEngine::with_dimensions(5, 3).center(),
            GridCoord::new(2, 1)
        );
    }

    #[test]
    fn uninitialized_engine_rejects_everything() {
        let mut engine = GridEngine::new();
        let tile = GridTile::single(GroundType::Rock);
        assert!(!engine.valid_position(0, 0));
        assert!(!engine.place_tile(0, 0, &tile, Direction::North));
        assert!(!engine.remove_one_tile(0, 0));
        assert!(!engine.update_one_tile(0, 0, GroundType::Rock));
        engine.place_initial_tile(&[tile], Direction::North);
        assert!(engine.points().is_empty());
    }

    #[test]
    fn from_config_validates_dimensions() {
        assert!(GridEngine::from_config(&GridConfig::new(0, 3)).is_err());
        let engine = GridEngine::from_config(&GridConfig::new(8, 6)).expect("valid config");
        assert_eq!(engine.dimensions(), (8, 6));
    }

    #[test]
    fn place_tile_rejects_partially_out_of_bounds_footprints() {
        let mut engine = GridEngine::with_dimensions(4, 4);
        let _ = engine.update_one_tile(3, 0, GroundType::Rock);
        let domino = GridTile::new(
            TileShape::new(vec![CellOffset::new(0, 0), CellOffset::new(1, 0)]),
            GroundType::Sand,
        );

        assert!(!engine.has_tile(3, 1, &domino, Direction::North));
        assert!(!engine.place_tile(3, 1, &domino, Direction::North));
        assert_eq!(engine.points(), vec![GridCoord::new(3, 0)]);
    }

    #[test]
    fn initialize_grid_clears_and_keeps_observers() {
        let log = TileEventLog::shared();
        let mut engine = seeded(4, 4);
        let _ = engine.subscribe(Box::new(Rc::clone(&log)));

        engine.initialize_grid(6, 2);
        assert!(engine.points().is_empty());
        assert_eq!(engine.dimensions(), (6, 2));

        let _ = engine.update_one_tile(5, 1, GroundType::Lake);
        assert_eq!(
            log.borrow().events(),
            &[TileEvent::Placed {
                cell: GridCoord::new(5, 1),
                ground: GroundType::Lake
            }]
        );
    }

    #[test]
    fn apply_dispatches_commands() {
        let mut engine = GridEngine::new();
        assert!(apply(
            &mut engine,
            Command::InitializeGrid {
                width: 4,
                height: 4
            }
        ));
        assert!(apply(
            &mut engine,
            Command::PlaceInitialTile {
                tiles: vec![GridTile::single(GroundType::Grass)],
                direction: Direction::North,
            }
        ));
        assert!(apply(
            &mut engine,
            Command::PlaceTile {
                anchor: GridCoord::new(2, 1),
                tile: GridTile::single(GroundType::Sand),
                direction: Direction::North,
            }
        ));
        assert!(!apply(
            &mut engine,
            Command::PlaceTile {
                anchor: GridCoord::new(0, 0),
                tile: GridTile::single(GroundType::Sand),
                direction: Direction::North,
            }
        ));
        assert!(apply(
            &mut engine,
            Command::UpdateOneTile {
                cell: GridCoord::new(2, 1),
                ground: GroundType::Rock,
            }
        ));
        assert!(!apply(
            &mut engine,
            Command::RemoveOneTile {
                cell: GridCoord::new(9, 9)
            }
        ));

        assert_eq!(engine.tile_type(2, 1), GroundType::Rock);
        assert_eq!(engine.tile_type(2, 2), GroundType::Grass);
    }
}
