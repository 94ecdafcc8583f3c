#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure preview system that tracks a pending tile placement and the visual
//! instances mirroring the ground grid.
//!
//! [`PlacementPreview`] answers "would this placement be legal" for the
//! hovered cell and turns confirmations into placement commands.
//! [`InstanceLedger`] subscribes to grid events and keeps one ordered
//! instance list per ground type, the bookkeeping a renderer needs to add and
//! remove instanced meshes.

pub mod ledger;

use groundwork_core::{Command, Direction, GridCoord, GridTile, PlacementError};
use groundwork_world::GridEngine;

pub use ledger::InstanceLedger;

/// Validity of the currently previewed placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewStatus {
    /// No tile is selected or no cell is hovered.
    Hidden,
    /// Confirming would place the tile.
    Valid,
    /// Confirming would be rejected for the provided reason.
    Blocked(PlacementError),
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewInput {
    /// Cell currently hovered by the cursor, if any.
    pub cursor_cell: Option<GridCoord>,
    /// Indicates whether the player asked to turn the tile clockwise.
    pub rotate_clockwise: bool,
    /// Indicates whether the player asked to turn the tile counter-clockwise.
    pub rotate_counter_clockwise: bool,
    /// Indicates whether the player confirmed the placement on this frame.
    pub confirm_action: bool,
    /// Indicates whether the player dismissed the preview on this frame.
    pub cancel_action: bool,
}

/// Pending placement: selected tile, orientation and hovered anchor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementPreview {
    tile: Option<GridTile>,
    direction: Direction,
    anchor: Option<GridCoord>,
}

impl PlacementPreview {
    /// Creates an empty preview.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the tile to preview and its orientation.
    pub fn select(&mut self, tile: GridTile, direction: Direction) {
        self.tile = Some(tile);
        self.direction = direction;
    }

    /// Turns the selected tile a quarter turn clockwise.
    pub fn rotate_clockwise(&mut self) {
        self.direction = self.direction.rotate_clockwise();
    }

    /// Turns the selected tile a quarter turn counter-clockwise.
    pub fn rotate_counter_clockwise(&mut self) {
        self.direction = self.direction.rotate_counter_clockwise();
    }

    /// Moves the preview anchor to `cell`.
    pub fn hover(&mut self, cell: GridCoord) {
        self.anchor = Some(cell);
    }

    /// Clears the selection and the hovered anchor.
    pub fn hide(&mut self) {
        self.tile = None;
        self.anchor = None;
    }

    /// Currently selected tile.
    #[must_use]
    pub fn tile(&self) -> Option<&GridTile> {
        self.tile.as_ref()
    }

    /// Current orientation.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Currently hovered anchor.
    #[must_use]
    pub const fn anchor(&self) -> Option<GridCoord> {
        self.anchor
    }

    /// Absolute cells the tile would cover, in stamping order. Empty while
    /// the preview is hidden.
    #[must_use]
    pub fn footprint(&self) -> Vec<GridCoord> {
        match (&self.tile, self.anchor) {
            (Some(tile), Some(anchor)) => tile.shape.cells_at(anchor, self.direction).collect(),
            _ => Vec::new(),
        }
    }

    /// Evaluates the pending placement against the engine.
    #[must_use]
    pub fn status(&self, engine: &GridEngine) -> PreviewStatus {
        let (Some(tile), Some(anchor)) = (&self.tile, self.anchor) else {
            return PreviewStatus::Hidden;
        };

        match engine.check_placement(anchor.x(), anchor.y(), tile, self.direction) {
            Ok(()) => PreviewStatus::Valid,
            Err(reason) => PreviewStatus::Blocked(reason),
        }
    }

    /// Commits the pending placement when the footprint is legal and free,
    /// then hides the preview.
    ///
    /// Returns false and keeps the preview when the placement is rejected.
    pub fn confirm(&mut self, engine: &mut GridEngine) -> bool {
        let (Some(tile), Some(anchor)) = (&self.tile, self.anchor) else {
            return false;
        };

        let (x, y) = (anchor.x(), anchor.y());
        if !engine.can_place_tile(x, y, tile, self.direction)
            || engine.has_tile(x, y, tile, self.direction)
        {
            return false;
        }

        let placed = engine.place_tile(x, y, tile, self.direction);
        if placed {
            self.hide();
        }
        placed
    }

    /// Consumes frame input and emits the placement command a confirmation
    /// produces.
    ///
    /// Rotation is applied before the confirmation is evaluated, so a single
    /// frame may turn and place the tile.
    pub fn handle(&mut self, input: PreviewInput, engine: &GridEngine, out: &mut Vec<Command>) {
        if input.cancel_action {
            self.hide();
            return;
        }

        if let Some(cell) = input.cursor_cell {
            self.hover(cell);
        }
        if input.rotate_clockwise {
            self.rotate_clockwise();
        }
        if input.rotate_counter_clockwise {
            self.rotate_counter_clockwise();
        }

        if !input.confirm_action {
            return;
        }

        match self.status(engine) {
            PreviewStatus::Valid => {
                if let (Some(tile), Some(anchor)) = (self.tile.take(), self.anchor.take()) {
                    out.push(Command::PlaceTile {
                        anchor,
                        tile,
                        direction: self.direction,
                    });
                }
            }
            PreviewStatus::Blocked(reason) => {
                tracing::debug!(%reason, "preview confirmation ignored");
            }
            PreviewStatus::Hidden => {}
        }
    }
}
