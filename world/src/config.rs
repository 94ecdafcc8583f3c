//! Grid sizing configuration.

use serde::{Deserialize, Serialize};

/// Default number of columns and rows for a freshly configured grid.
pub const DEFAULT_GRID_SIZE: u32 = 256;

/// Largest number of cells a configuration may request.
pub const MAX_GRID_CELLS: u64 = 1 << 24;

/// Dimensions used to initialize a [`crate::GridEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
        }
    }
}

impl GridConfig {
    /// Creates a configuration with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells the configuration describes.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Rejects empty grids and grids above [`MAX_GRID_CELLS`].
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(GridConfigError::EmptyDimension {
                width: self.width,
                height: self.height,
            });
        }

        let cells = self.cell_count();
        if cells > MAX_GRID_CELLS {
            return Err(GridConfigError::TooLarge {
                cells,
                limit: MAX_GRID_CELLS,
            });
        }

        Ok(())
    }
}

/// Errors raised when validating a [`GridConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridConfigError {
    /// One of the dimensions is zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimension {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// The grid would exceed the allocation limit.
    #[error("grid of {cells} cells exceeds the limit of {limit}")]
    TooLarge {
        /// Requested number of cells.
        cells: u64,
        /// Maximum number of cells allowed.
        limit: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_dimensions() {
        let config = GridConfig::default();
        assert_eq!((config.width, config.height), (256, 256));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            GridConfig::new(0, 4).validate(),
            Err(GridConfigError::EmptyDimension {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let config = GridConfig::new(u32::MAX, 2);
        assert!(matches!(
            config.validate(),
            Err(GridConfigError::TooLarge { .. })
        ));
    }
}
