//! TOML session files: grid dimensions, an optional seed and a command script.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use groundwork_core::{Command, Direction, GridTile};
use groundwork_world::GridConfig;
use serde::Deserialize;

/// Parsed session ready to be replayed against a fresh engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Session {
    /// Grid dimensions.
    #[serde(default)]
    pub(crate) grid: GridConfig,
    /// Tiles stamped at the grid center before the script runs.
    #[serde(default)]
    pub(crate) seed: Option<Seed>,
    /// Commands applied in order after seeding.
    #[serde(default)]
    pub(crate) commands: Vec<Command>,
}

/// `[seed]` section of a session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Seed {
    /// Orientation applied to every seed tile.
    #[serde(default)]
    pub(crate) direction: Direction,
    /// Tiles stamped in order at the grid center.
    pub(crate) tiles: Vec<GridTile>,
}

impl Session {
    /// Reads and validates the session stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid session {}", path.display()))
    }

    /// Parses and validates a session from TOML text.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let session: Self = toml::from_str(contents).context("failed to parse session TOML")?;
        session.validate()?;
        Ok(session)
    }

    /// Replaces the configured dimensions where an override is given.
    pub(crate) fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> Result<()> {
        if let Some(width) = width {
            self.grid.width = width;
        }
        if let Some(height) = height {
            self.grid.height = height;
        }
        self.validate()
    }

    /// Expands the session into the command sequence that replays it.
    pub(crate) fn into_commands(self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(self.commands.len() + 2);
        commands.push(Command::InitializeGrid {
            width: self.grid.width,
            height: self.grid.height,
        });
        if let Some(seed) = self.seed {
            commands.push(Command::PlaceInitialTile {
                tiles: seed.tiles,
                direction: seed.direction,
            });
        }
        commands.extend(self.commands);
        commands
    }

    fn validate(&self) -> Result<()> {
        self.grid.validate().context("invalid [grid] section")?;
        if let Some(seed) = &self.seed {
            if seed.tiles.is_empty() {
                bail!("[seed] must list at least one tile");
            }
            if let Some(index) = seed.tiles.iter().position(|tile| tile.ground.is_none()) {
                bail!("[seed] tile {index} has no ground");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwork_core::{GridCoord, GroundType};

    #[test]
    fn bundled_island_session_parses() {
        let session = Session::parse(include_str!("../sessions/island.toml"))
            .expect("bundled session is valid");

        assert_eq!((session.grid.width, session.grid.height), (16, 12));
        let commands = session.into_commands();
        assert_eq!(commands.len(), 8);
        assert_eq!(
            commands[0],
            Command::InitializeGrid {
                width: 16,
                height: 12
            }
        );
        assert!(matches!(commands[1], Command::PlaceInitialTile { .. }));
        assert_eq!(
            commands[7],
            Command::RemoveOneTile {
                cell: GridCoord::new(10, 8)
            }
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let session = Session::parse("").expect("empty session is valid");
        assert_eq!(session.grid, GridConfig::default());
        assert_eq!(
            session.into_commands(),
            vec![Command::InitializeGrid {
                width: 256,
                height: 256
            }],
            "an empty session only initializes the grid"
        );
    }

    #[test]
    fn seed_requires_tiles() {
        let error = Session::parse("[seed]\ntiles = []\n").expect_err("empty seed is rejected");
        assert!(error.to_string().contains("at least one tile"));
    }

    #[test]
    fn seed_tiles_need_ground() {
        let error = Session::parse(
            r#"
                [seed]
                tiles = [{ shape = [[0, 0]], ground = "none" }]
            "#,
        )
        .expect_err("groundless seed is rejected");
        assert!(error.to_string().contains("no ground"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Session::parse("[grid]\ndepth = 3\n").is_err());
        assert!(Session::parse("colour = \"red\"\n").is_err());
    }

    #[test]
    fn overrides_replace_dimensions_and_revalidate() {
        let mut session = Session::parse("[grid]\nwidth = 8\nheight = 8\n").expect("valid");

        session.resize(Some(32), None).expect("32x8 is valid");
        assert_eq!((session.grid.width, session.grid.height), (32, 8));

        assert!(session.resize(None, Some(0)).is_err());
    }

    #[test]
    fn seed_direction_defaults_to_north() {
        let session = Session::parse(
            r#"
                [seed]
                tiles = [{ shape = [[0, 0]], ground = "rock" }]
            "#,
        )
        .expect("valid");

        assert_eq!(
            session.seed.map(|seed| (seed.direction, seed.tiles[0].ground)),
            Some((Direction::North, GroundType::Rock))
        );
    }
}
