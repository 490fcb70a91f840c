use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::snake::{starting_body, Cell};

/// Largest accepted grid side; placement and rendering walk every cell
pub const MAX_GRID_SIZE: i32 = 256;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square grid
    pub grid_size: i32,
    /// Starting body, head first
    pub initial_body: Vec<Cell>,
    /// Starting direction of travel
    pub initial_direction: Direction,
    /// Milliseconds between game ticks
    pub tick_interval_ms: u64,
    /// Frames drawn per second
    pub frame_rate: u32,
    /// Random samples tried before food placement scans for free cells
    pub food_sample_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 25,
            initial_body: vec![Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)],
            initial_direction: Direction::Right,
            tick_interval_ms: 200,
            frame_rate: 60,
            food_sample_attempts: 1000,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size. The default starting
    /// body is kept when it fits, otherwise a 3-cell snake is centred.
    pub fn new(grid_size: i32) -> Self {
        let mut config = Self {
            grid_size,
            ..Default::default()
        };

        if !config.initial_body.iter().all(|c| c.is_within(grid_size)) {
            let centre = Cell::new(grid_size / 2, grid_size / 2);
            config.initial_body = starting_body(centre, Direction::Right, 3);
        }

        config
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            bail!(
                "grid_size must be between 2 and {}, got {}",
                MAX_GRID_SIZE,
                self.grid_size
            );
        }
        if self.initial_body.len() < 2 {
            bail!("initial_body needs at least 2 cells");
        }
        let cell_count = (self.grid_size as usize).pow(2);
        if self.initial_body.len() >= cell_count {
            bail!("initial_body leaves no room for food");
        }
        if let Some(cell) = self.initial_body.iter().find(|c| !c.is_within(self.grid_size)) {
            bail!("initial_body cell ({}, {}) is outside the grid", cell.x, cell.y);
        }
        for pair in self.initial_body.windows(2) {
            if Direction::from_delta(pair[1].x - pair[0].x, pair[1].y - pair[0].y).is_none() {
                bail!("initial_body is not contiguous");
            }
        }
        for (i, cell) in self.initial_body.iter().enumerate() {
            if self.initial_body[i + 1..].contains(cell) {
                bail!("initial_body covers ({}, {}) twice", cell.x, cell.y);
            }
        }
        if self.initial_body[0].moved_in_direction(self.initial_direction) == self.initial_body[1] {
            bail!("initial_direction points back into the body");
        }
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be positive");
        }
        if self.frame_rate == 0 {
            bail!("frame_rate must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 25);
        assert_eq!(
            config.initial_body,
            vec![Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)]
        );
        assert_eq!(config.initial_direction, Direction::Right);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_grid_keeps_default_body() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.initial_body, GameConfig::default().initial_body);
    }

    #[test]
    fn test_small_grid_centres_body() {
        let config = GameConfig::new(6);
        assert_eq!(
            config.initial_body,
            vec![Cell::new(3, 3), Cell::new(2, 3), Cell::new(1, 3)]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_bodies() {
        let mut config = GameConfig::default();
        config.initial_body = vec![Cell::new(6, 9), Cell::new(4, 9)];
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.initial_direction = Direction::Left;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.initial_body = vec![Cell::new(0, 0), Cell::new(-1, 0)];
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let mut config = GameConfig::default();
        config.grid_size = 50_000;
        assert!(config.validate().is_err());

        config.grid_size = i32::MAX;
        assert!(config.validate().is_err());

        config.grid_size = MAX_GRID_SIZE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");

        let mut config = GameConfig::new(12);
        config.tick_interval_ms = 150;
        config.save(&path).unwrap();

        assert_eq!(GameConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "tick_interval_ms": 100 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.grid_size, 25);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "grid_size": 1 }"#).unwrap();

        assert!(GameConfig::load(&path).is_err());
        assert!(GameConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
