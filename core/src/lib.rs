#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snake::*;
pub use types::*;
pub use viewport::*;

mod engine;
mod error;
mod generator;
mod snake;
mod types;
mod viewport;

/// Rules and timing for a round. Missing fields fall back to the classic setup.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tick_period_ms: u32,
    pub surface: SurfaceConfig,
    pub start: Cell,
    pub start_direction: Direction,
    pub turn_policy: TurnPolicy,
    pub spawn_policy: SpawnPolicy,
}

impl GameConfig {
    pub const DEFAULT_TICK_PERIOD_MS: u32 = 120;

    /// Tick period clamped to something a browser timer can honour.
    pub fn tick_period_ms(&self) -> u32 {
        self.tick_period_ms.clamp(10, 10_000)
    }

    pub fn grid_for_viewport(
        &self,
        viewport_width: u32,
        viewport_height: u32,
    ) -> (SurfaceSize, GridSize) {
        let surface = fit_surface(viewport_width, viewport_height, &self.surface);
        (surface, surface.grid(self.surface.tile_size))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: Self::DEFAULT_TICK_PERIOD_MS,
            surface: SurfaceConfig::default(),
            start: Cell::new(5, 5),
            start_direction: Direction::Right,
            turn_policy: TurnPolicy::default(),
            spawn_policy: SpawnPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let json = r#"{"tick_period_ms": 80, "turn_policy": "OrthogonalOnly"}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.tick_period_ms(), 80);
        assert_eq!(config.turn_policy, TurnPolicy::OrthogonalOnly);
        assert_eq!(config.start, Cell::new(5, 5));
        assert_eq!(config.spawn_policy, SpawnPolicy::AvoidSnake);
        assert_eq!(config.surface.tile_size, 20);
    }

    #[test]
    fn tick_period_is_clamped() {
        let config = GameConfig {
            tick_period_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.tick_period_ms(), 10);
        assert_eq!(GameConfig::default().tick_period_ms(), 120);
    }

    #[test]
    fn viewport_maps_to_grid() {
        let (surface, grid) = GameConfig::default().grid_for_viewport(1920, 1080);

        assert_eq!(surface, SurfaceSize { width: 1800, height: 1020 });
        assert_eq!(grid, GridSize::new(90, 51));
        assert!(grid.contains(GameConfig::default().start));
    }
}
