//! Engine configuration - board size, spawn offset and speed curve

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::shapes::{topology_for, MAX_SIDE};
use crate::speed::SpeedCurve;
use crate::types::{ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

/// Game rules an engine instance is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub speed: SpeedCurve,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH as usize,
            height: BOARD_HEIGHT as usize,
            spawn_x: SPAWN_X,
            spawn_y: SPAWN_Y,
            speed: SpeedCurve::default(),
        }
    }
}

impl EngineConfig {
    /// Check that every family fits on an empty board at the spawn offset
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MAX_SIDE || self.height < MAX_SIDE {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min: MAX_SIDE,
            });
        }

        let widest = ShapeKind::ALL
            .iter()
            .map(|&k| topology_for(k).cols())
            .max()
            .unwrap_or(MAX_SIDE);
        if self.spawn_x < 0 || self.spawn_x as usize + widest > self.width {
            return Err(ConfigError::SpawnOutOfBounds {
                spawn_x: self.spawn_x,
                needed: widest,
                width: self.width,
            });
        }

        let tallest = ShapeKind::ALL
            .iter()
            .map(|&k| topology_for(k).rows())
            .max()
            .unwrap_or(MAX_SIDE);
        if self.spawn_y < 0 || self.spawn_y as usize + tallest > self.height {
            return Err(ConfigError::SpawnRowOutOfBounds {
                spawn_y: self.spawn_y,
            });
        }

        Ok(())
    }
}
