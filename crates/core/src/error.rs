//! Error types for the core crate.

use thiserror::Error;

/// Board access failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is outside the {height}x{width} board")]
    OutOfBounds {
        row: i32,
        col: i32,
        width: usize,
        height: usize,
    },
}

/// Rejected engine configurations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least {min}x{min}, got {width}x{height}")]
    BoardTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("spawn column {spawn_x} leaves a {needed}-wide piece outside a {width}-wide board")]
    SpawnOutOfBounds {
        spawn_x: i32,
        needed: usize,
        width: usize,
    },
    #[error("spawn row {spawn_y} must be inside the board")]
    SpawnRowOutOfBounds { spawn_y: i32 },
}
