//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules: the shape catalog, the board,
//! the live piece, collision testing, the speed curve and the engine that
//! drives them. It has no dependencies on terminals, input devices or I/O,
//! making it:
//!
//! - **Deterministic**: randomness is an injected [`ShapeSource`]; same seed, same game
//! - **Testable**: scripted sources reproduce exact scenarios
//! - **Portable**: any host that can call `tick` once per frame can run it
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven tetromino topologies and matrix rotation
//! - [`board`]: fixed-size grid of locked cells with row clearing
//! - [`piece`]: a topology placed at a grid offset
//! - [`collision`]: the single legality predicate
//! - [`speed`]: score to gravity interval
//! - [`rng`]: shape sources (seeded LCG, scripted sequence)
//! - [`engine`]: spawn, gravity, commands, lock and clear, game over
//! - [`snapshot`]: read-only view for presentation
//!
//! # Game Rules
//!
//! - **Board**: 10 columns by 20 rows; pieces spawn at column 4, row 0
//! - **Rotation**: 90° clockwise, with one corrective nudge of one column
//!   toward the board centre when the plain rotation is blocked
//! - **Scoring**: one point per cleared line
//! - **Speed**: 1000ms per row, 100ms faster every 5 lines, never below 200ms
//! - **Next piece**: one piece of preview; a shape never appears three times in a row
//! - **Game over**: a spawn that collides resets board and score and play continues
//!
//! # Example
//!
//! ```
//! use blockfall_core::Engine;
//! use blockfall_types::Command;
//!
//! let mut game = Engine::new(12345);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::SoftDrop);
//!
//! // One frame at ~60 FPS
//! game.tick(16);
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.score, 0);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snapshot;
pub mod speed;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::collides;
pub use config::EngineConfig;
pub use engine::{Direction, DropOutcome, Engine, EngineEvent};
pub use error::{BoardError, ConfigError};
pub use piece::Piece;
pub use rng::{SequenceSource, ShapeSource, SimpleRng};
pub use shapes::{random_kind, rotate_cw, topology_for, Topology};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use speed::SpeedCurve;
