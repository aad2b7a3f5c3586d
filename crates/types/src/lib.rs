//! Shared types module - shape identifiers, commands and canonical constants
//!
//! This crate holds the pure data shared by the engine core and the terminal
//! front end. Nothing here performs I/O.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn offset**: column 4, row 0
//!
//! # Speed Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity interval with a score of 0 |
//! | `DROP_STEP_MS` | 100 | Interval decrease per speed step |
//! | `LINES_PER_SPEED_STEP` | 5 | Lines cleared per speed step |
//! | `DROP_INTERVAL_FLOOR_MS` | 200 | Fastest gravity interval |
//! | `TICK_MS` | 16 | Host frame period (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::O.id(), 4);
//! assert_eq!(ShapeKind::from_id(7), Some(ShapeKind::Z));
//! assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn column of a new piece's top-left topology cell
pub const SPAWN_X: i32 = 4;

/// Spawn row of a new piece's top-left topology cell
pub const SPAWN_Y: i32 = 0;

/// Gravity interval at score 0 (1000ms = one row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Interval decrease applied per speed step
pub const DROP_STEP_MS: u32 = 100;

/// Lines that must be cleared to advance one speed step
pub const LINES_PER_SPEED_STEP: u32 = 5;

/// Fastest gravity interval; the speed curve never goes below this
pub const DROP_INTERVAL_FLOOR_MS: u32 = 200;

/// Frame period used by the terminal host (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// A board cell: 0 is empty, 1..=7 is a locked shape identifier
pub type Cell = u8;

/// Value of an empty board cell
pub const EMPTY_CELL: Cell = 0;

/// The seven tetromino families
///
/// Discriminants are the catalog identifiers written into board cells:
/// - **I** (1): cyan, four in a row
/// - **J** (2): blue
/// - **L** (3): orange
/// - **O** (4): yellow, 2x2 square
/// - **S** (5): green
/// - **T** (6): purple
/// - **Z** (7): red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I = 1,
    J = 2,
    L = 3,
    O = 4,
    S = 5,
    T = 6,
    Z = 7,
}

impl ShapeKind {
    /// All families in identifier order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Catalog identifier (1..=7)
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a family by catalog identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_id(1), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_id(0), None);
    /// assert_eq!(ShapeKind::from_id(8), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(ShapeKind::I),
            2 => Some(ShapeKind::J),
            3 => Some(ShapeKind::L),
            4 => Some(ShapeKind::O),
            5 => Some(ShapeKind::S),
            6 => Some(ShapeKind::T),
            7 => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// The family after this one in identifier order, wrapping Z back to I
    pub fn following(self) -> Self {
        let next = self.id() % 7 + 1;
        Self::from_id(next).unwrap_or(ShapeKind::I)
    }

    /// Parse a family from its letter (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Lowercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::T => "t",
            ShapeKind::Z => "z",
        }
    }

    /// Uppercase letter for display
    pub fn letter(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::T => "T",
            ShapeKind::Z => "Z",
        }
    }
}

/// Commands accepted by the engine
///
/// This is the whole mutation surface an input collaborator sees. Each
/// command is immediate and non-blocking; a command that cannot be applied
/// leaves the engine unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Shift the live piece one column left
    MoveLeft,
    /// Shift the live piece one column right
    MoveRight,
    /// Advance the live piece one row, locking it if it cannot fall
    SoftDrop,
    /// Rotate the live piece 90° clockwise
    Rotate,
}

impl Command {
    /// Parse a command from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("SOFTDROP"), Some(Command::SoftDrop));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
        }
    }
}
