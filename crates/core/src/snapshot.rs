//! Read-only view of an engine, published once per call for presentation.

use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::shapes::{topology_for, Topology};
use crate::types::{Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub topology: Topology,
    pub x: i32,
    pub y: i32,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            topology: value.topology,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Board coordinates `(row, col, id)` of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.topology
            .filled()
            .map(|(r, c, v)| (self.y + r as i32, self.x + c as i32, v))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major locked cells
    pub board: Vec<Cell>,
    pub active: ActiveSnapshot,
    pub next: ShapeKind,
    pub next_topology: Topology,
    pub score: u32,
    pub drop_interval_ms: u32,
    /// Number of game-over resets so far
    pub games_played: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    /// Locked cell at (row, col); empty outside the board
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row >= self.height || col >= self.width {
            return EMPTY_CELL;
        }
        self.board
            .get(row * self.width + col)
            .copied()
            .unwrap_or(EMPTY_CELL)
    }

    /// True when no cell is locked
    pub fn board_is_empty(&self) -> bool {
        self.board.iter().all(|&c| c == EMPTY_CELL)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let width = BOARD_WIDTH as usize;
        let height = BOARD_HEIGHT as usize;
        Self {
            width,
            height,
            board: vec![EMPTY_CELL; width * height],
            active: Piece::spawn(ShapeKind::I, 0, 0).into(),
            next: ShapeKind::I,
            next_topology: topology_for(ShapeKind::I),
            score: 0,
            drop_interval_ms: 0,
            games_played: 0,
            pieces_locked: 0,
        }
    }
}
