//! Piece module - the live, mutable placement of one topology on the grid

use arrayvec::ArrayVec;

use crate::shapes::{rotate_cw, topology_for, Topology, MAX_SIDE};
use crate::types::ShapeKind;

/// Active falling piece
///
/// `x` is the board column of the topology's left edge and `y` the board row
/// of its top edge. Both may be negative or past the board while a move is
/// being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub topology: Topology,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a piece of `kind` in spawn orientation at (x, y)
    pub fn spawn(kind: ShapeKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            topology: topology_for(kind),
            x,
            y,
        }
    }

    /// Board coordinates `(row, col)` of every filled cell
    pub fn cells(&self) -> ArrayVec<(i32, i32), { MAX_SIDE * MAX_SIDE }> {
        self.topology
            .filled()
            .map(|(r, c, _)| (self.y + r as i32, self.x + c as i32))
            .collect()
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece with its topology rotated 90° clockwise in place
    pub fn rotated(&self) -> Self {
        Self {
            topology: rotate_cw(&self.topology),
            ..*self
        }
    }

    /// Column of the topology's horizontal centre, in half-columns
    ///
    /// Doubled to stay integral: a piece spanning columns 4..=5 returns 9.
    pub fn center_col_x2(&self) -> i32 {
        2 * self.x + self.topology.cols() as i32 - 1
    }
}
