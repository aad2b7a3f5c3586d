//! Collision module - the single legality predicate
//!
//! Every move, rotation, gravity step and spawn reduces to: apply a tentative
//! transform, test [`collides`], revert if it returns true.

use crate::board::Board;
use crate::piece::Piece;
use crate::types::EMPTY_CELL;

/// True iff some filled cell of `piece` lies outside `board` or on a nonzero cell.
///
/// Out-of-bounds lookups count as collisions.
pub fn collides(board: &Board, piece: &Piece) -> bool {
    piece
        .cells()
        .iter()
        .any(|&(row, col)| !matches!(board.cell_at(row, col), Ok(EMPTY_CELL)))
}
