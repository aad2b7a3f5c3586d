//! Board module - manages the game grid
//!
//! The board is a `height x width` grid (canonically 20x10) where each cell is
//! either empty (0) or holds the identifier of the shape that locked there.
//! Storage is a flat row-major vector sized once at creation; the dimensions
//! never change afterwards, only the cell contents do.
//!
//! Coordinates are `(row, col)` with row 0 at the top.

use crate::error::BoardError;
use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY_CELL; width * height],
        }
    }

    /// Create an empty 10x20 board
    pub fn standard() -> Self {
        Self::new(BOARD_WIDTH as usize, BOARD_HEIGHT as usize)
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    fn out_of_bounds(&self, row: i32, col: i32) -> BoardError {
        BoardError::OutOfBounds {
            row,
            col,
            width: self.width,
            height: self.height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at (row, col).
    ///
    /// Callers doing legality checks must treat `Err` as occupied.
    pub fn cell_at(&self, row: i32, col: i32) -> Result<Cell, BoardError> {
        self.index(row, col)
            .map(|idx| self.cells[idx])
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Set the cell at (row, col)
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> Result<(), BoardError> {
        let idx = self
            .index(row, col)
            .ok_or_else(|| self.out_of_bounds(row, col))?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// In bounds and empty
    pub fn is_empty_at(&self, row: i32, col: i32) -> bool {
        matches!(self.cell_at(row, col), Ok(EMPTY_CELL))
    }

    /// Row `row` as a slice; panics if `row >= height`
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width.max(1)).take(self.height)
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        self.row(row).iter().all(|&cell| cell != EMPTY_CELL)
    }

    /// Number of nonzero cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }

    /// Write a piece's identifier into every cell it covers.
    ///
    /// The piece must not collide with this board. That is a caller bug, so
    /// it is asserted in debug builds; release builds skip out-of-bounds cells.
    pub fn merge(&mut self, piece: &Piece) {
        debug_assert!(
            !crate::collision::collides(self, piece),
            "merge of a colliding piece: {:?}",
            piece
        );
        let id = piece.kind.id();
        for (row, col) in piece.cells() {
            if let Some(idx) = self.index(row, col) {
                self.cells[idx] = id;
            }
        }
    }

    /// Remove every full row and pad with empty rows at the top.
    ///
    /// Equivalent to a stable filter-and-pad: rows that stay keep their
    /// relative order, and each drops by the number of cleared rows below it.
    /// Returns the number of rows cleared.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = self.width;
        let mut write_row = self.height;
        let mut cleared = 0;

        // Scan from bottom to top
        for read_row in (0..self.height).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_row * width].fill(EMPTY_CELL);

        cleared
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Flat row-major view of all cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a board from rows of equal length.
    ///
    /// Returns `None` when rows are ragged.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.concat(),
        })
    }

    /// Convert to rows for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
