//! Shapes module - the catalog of tetromino topologies
//!
//! Each family is a small rectangular matrix where 0 is an empty cell and a
//! nonzero value is a filled cell tagged with the family's identifier.
//! Topologies are plain `Copy` values, so every piece of a family shares the
//! same catalog entry by value.

use serde::{Deserialize, Serialize};

use crate::rng::ShapeSource;
use crate::types::{Cell, ShapeKind, EMPTY_CELL};

/// Largest side of any topology (the I piece is 1x4 / 4x1)
pub const MAX_SIDE: usize = 4;

/// Rectangular fill pattern of one piece family in one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topology {
    cells: [[Cell; MAX_SIDE]; MAX_SIDE],
    rows: u8,
    cols: u8,
}

impl Topology {
    /// Build a topology from row slices.
    ///
    /// Rows longer than `MAX_SIDE` or more than `MAX_SIDE` rows are truncated.
    pub fn from_rows(rows: &[&[Cell]]) -> Self {
        let mut cells = [[EMPTY_CELL; MAX_SIDE]; MAX_SIDE];
        let height = rows.len().min(MAX_SIDE);
        let mut width = 0;
        for (r, row) in rows.iter().take(height).enumerate() {
            let len = row.len().min(MAX_SIDE);
            width = width.max(len);
            cells[r][..len].copy_from_slice(&row[..len]);
        }
        Self {
            cells,
            rows: height as u8,
            cols: width as u8,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Cell value at (row, col); 0 outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.rows() || col >= self.cols() {
            return EMPTY_CELL;
        }
        self.cells[row][col]
    }

    /// Iterate the filled cells as `(row, col, id)`
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols()).filter_map(move |c| {
                let v = self.cells[r][c];
                (v != EMPTY_CELL).then_some((r, c, v))
            })
        })
    }

    /// Row `r` as a slice of `cols()` cells
    pub fn row(&self, r: usize) -> &[Cell] {
        &self.cells[r][..self.cols()]
    }
}

/// Get the spawn-orientation topology for a family
pub fn topology_for(kind: ShapeKind) -> Topology {
    match kind {
        ShapeKind::I => Topology::from_rows(&[&[1, 1, 1, 1]]),
        ShapeKind::J => Topology::from_rows(&[&[2, 0, 0], &[2, 2, 2]]),
        ShapeKind::L => Topology::from_rows(&[&[0, 0, 3], &[3, 3, 3]]),
        ShapeKind::O => Topology::from_rows(&[&[4, 4], &[4, 4]]),
        ShapeKind::S => Topology::from_rows(&[&[0, 5, 5], &[5, 5, 0]]),
        ShapeKind::T => Topology::from_rows(&[&[0, 6, 0], &[6, 6, 6]]),
        ShapeKind::Z => Topology::from_rows(&[&[7, 7, 0], &[0, 7, 7]]),
    }
}

/// Rotate a topology 90° clockwise.
///
/// An R x C matrix becomes C x R with `out[i][j] = in[R - 1 - j][i]`.
pub fn rotate_cw(topology: &Topology) -> Topology {
    let rows = topology.rows();
    let cols = topology.cols();
    let mut cells = [[EMPTY_CELL; MAX_SIDE]; MAX_SIDE];
    for (i, out_row) in cells.iter_mut().enumerate().take(cols) {
        for (j, out) in out_row.iter_mut().enumerate().take(rows) {
            *out = topology.cells[rows - 1 - j][i];
        }
    }
    Topology {
        cells,
        rows: topology.cols,
        cols: topology.rows,
    }
}

/// Draw a family uniformly from the catalog
pub fn random_kind(source: &mut impl ShapeSource) -> ShapeKind {
    source.next_kind()
}
