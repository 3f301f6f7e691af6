//! Pieces module - tetromino shape matrices and rotation
//!
//! Each piece carries its own matrix; rotating replaces the matrix with its
//! clockwise turn (transpose, then reverse each row). There is no kick table:
//! a rotation that collides is simply rolled back by the caller.

use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// Largest side of any shape matrix
pub const MAX_SHAPE_SIDE: usize = 4;

/// Boolean occupancy matrix of a piece, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl ShapeMatrix {
    /// Build a matrix from rows of `#` (filled) and `.` (empty).
    ///
    /// Only used for the fixed spawn shapes, so malformed input is a bug.
    const fn from_rows(rows: &[&str]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        let mut y = 0;
        while y < rows.len() {
            let row = rows[y].as_bytes();
            let mut x = 0;
            while x < row.len() {
                cells[y][x] = row[x] == b'#';
                x += 1;
            }
            y += 1;
        }
        Self {
            rows: rows.len() as u8,
            cols: rows[0].as_bytes().len() as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the matrix cell at column `x`, row `y` is filled
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.cols && y < self.rows && self.cells[y as usize][x as usize]
    }

    /// Filled offsets as (dx, dy), row by row
    pub fn offsets(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows).flat_map(move |y| {
            (0..self.cols)
                .filter(move |&x| self.cells[y as usize][x as usize])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Clockwise quarter turn: column `i` read bottom-to-top becomes row `i`.
    pub fn rotated_cw(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (i, row) in cells.iter_mut().enumerate().take(self.cols as usize) {
            for (j, cell) in row.iter_mut().enumerate().take(self.rows as usize) {
                *cell = self.cells[self.rows as usize - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

const I_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(&["####"]);
const O_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(&["##", "##"]);
const T_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(&[".#.", "###"]);
const S_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(&[".##", "##."]);
const Z_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(&["##.", ".##"]);
const J_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(&["#..", "###"]);
const L_SHAPE: ShapeMatrix = ShapeMatrix::from_rows(&["..#", "###"]);

/// Spawn orientation matrix for a piece kind
pub fn spawn_shape(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// A piece on (or about to enter) the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new piece at the spawn position in spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: spawn_shape(kind),
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Absolute board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .offsets()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
