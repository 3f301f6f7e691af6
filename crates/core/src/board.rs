//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) are open space: pieces may poke into them, but
//! nothing is ever stored there.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Maximum number of rows a single clear can report
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize;

/// A row removed by a line clear, as it looked right before removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedRow {
    /// Row index at the time the board was scanned
    pub y: u8,
    pub cells: [Cell; BOARD_WIDTH as usize],
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a piece cell at (x, y) would collide.
    ///
    /// Walls and the floor collide, as do frozen cells. Space above the top
    /// row only checks the column range.
    #[inline]
    pub fn collides(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        y >= 0 && self.is_occupied(x, y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Copy of one row
    pub fn row(&self, y: usize) -> [Cell; BOARD_WIDTH as usize] {
        let mut out = [None; BOARD_WIDTH as usize];
        if y < BOARD_HEIGHT as usize {
            let start = y * BOARD_WIDTH as usize;
            out.copy_from_slice(&self.cells[start..start + BOARD_WIDTH as usize]);
        }
        out
    }

    /// Clear all full rows, shifting the rows above down and refilling the top
    /// with empty rows.
    ///
    /// Rows are scanned bottom-up and reported in that order. Uses a two-pointer
    /// compaction with no allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<ClearedRow, MAX_CLEARED_ROWS> {
        let mut cleared = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared.push(ClearedRow {
                    y: read_y as u8,
                    cells: self.row(read_y),
                });
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_y * width].fill(None);

        cleared
    }

    /// Write piece cells onto the board.
    ///
    /// Cells above the top row are dropped. Returns the number of cells written.
    pub fn freeze_cells(&mut self, cells: impl IntoIterator<Item = (i8, i8)>, kind: PieceKind) -> usize {
        let mut written = 0;
        for (x, y) in cells {
            if y >= 0 && self.set(x, y, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Copy rows into a 2D grid (row-major, top row first)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            *row = self.row(y);
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
