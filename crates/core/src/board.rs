//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is `0` (empty) or a piece color id (1-7).
//! Uses a flat array for cache locality and zero-allocation row moves.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Pieces may hang above the grid (negative y) while spawning; those cells are never
//! out of bounds and are never written.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, CellEvent, CellEventCause, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL};

/// Number of columns, as an index type
pub const COLS: usize = BOARD_WIDTH as usize;

/// Number of rows, as an index type
pub const ROWS: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = COLS * ROWS;

/// Original row indices removed by one [`Board::clear_lines`] call, bottom to top.
pub type ClearedRows = ArrayVec<usize, ROWS>;

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
            cells: [EMPTY_CELL; BOARD_SIZE],
        }
    }

    /// Build a board from a row-major grid.
    ///
    /// Values above 7 are not color ids and are stored as empty.
    pub fn from_rows(rows: [[Cell; COLS]; ROWS]) -> Self {
        let mut board = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                board.cells[y * COLS + x] = if cell <= 7 { cell } else { EMPTY_CELL };
            }
        }
        board
    }

    /// Copy the grid out as rows (render snapshots).
    pub fn to_rows(&self) -> [[Cell; COLS]; ROWS] {
        let mut out = [[EMPTY_CELL; COLS]; ROWS];
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
        out
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * COLS + (x as usize))
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
    /// Returns false if out of bounds or `cell` is not a valid cell value
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) if cell <= 7 => {
                self.cells[idx] = cell;
                true
            }
            _ => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY_CELL)
    }

    /// One row of cells, left to right. Panics if `y >= ROWS`.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * COLS..(y + 1) * COLS]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY_CELL)
    }

    /// Check whether a shape placed with its top-left corner at (x, y) collides.
    ///
    /// A nonzero cell collides when it is left of column 0, right of the last column,
    /// below the last row, or on an occupied board cell. Cells above row 0 only skip
    /// the occupancy check.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.minos().any(|(dx, dy, _)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Row where a shape at (x, y) would come to rest if dropped straight down.
    ///
    /// Works on a copy of the position: moves down until the placement collides, then
    /// steps back one row.
    pub fn drop_y(&self, shape: &Shape, x: i8, y: i8) -> i8 {
        let mut ghost_y = y;
        while !self.collides(shape, x, ghost_y) {
            ghost_y += 1;
        }
        ghost_y - 1
    }

    /// Write a settled shape into the grid.
    ///
    /// Callers must only lock a placement for which [`Board::collides`] is false.
    /// `on_cell` receives one [`CellEventCause::Lock`] event per written cell; cells above
    /// the grid are dropped without an event.
    pub fn lock(&mut self, shape: &Shape, x: i8, y: i8, mut on_cell: impl FnMut(CellEvent)) {
        for (dx, dy, color) in shape.minos() {
            let px = x + dx;
            let py = y + dy;
            if self.set(px, py, color) {
                on_cell(CellEvent {
                    x: px,
                    y: py,
                    color,
                    cause: CellEventCause::Lock,
                });
            }
        }
    }

    /// Remove every full row, compacting the rows above downward.
    ///
    /// Scans from the bottom row up. When a row is full its cells are reported to
    /// `on_cell` (before removal), every row above moves down one, an empty row appears
    /// at the top, and the same index is checked again. Returns the original indices of
    /// the removed rows, bottom to top.
    pub fn clear_lines(&mut self, mut on_cell: impl FnMut(CellEvent)) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut y = ROWS;

        while y > 0 {
            let row = y - 1;
            if !self.is_row_full(row) {
                y -= 1;
                continue;
            }

            for (x, &color) in self.row(row).iter().enumerate() {
                on_cell(CellEvent {
                    x: x as i8,
                    y: row as i8,
                    color,
                    cause: CellEventCause::LineClear,
                });
            }

            // Each earlier removal shifted this row down by one.
            cleared.push(row - cleared.len());
            self.remove_row(row);
        }

        cleared
    }

    /// Drop row `y` and shift every row above it down by one.
    fn remove_row(&mut self, y: usize) {
        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..y * COLS, COLS);
        self.cells[..COLS].fill(EMPTY_CELL);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn reset_to_empty(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY_CELL)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_remove_row_shifts_above_down() {
        let mut board = Board::new();
        board.set(0, 0, 1);
        board.set(1, 4, 2);
        board.set(2, 5, 3);

        board.remove_row(5);

        assert_eq!(board.get(0, 1), Some(1));
        assert_eq!(board.get(1, 5), Some(2));
        assert_eq!(board.get(2, 5), Some(EMPTY_CELL));
        assert!(board.row(0).iter().all(|&c| c == EMPTY_CELL));
    }

    #[test]
    fn test_lock_skips_cells_above_grid() {
        let mut board = Board::new();
        let mut events = Vec::new();
        // I piece's filled row is matrix row 1; at y = -1 that lands on row 0.
        board.lock(&get_shape(PieceKind::I), 3, -2, |e| events.push(e));
        assert!(board.is_empty());
        assert!(events.is_empty());

        board.lock(&get_shape(PieceKind::I), 3, -1, |e| events.push(e));
        assert_eq!(events.len(), 4);
        assert!(board.row(0)[3..7].iter().all(|&c| c == 2));
    }

    #[test]
    fn test_from_rows_round_trip_drops_invalid_values() {
        let mut rows = [[EMPTY_CELL; COLS]; ROWS];
        rows[5][3] = 3;
        rows[10][7] = 9;

        let board = Board::from_rows(rows);
        assert_eq!(board.get(3, 5), Some(3));
        assert_eq!(board.get(7, 10), Some(EMPTY_CELL));
        assert_eq!(board.to_rows()[5][3], 3);
    }
}
