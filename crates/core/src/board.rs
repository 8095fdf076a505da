//! Board module - manages the game grid
//!
//! The board is a 16x16 grid where each cell is either empty or occupied by a
//! colored block. Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..15 (left to right), y ranges 0..15 (top to bottom).
//! Row 0 is the spawn side; row 15 is the floor.

use arrayvec::ArrayVec;

use crate::types::{Cell, Rgb, BOARD_SIZE};

/// Total number of cells on the board
const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

const SIDE: usize = BOARD_SIZE as usize;

/// A copy of the whole board, indexed `[y][x]`
pub type BoardRows = [[Cell; SIDE]; SIDE];

/// The game board - 16 columns x 16 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * SIZE + x)
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_SIZE as i8 || y < 0 || y >= BOARD_SIZE as i8 {
            return None;
        }
        Some((y as usize) * SIDE + (x as usize))
    }

    /// Side length of the (square) board
    pub fn size(&self) -> u8 {
        BOARD_SIZE
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Paint cell (x, y) with `color`, marking it occupied.
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, color: Rgb) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = Cell::Occupied(color);
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Occupied(_)))
    }

    /// Collision rule for a single absolute cell.
    ///
    /// Left, right and bottom edges block. Cells above the top edge never
    /// block, so pieces may spawn or rotate partly off the board.
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_SIZE as i8 || y >= BOARD_SIZE as i8 {
            return true;
        }
        y >= 0 && self.is_occupied(x, y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= SIDE {
            return false;
        }
        let start = y * SIDE;
        self.cells[start..start + SIDE]
            .iter()
            .all(|cell| cell.is_occupied())
    }

    /// Check if any cell of a row is filled
    pub fn is_row_occupied(&self, y: usize) -> bool {
        if y >= SIDE {
            return false;
        }
        let start = y * SIDE;
        self.cells[start..start + SIDE]
            .iter()
            .any(|cell| cell.is_occupied())
    }

    /// Remove row `y` and insert an empty row at the top.
    ///
    /// Rows above `y` shift down by one; rows below are untouched.
    /// Returns false if `y` is out of bounds.
    pub fn clear_row(&mut self, y: usize) -> bool {
        if y >= SIDE {
            return false;
        }

        // copy_within handles the overlapping ranges
        if y > 0 {
            self.cells.copy_within(0..y * SIDE, SIDE);
        }
        self.cells[..SIDE].fill(Cell::Empty);

        true
    }

    /// Clear all full rows and return the row indices that were cleared.
    ///
    /// Rows are collected top to bottom in one scan, then cleared in that
    /// (ascending) order. Clearing row `r` only moves rows above `r`, so the
    /// indices collected later stay valid without a rescan.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, SIDE> {
        let mut full_rows = ArrayVec::new();
        for y in 0..SIDE {
            if self.is_row_full(y) {
                full_rows.push(y);
            }
        }

        for &y in &full_rows {
            self.clear_row(y);
        }

        full_rows
    }

    /// Paint the cells of `shape` placed at (x, y).
    ///
    /// Cells above the top edge have no storage and are skipped.
    /// Returns the number of cells written.
    pub fn lock_cells(&mut self, shape: &[(i8, i8)], x: i8, y: i8, color: Rgb) -> usize {
        let mut written = 0;
        for &(dx, dy) in shape {
            if self.set(x + dx, y + dy, color) {
                written += 1;
            }
        }
        written
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the board into `out`, indexed `[y][x]`
    pub fn write_rows(&self, out: &mut BoardRows) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * SIDE..(y + 1) * SIDE]);
        }
    }

    /// Copy of the board, indexed `[y][x]`
    pub fn rows(&self) -> BoardRows {
        let mut rows = [[Cell::Empty; SIDE]; SIDE];
        self.write_rows(&mut rows);
        rows
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
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

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn fill_row(board: &mut Board, y: i8, color: Rgb) {
        for x in 0..BOARD_SIZE as i8 {
            board.set(x, y, color);
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(15, 0), Some(15));
        assert_eq!(Board::index(0, 1), Some(16));
        assert_eq!(Board::index(15, 15), Some(255));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(16, 0), None);
        assert_eq!(Board::index(0, 16), None);
    }

    #[test]
    fn test_set_marks_occupied_with_color() {
        let mut board = Board::new();
        assert!(board.set(3, 4, RED));
        assert_eq!(board.get(3, 4), Some(Cell::Occupied(RED)));
        assert_eq!(board.cells[4 * 16 + 3], Cell::Occupied(RED));
        assert!(!board.set(-1, 4, RED));
        assert!(!board.set(3, 16, RED));
    }

    #[test]
    fn test_is_blocked_rules() {
        let mut board = Board::new();
        board.set(5, 5, RED);

        assert!(board.is_blocked(-1, 3));
        assert!(board.is_blocked(16, 3));
        assert!(board.is_blocked(3, 16));
        assert!(board.is_blocked(5, 5));
        assert!(!board.is_blocked(5, 4));

        // Above the top edge only the side walls apply.
        assert!(!board.is_blocked(5, -1));
        assert!(!board.is_blocked(0, -3));
        assert!(board.is_blocked(-1, -1));
    }

    #[test]
    fn test_clear_row_shifts_rows_above_only() {
        let mut board = Board::new();
        board.set(0, 2, RED);
        fill_row(&mut board, 5, BLUE);
        board.set(1, 9, BLUE);

        assert!(board.clear_row(5));

        assert_eq!(board.get(0, 3), Some(Cell::Occupied(RED)));
        assert_eq!(board.get(0, 2), Some(Cell::Empty));
        assert!(!board.is_row_occupied(0));
        assert!(!board.is_row_full(5));
        // Below the cleared row nothing moves.
        assert_eq!(board.get(1, 9), Some(Cell::Occupied(BLUE)));
        assert!(!board.clear_row(16));
    }

    #[test]
    fn test_clear_top_row() {
        let mut board = Board::new();
        fill_row(&mut board, 0, RED);
        board.set(4, 1, BLUE);

        board.clear_row(0);

        assert!(!board.is_row_occupied(0));
        assert_eq!(board.get(4, 1), Some(Cell::Occupied(BLUE)));
    }

    #[test]
    fn test_clear_full_rows_cascades() {
        let mut board = Board::new();
        board.set(2, 11, RED);
        fill_row(&mut board, 12, BLUE);
        board.set(3, 13, RED);
        fill_row(&mut board, 14, BLUE);
        fill_row(&mut board, 15, BLUE);

        let cleared = board.clear_full_rows();

        assert_eq!(cleared.as_slice(), &[12, 14, 15]);
        // Row 13 falls two rows (rows 14 and 15 below it were cleared)...
        assert_eq!(board.get(3, 15), Some(Cell::Occupied(RED)));
        // ...and row 11 falls three.
        assert_eq!(board.get(2, 14), Some(Cell::Occupied(RED)));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_clear_full_rows_without_full_rows_is_noop() {
        let mut board = Board::new();
        board.set(2, 11, RED);
        for x in 0..15 {
            board.set(x, 15, BLUE);
        }
        let before = board.clone();

        assert!(board.clear_full_rows().is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_lock_cells_skips_cells_above_top() {
        let mut board = Board::new();
        let shape = [(0, -1), (0, 0), (1, 0), (1, 1)];

        assert_eq!(board.lock_cells(&shape, 4, 0, RED), 3);
        assert!(board.is_occupied(4, 0));
        assert!(board.is_occupied(5, 0));
        assert!(board.is_occupied(5, 1));
        assert_eq!(board.occupied_count(), 3);
    }

    #[test]
    fn test_rows_copy_matches_cells() {
        let mut board = Board::new();
        board.set(7, 10, RED);
        let rows = board.rows();
        assert_eq!(rows[10][7], Cell::Occupied(RED));
        assert_eq!(rows[7][10], Cell::Empty);

        board.reset();
        assert_eq!(board.occupied_count(), 0);
    }
}
