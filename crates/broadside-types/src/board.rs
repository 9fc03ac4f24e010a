//! Board configuration and cell addressing.

use serde::{Deserialize, Serialize};

/// Fixed board dimensions for every match on a server.
///
/// Cells are addressed by a flat row-major index: `y * cols + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub cols: usize,
    pub rows: usize,
}

impl BoardConfig {
    /// Total number of cells on a board.
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Flat cell index for a position, or `None` when out of bounds.
    pub fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < self.cols && pos.y < self.rows {
            Some(pos.y * self.cols + pos.x)
        } else {
            None
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        // The classic 10x10 battleship board.
        Self { cols: 10, rows: 10 }
    }
}

/// A board position in (x, y) coordinates, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_row_major() {
        let board = BoardConfig::default();
        assert_eq!(board.index(Position::new(0, 0)), Some(0));
        assert_eq!(board.index(Position::new(3, 2)), Some(23));
        assert_eq!(board.index(Position::new(9, 9)), Some(99));
    }

    #[test]
    fn test_index_rejects_out_of_bounds() {
        let board = BoardConfig::default();
        assert_eq!(board.index(Position::new(10, 0)), None);
        assert_eq!(board.index(Position::new(0, 10)), None);
    }

    #[test]
    fn test_cell_count() {
        assert_eq!(BoardConfig::default().cell_count(), 100);
        assert_eq!(BoardConfig { cols: 4, rows: 3 }.cell_count(), 12);
    }
}
