//! Ship placement geometry.

use serde::{Deserialize, Serialize};

use crate::BoardConfig;

/// One ship placement: origin cell, length, and orientation.
///
/// Fixed when the grid is created and immutable afterwards. The same
/// shape is stored verbatim in the durable match record for replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipPlacement {
    pub x: usize,
    pub y: usize,
    pub size: usize,
    pub horizontal: bool,
}

impl ShipPlacement {
    /// Flat cell indices covered by this ship, in placement order.
    pub fn cells(&self, board: BoardConfig) -> impl Iterator<Item = usize> + '_ {
        let (x, y, cols) = (self.x, self.y, board.cols);
        let horizontal = self.horizontal;
        (0..self.size).map(move |i| {
            if horizontal {
                y * cols + x + i
            } else {
                (y + i) * cols + x
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_cells_are_contiguous() {
        let ship = ShipPlacement { x: 2, y: 1, size: 3, horizontal: true };
        let cells: Vec<usize> = ship.cells(BoardConfig::default()).collect();
        assert_eq!(cells, vec![12, 13, 14]);
    }

    #[test]
    fn test_vertical_cells_step_by_row() {
        let ship = ShipPlacement { x: 4, y: 0, size: 3, horizontal: false };
        let cells: Vec<usize> = ship.cells(BoardConfig::default()).collect();
        assert_eq!(cells, vec![4, 14, 24]);
    }

    #[test]
    fn test_placement_json_shape() {
        // The durable record stores placements as {x, y, size, horizontal}.
        let ship = ShipPlacement { x: 1, y: 2, size: 4, horizontal: true };
        let json: serde_json::Value = serde_json::to_value(&ship).unwrap();
        assert_eq!(json["x"], 1);
        assert_eq!(json["y"], 2);
        assert_eq!(json["size"], 4);
        assert_eq!(json["horizontal"], true);
    }
}
