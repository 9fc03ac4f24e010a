//! One participant's board: fixed ship placements plus the record of
//! every shot taken against it.

use broadside_types::{BoardConfig, ShipPlacement, ShotOutcome};
use serde::{Deserialize, Serialize};

/// The state of one cell in the shot record.
///
/// A cell is `Untouched` until fired upon, then permanently `Miss` or
/// `Hit` — there is no way back. `Hit` remembers which ship it struck
/// so sinking can be derived without re-walking geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellShot {
    Untouched,
    Miss,
    Hit { ship: usize },
}

impl CellShot {
    pub fn is_shot(&self) -> bool {
        !matches!(self, Self::Untouched)
    }
}

/// A single player's grid, owned exclusively by its match.
#[derive(Debug, Clone)]
pub struct PlayerGrid {
    board: BoardConfig,
    ships: Vec<ShipPlacement>,
    shots: Vec<CellShot>,
}

impl PlayerGrid {
    /// Builds a grid from a caller-supplied layout.
    ///
    /// Bounds and overlap validity of the layout are the caller's
    /// responsibility; the grid records whatever it is given.
    pub fn new(board: BoardConfig, ships: Vec<ShipPlacement>) -> Self {
        Self {
            board,
            ships,
            shots: vec![CellShot::Untouched; board.cell_count()],
        }
    }

    /// Records a shot at a flat cell index.
    ///
    /// Returns `None` without any state change when the cell was
    /// already shot (or the index is off the board); otherwise marks
    /// the cell and reports whether it belonged to a ship.
    pub fn shoot(&mut self, index: usize) -> Option<ShotOutcome> {
        let cell = self.shots.get(index)?;
        if cell.is_shot() {
            return None;
        }
        let hit = self
            .ships
            .iter()
            .position(|ship| ship.cells(self.board).any(|c| c == index));
        match hit {
            Some(ship) => {
                self.shots[index] = CellShot::Hit { ship };
                Some(ShotOutcome::Hit)
            }
            None => {
                self.shots[index] = CellShot::Miss;
                Some(ShotOutcome::Miss)
            }
        }
    }

    /// Number of ships not yet fully sunk. Monotonically non-increasing.
    pub fn ships_remaining(&self) -> usize {
        (0..self.ships.len()).filter(|&i| !self.is_sunk(i)).count()
    }

    /// The subset of placements whose every cell has been shot.
    ///
    /// This is what an opponent is allowed to see — never unsunk ships.
    pub fn sunk_ships(&self) -> Vec<ShipPlacement> {
        self.ships
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_sunk(*i))
            .map(|(_, ship)| ship.clone())
            .collect()
    }

    /// The full ship list, for the grid's own viewer.
    pub fn ships(&self) -> &[ShipPlacement] {
        &self.ships
    }

    /// The raw flat shot record, for projection/broadcast.
    pub fn shots(&self) -> &[CellShot] {
        &self.shots
    }

    /// Number of cells recorded as shot.
    pub fn shot_count(&self) -> usize {
        self.shots.iter().filter(|c| c.is_shot()).count()
    }

    fn is_sunk(&self, ship: usize) -> bool {
        self.ships[ship]
            .cells(self.board)
            .all(|c| self.shots.get(c).is_some_and(CellShot::is_shot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use broadside_types::Position;

    fn board() -> BoardConfig {
        BoardConfig::default()
    }

    /// Two ships: a horizontal 2-cell at (0,0) and a vertical 3-cell at (5,5).
    fn grid() -> PlayerGrid {
        PlayerGrid::new(
            board(),
            vec![
                ShipPlacement { x: 0, y: 0, size: 2, horizontal: true },
                ShipPlacement { x: 5, y: 5, size: 3, horizontal: false },
            ],
        )
    }

    fn idx(x: usize, y: usize) -> usize {
        board().index(Position::new(x, y)).unwrap()
    }

    #[test]
    fn test_shoot_empty_cell_is_miss() {
        let mut g = grid();
        assert_eq!(g.shoot(idx(9, 9)), Some(ShotOutcome::Miss));
        assert_eq!(g.shot_count(), 1);
    }

    #[test]
    fn test_shoot_ship_cell_is_hit() {
        let mut g = grid();
        assert_eq!(g.shoot(idx(0, 0)), Some(ShotOutcome::Hit));
        assert_eq!(g.shot_count(), 1);
    }

    #[test]
    fn test_repeat_shot_rejected_without_state_change() {
        let mut g = grid();
        g.shoot(idx(0, 0)).unwrap();
        assert_eq!(g.shoot(idx(0, 0)), None);
        assert_eq!(g.shot_count(), 1, "rejected shot must not add a cell");
    }

    #[test]
    fn test_off_board_index_rejected() {
        let mut g = grid();
        assert_eq!(g.shoot(1000), None);
        assert_eq!(g.shot_count(), 0);
    }

    #[test]
    fn test_ships_remaining_decreases_only_on_full_sink() {
        let mut g = grid();
        assert_eq!(g.ships_remaining(), 2);

        g.shoot(idx(0, 0)).unwrap();
        assert_eq!(g.ships_remaining(), 2, "one hit is not a sink");

        g.shoot(idx(1, 0)).unwrap();
        assert_eq!(g.ships_remaining(), 1);
    }

    #[test]
    fn test_sunk_ships_reveals_only_sunk_placements() {
        let mut g = grid();
        g.shoot(idx(0, 0)).unwrap();
        g.shoot(idx(5, 5)).unwrap();
        assert!(g.sunk_ships().is_empty(), "partial hits reveal nothing");

        g.shoot(idx(1, 0)).unwrap();
        let sunk = g.sunk_ships();
        assert_eq!(sunk.len(), 1);
        assert_eq!(sunk[0], ShipPlacement { x: 0, y: 0, size: 2, horizontal: true });
    }

    #[test]
    fn test_sinking_every_ship_empties_remaining() {
        let mut g = grid();
        for ship in g.ships().to_vec() {
            for cell in ship.cells(board()).collect::<Vec<_>>() {
                g.shoot(cell);
            }
        }
        assert_eq!(g.ships_remaining(), 0);
        assert_eq!(g.sunk_ships().len(), 2);
    }

    #[test]
    fn test_hit_cell_remembers_which_ship() {
        let mut g = grid();
        g.shoot(idx(5, 6)).unwrap();
        assert_eq!(g.shots()[idx(5, 6)], CellShot::Hit { ship: 1 });
    }
}
