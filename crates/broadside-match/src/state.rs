//! The per-match state machine.
//!
//! `BattleshipMatch` owns the only real invariants in the system: whose
//! turn it is, which cells have been fired upon, and the single
//! `InProgress → Finished` transition. Every method here is synchronous
//! and in-memory; persistence side effects are the actor's business.

use broadside_grid::{CellShot, PlayerGrid};
use broadside_types::{
    AccountId, BoardConfig, GameKey, MatchStatus, Position, ShipPlacement, ShotOutcome,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The result of an accepted shot: who fired, where, what it resolved
/// to, and whether it ended the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    pub shooter: usize,
    pub position: Position,
    pub outcome: ShotOutcome,
    pub finished: bool,
}

/// One physical board as a viewer is allowed to see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridView {
    pub shots: Vec<CellShot>,
    pub ships: Vec<ShipPlacement>,
}

/// A state update for one viewer about one grid. Pure projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateView {
    /// Is it the viewer's turn?
    pub your_turn: bool,
    /// Which client grid this update targets: 0 = own, 1 = opponent.
    pub grid_index: usize,
    pub grid: GridView,
}

/// One live (or just-finished) match between two participants.
///
/// Players are addressed by index 0/1 throughout; the resolved account
/// identities ride along for the completion side effects.
pub struct BattleshipMatch {
    game_key: GameKey,
    accounts: Option<[AccountId; 2]>,
    grids: [PlayerGrid; 2],
    current_player: usize,
    status: MatchStatus,
    winning_player: Option<usize>,
    board: BoardConfig,
}

impl BattleshipMatch {
    /// Builds a match from two resolved identities and their layouts.
    ///
    /// Layout geometry is the caller's responsibility; it is recorded
    /// as given. The opening player is chosen uniformly at random.
    pub fn new(
        game_key: GameKey,
        accounts: [AccountId; 2],
        layouts: [Vec<ShipPlacement>; 2],
        board: BoardConfig,
    ) -> Self {
        let [first, second] = layouts;
        Self {
            game_key,
            accounts: Some(accounts),
            grids: [PlayerGrid::new(board, first), PlayerGrid::new(board, second)],
            current_player: rand::rng().random_range(0..2),
            status: MatchStatus::InProgress,
            winning_player: None,
            board,
        }
    }

    /// The defensive creation path: a participant's identity could not
    /// be resolved, so the match is born finished with no winner and
    /// never accepts play or win/loss accounting.
    pub fn degraded(
        game_key: GameKey,
        layouts: [Vec<ShipPlacement>; 2],
        board: BoardConfig,
    ) -> Self {
        let [first, second] = layouts;
        Self {
            game_key,
            accounts: None,
            grids: [PlayerGrid::new(board, first), PlayerGrid::new(board, second)],
            current_player: 0,
            status: MatchStatus::Finished,
            winning_player: None,
            board,
        }
    }

    /// Resolves a shot by the current player at the opponent's grid.
    ///
    /// A miss passes the turn; a hit retains it. Reducing the opponent
    /// to zero ships finishes the match with the shooter as winner.
    /// Rejections mutate nothing.
    pub fn shoot(&mut self, position: Position) -> Result<ShotReport, super::MatchError> {
        use super::MatchError;

        if !self.status.is_in_progress() {
            return Err(MatchError::MatchFinished);
        }
        let index = self
            .board
            .index(position)
            .ok_or(MatchError::OutOfBounds { x: position.x, y: position.y })?;

        let shooter = self.current_player;
        let opponent = 1 - shooter;
        let outcome = self.grids[opponent]
            .shoot(index)
            .ok_or(MatchError::CellAlreadyShot { x: position.x, y: position.y })?;

        if !outcome.is_hit() {
            self.switch_player();
        }

        let finished = self.grids[opponent].ships_remaining() == 0;
        if finished {
            self.status = MatchStatus::Finished;
            self.winning_player = Some(shooter);
        }

        Ok(ShotReport { shooter, position, outcome, finished })
    }

    /// Forfeits the match for the requesting player; the opponent wins.
    ///
    /// Terminal and non-retractable. Performs no persistence itself —
    /// the caller that detected the disconnection carries the
    /// identities to completion.
    pub fn abort(&mut self, player: usize) -> Result<usize, super::MatchError> {
        if player > 1 {
            return Err(super::MatchError::UnknownParticipant(player));
        }
        if !self.status.is_in_progress() {
            return Err(super::MatchError::MatchFinished);
        }
        let winner = 1 - player;
        self.status = MatchStatus::Finished;
        self.winning_player = Some(winner);
        Ok(winner)
    }

    /// Flips the current player. No other side effects.
    pub fn switch_player(&mut self) {
        self.current_player = 1 - self.current_player;
    }

    /// Projects the state of `grid_owner`'s board for `player`.
    ///
    /// The full ship list is visible only to the grid's owner; an
    /// opponent sees sunk ships alone. The shot record is public.
    /// Rejects participant indexes other than 0 or 1.
    pub fn game_state(
        &self,
        player: usize,
        grid_owner: usize,
    ) -> Result<GameStateView, super::MatchError> {
        if player > 1 {
            return Err(super::MatchError::UnknownParticipant(player));
        }
        if grid_owner > 1 {
            return Err(super::MatchError::UnknownParticipant(grid_owner));
        }
        let grid = &self.grids[grid_owner];
        let ships = if player == grid_owner {
            grid.ships().to_vec()
        } else {
            grid.sunk_ships()
        };
        Ok(GameStateView {
            your_turn: self.current_player == player,
            grid_index: if player == grid_owner { 0 } else { 1 },
            grid: GridView { shots: grid.shots().to_vec(), ships },
        })
    }

    pub fn game_key(&self) -> &GameKey {
        &self.game_key
    }

    /// Resolved identities, `None` for a degraded match.
    pub fn accounts(&self) -> Option<&[AccountId; 2]> {
        self.accounts.as_ref()
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn winning_player(&self) -> Option<usize> {
        self.winning_player
    }

    pub fn grid(&self, player: usize) -> &PlayerGrid {
        &self.grids[player]
    }
}
