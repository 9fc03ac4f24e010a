//! Error types for the match core.

use broadside_types::{MatchId, SessionId};

/// Errors surfaced by match operations.
///
/// The rejection variants (`NotYourTurn`, `CellAlreadyShot`,
/// `OutOfBounds`, `MatchFinished`) describe illegal actions: nothing
/// was mutated and the caller can rebroadcast them as "invalid move".
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The acting player is not the current player.
    #[error("not player {0}'s turn")]
    NotYourTurn(usize),

    /// A participant index outside the two seats of a match.
    #[error("no participant with index {0}")]
    UnknownParticipant(usize),

    /// The targeted cell has already been fired upon.
    #[error("cell ({x}, {y}) already shot")]
    CellAlreadyShot { x: usize, y: usize },

    /// The target lies outside the board.
    #[error("cell ({x}, {y}) is off the board")]
    OutOfBounds { x: usize, y: usize },

    /// The match no longer accepts play.
    #[error("match is already finished")]
    MatchFinished,

    /// No live match with this id.
    #[error("match {0} not found")]
    NotFound(MatchId),

    /// The match actor's command channel is closed or full.
    #[error("match {0} is unavailable")]
    Unavailable(MatchId),

    /// A session could not be mapped to an account identity.
    #[error("session {0} has no resolved account")]
    UnresolvedSession(SessionId),
}
