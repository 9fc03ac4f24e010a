//! Match actor: an isolated tokio task that owns one live match.
//!
//! Commands arrive over an mpsc channel and are processed one at a
//! time, which gives the "at most one in-flight action per match"
//! guarantee for free. The state transition is decided synchronously
//! and replied to immediately; durable mirroring is enqueued on the
//! match's recorder and never awaited here.

use broadside_store::{CompletionOutcome, RecorderHandle, ShotEntry};
use broadside_types::{AccountId, GameKey, MatchId, MatchStatus, Position};
use tokio::sync::{mpsc, oneshot};

use crate::{BattleshipMatch, GameStateView, MatchError, ShotReport};

/// Commands sent to a match actor through its channel.
pub(crate) enum MatchCommand {
    /// A shot by the given participant index.
    Shoot {
        player: usize,
        position: Position,
        reply: oneshot::Sender<Result<ShotReport, MatchError>>,
    },

    /// Forfeit by the given participant. Winner/loser identities are
    /// supplied by the caller: at disconnect time the session mapping
    /// may no longer resolve.
    Abort {
        player: usize,
        winner: AccountId,
        loser: AccountId,
        reply: oneshot::Sender<Result<usize, MatchError>>,
    },

    /// Project one grid's state for one viewer.
    GetState {
        player: usize,
        grid_owner: usize,
        reply: oneshot::Sender<Result<GameStateView, MatchError>>,
    },

    /// Request a metadata snapshot.
    Info { reply: oneshot::Sender<MatchInfo> },

    /// Stop the actor. The recorder drains its remaining writes.
    Shutdown,
}

/// A snapshot of match metadata (not the grids themselves).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInfo {
    pub match_id: MatchId,
    pub game_key: GameKey,
    pub status: MatchStatus,
    pub current_player: usize,
    pub winning_player: Option<usize>,
}

/// Handle to a running match actor. Cheap to clone.
#[derive(Clone)]
pub struct MatchHandle {
    match_id: MatchId,
    sender: mpsc::Sender<MatchCommand>,
}

impl MatchHandle {
    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    /// Fires at a cell as the given participant.
    pub async fn shoot(
        &self,
        player: usize,
        position: Position,
    ) -> Result<ShotReport, MatchError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(MatchCommand::Shoot { player, position, reply: reply_tx })
            .await
            .map_err(|_| MatchError::Unavailable(self.match_id))?;
        reply_rx
            .await
            .map_err(|_| MatchError::Unavailable(self.match_id))?
    }

    /// Forfeits the match for `player`; the opponent wins. Returns the
    /// winner's index.
    pub async fn abort(
        &self,
        player: usize,
        winner: AccountId,
        loser: AccountId,
    ) -> Result<usize, MatchError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(MatchCommand::Abort { player, winner, loser, reply: reply_tx })
            .await
            .map_err(|_| MatchError::Unavailable(self.match_id))?;
        reply_rx
            .await
            .map_err(|_| MatchError::Unavailable(self.match_id))?
    }

    /// Requests a projection of `grid_owner`'s board for `player`.
    pub async fn game_state(
        &self,
        player: usize,
        grid_owner: usize,
    ) -> Result<GameStateView, MatchError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(MatchCommand::GetState { player, grid_owner, reply: reply_tx })
            .await
            .map_err(|_| MatchError::Unavailable(self.match_id))?;
        reply_rx
            .await
            .map_err(|_| MatchError::Unavailable(self.match_id))?
    }

    /// Requests the current match metadata.
    pub async fn info(&self) -> Result<MatchInfo, MatchError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(MatchCommand::Info { reply: reply_tx })
            .await
            .map_err(|_| MatchError::Unavailable(self.match_id))?;
        reply_rx
            .await
            .map_err(|_| MatchError::Unavailable(self.match_id))
    }

    /// Tells the match actor to stop.
    pub async fn shutdown(&self) -> Result<(), MatchError> {
        self.sender
            .send(MatchCommand::Shutdown)
            .await
            .map_err(|_| MatchError::Unavailable(self.match_id))
    }
}

/// The actor state. Runs inside one tokio task per match.
struct MatchActor {
    match_id: MatchId,
    state: BattleshipMatch,
    /// `None` for degraded matches: nothing to mirror.
    recorder: Option<RecorderHandle>,
    receiver: mpsc::Receiver<MatchCommand>,
}

impl MatchActor {
    async fn run(mut self) {
        tracing::info!(match_id = %self.match_id, game_key = %self.state.game_key(), "match actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                MatchCommand::Shoot { player, position, reply } => {
                    let result = self.handle_shoot(player, position);
                    let _ = reply.send(result);
                }
                MatchCommand::Abort { player, winner, loser, reply } => {
                    let result = self.handle_abort(player, winner, loser);
                    let _ = reply.send(result);
                }
                MatchCommand::GetState { player, grid_owner, reply } => {
                    let _ = reply.send(self.state.game_state(player, grid_owner));
                }
                MatchCommand::Info { reply } => {
                    let _ = reply.send(self.info());
                }
                MatchCommand::Shutdown => break,
            }
        }

        // Dropping `self.recorder` closes the queue; the recorder task
        // drains whatever was already enqueued before exiting.
        tracing::info!(match_id = %self.match_id, "match actor stopped");
    }

    fn handle_shoot(
        &mut self,
        player: usize,
        position: Position,
    ) -> Result<ShotReport, MatchError> {
        if self.state.status().is_in_progress() && player != self.state.current_player() {
            return Err(MatchError::NotYourTurn(player));
        }

        let report = self.state.shoot(position)?;
        tracing::debug!(
            match_id = %self.match_id,
            shooter = report.shooter,
            x = position.x,
            y = position.y,
            outcome = ?report.outcome,
            "shot accepted"
        );

        if let Some(recorder) = &self.recorder {
            recorder.shot(ShotEntry {
                player: report.shooter,
                kind: report.outcome,
                x: position.x,
                y: position.y,
            });

            if report.finished {
                if let Some(accounts) = self.state.accounts() {
                    let winner = accounts[report.shooter].clone();
                    let loser = accounts[1 - report.shooter].clone();
                    recorder.complete(CompletionOutcome {
                        disconnection: false,
                        winner,
                        loser,
                    });
                }
                tracing::info!(
                    match_id = %self.match_id,
                    winner = report.shooter,
                    "match finished by sinking"
                );
            }
        }

        Ok(report)
    }

    fn handle_abort(
        &mut self,
        player: usize,
        winner: AccountId,
        loser: AccountId,
    ) -> Result<usize, MatchError> {
        let winner_index = self.state.abort(player)?;
        tracing::info!(
            match_id = %self.match_id,
            forfeiting = player,
            winner = winner_index,
            "match finished by forfeit"
        );

        if let Some(recorder) = &self.recorder {
            recorder.complete(CompletionOutcome { disconnection: true, winner, loser });
        }

        Ok(winner_index)
    }

    fn info(&self) -> MatchInfo {
        MatchInfo {
            match_id: self.match_id,
            game_key: self.state.game_key().clone(),
            status: self.state.status(),
            current_player: self.state.current_player(),
            winning_player: self.state.winning_player(),
        }
    }
}

/// Spawns a match actor task and returns a handle to it.
pub(crate) fn spawn_match(
    match_id: MatchId,
    state: BattleshipMatch,
    recorder: Option<RecorderHandle>,
    channel_size: usize,
) -> MatchHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = MatchActor { match_id, state, recorder, receiver: rx };
    tokio::spawn(actor.run());

    MatchHandle { match_id, sender: tx }
}
