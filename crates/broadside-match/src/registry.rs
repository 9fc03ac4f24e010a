//! The match registry: creates match actors and tracks their handles.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use broadside_store::{MatchStore, spawn_recorder, unix_millis};
use broadside_types::{BoardConfig, GameKey, MatchId, SessionId, ShipPlacement};

use crate::actor::{MatchHandle, spawn_match};
use crate::state::BattleshipMatch;
use crate::{IdentityResolver, MatchError};

static NEXT_MATCH_ID: AtomicU64 = AtomicU64::new(1);

const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Owns the live matches. One per server process.
///
/// Creation resolves both participants' identities up front; everything
/// durable after that happens on each match's recorder queue.
pub struct MatchRegistry<S, R> {
    matches: HashMap<MatchId, MatchHandle>,
    store: Arc<S>,
    resolver: R,
    board: BoardConfig,
}

impl<S, R> MatchRegistry<S, R>
where
    S: MatchStore,
    R: IdentityResolver,
{
    pub fn new(store: Arc<S>, resolver: R, board: BoardConfig) -> Self {
        Self { matches: HashMap::new(), store, resolver, board }
    }

    /// Creates a match between two sessions and spawns its actor.
    ///
    /// If either session fails to resolve, the match is still created,
    /// but degraded: born finished, no winner, no durable footprint.
    /// Clients get a consistent "match over" answer instead of an error
    /// mid-handshake.
    pub async fn create_match(
        &mut self,
        session_a: SessionId,
        session_b: SessionId,
        layout_a: Vec<ShipPlacement>,
        layout_b: Vec<ShipPlacement>,
    ) -> MatchId {
        let match_id = MatchId(NEXT_MATCH_ID.fetch_add(1, Ordering::Relaxed));
        let game_key = GameKey::generate();

        let resolved = match (
            self.resolver.resolve(session_a).await,
            self.resolver.resolve(session_b).await,
        ) {
            (Ok(a), Ok(b)) => Some([a, b]),
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!(
                    match_id = %match_id,
                    game_key = %game_key,
                    error = %err,
                    "identity resolution failed, creating degraded match"
                );
                None
            }
        };

        let handle = match resolved {
            Some(accounts) => {
                let recorder = spawn_recorder(Arc::clone(&self.store), game_key.clone());
                recorder.bootstrap(
                    accounts.clone(),
                    [layout_a.clone(), layout_b.clone()],
                    unix_millis(),
                );
                let state = BattleshipMatch::new(
                    game_key,
                    accounts,
                    [layout_a, layout_b],
                    self.board,
                );
                spawn_match(match_id, state, Some(recorder), DEFAULT_CHANNEL_SIZE)
            }
            None => {
                let state =
                    BattleshipMatch::degraded(game_key, [layout_a, layout_b], self.board);
                spawn_match(match_id, state, None, DEFAULT_CHANNEL_SIZE)
            }
        };

        self.matches.insert(match_id, handle);
        tracing::info!(match_id = %match_id, "match created");
        match_id
    }

    /// Looks up a live match's handle.
    pub fn handle(&self, match_id: MatchId) -> Option<MatchHandle> {
        self.matches.get(&match_id).cloned()
    }

    /// Stops a match actor and forgets it.
    ///
    /// Dropping the last handle closes the recorder queue, which drains
    /// any writes still pending for this match.
    pub async fn remove_match(&mut self, match_id: MatchId) -> Result<(), MatchError> {
        let handle = self.matches.remove(&match_id).ok_or(MatchError::NotFound(match_id))?;
        handle.shutdown().await
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn match_ids(&self) -> Vec<MatchId> {
        self.matches.keys().copied().collect()
    }
}
