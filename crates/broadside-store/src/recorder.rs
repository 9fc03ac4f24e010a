//! Per-match recorder: a single task that applies durable writes for
//! one match, strictly in the order they were enqueued.
//!
//! The match actor decides a transition synchronously, then hands the
//! mirroring work to its recorder and moves on — no store round-trip is
//! ever awaited on the gameplay path. Because one task drains one
//! queue, shot appends for a match land in acceptance order without any
//! global lock; matches record in parallel with each other.

use std::sync::Arc;

use broadside_types::{AccountId, GameKey, ShipPlacement};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::{MatchStore, ShotEntry, ledger};
use crate::ledger::CompletionReport;

/// Identities and manner of a match completion.
///
/// Winner and loser are supplied explicitly rather than re-derived from
/// match state: on the disconnection path the session mapping the match
/// was built from may already be gone.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub disconnection: bool,
    pub winner: AccountId,
    pub loser: AccountId,
}

/// One unit of durable work for a match.
#[derive(Debug)]
pub(crate) enum RecordJob {
    /// Create the match record and open both accounts' log entries.
    Bootstrap {
        players: [AccountId; 2],
        layouts: [Vec<ShipPlacement>; 2],
        started_at: u64,
    },
    /// Append one accepted shot to the match record.
    Shot(ShotEntry),
    /// Score the finished match on both accounts and close the record.
    Complete(CompletionOutcome),
}

/// Handle for enqueueing durable work for one match.
///
/// Cheap to clone. Sends are fire-and-forget: once the recorder task
/// has exited (it drains the queue first), further sends are logged and
/// dropped.
#[derive(Clone)]
pub struct RecorderHandle {
    game_key: GameKey,
    sender: mpsc::UnboundedSender<RecordJob>,
}

impl RecorderHandle {
    pub fn game_key(&self) -> &GameKey {
        &self.game_key
    }

    pub fn bootstrap(
        &self,
        players: [AccountId; 2],
        layouts: [Vec<ShipPlacement>; 2],
        started_at: u64,
    ) {
        self.send(RecordJob::Bootstrap { players, layouts, started_at });
    }

    pub fn shot(&self, entry: ShotEntry) {
        self.send(RecordJob::Shot(entry));
    }

    pub fn complete(&self, outcome: CompletionOutcome) {
        self.send(RecordJob::Complete(outcome));
    }

    fn send(&self, job: RecordJob) {
        if self.sender.send(job).is_err() {
            warn!(game_key = %self.game_key, "recorder gone, dropping durable write");
        }
    }
}

/// Spawns the recorder task for one match and returns its handle.
///
/// The task runs until every handle is dropped, then finishes whatever
/// was already enqueued before exiting — accepted writes are attempted
/// even during teardown.
pub fn spawn_recorder<S: MatchStore>(store: Arc<S>, game_key: GameKey) -> RecorderHandle {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let key = game_key.clone();

    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            apply(store.as_ref(), &key, job).await;
        }
        debug!(game_key = %key, "recorder drained");
    });

    RecorderHandle { game_key, sender: tx }
}

async fn apply<S: MatchStore>(store: &S, game_key: &GameKey, job: RecordJob) {
    match job {
        RecordJob::Bootstrap { players, layouts, started_at } => {
            match ledger::bootstrap(store, game_key, &players, &layouts, started_at).await {
                Ok(true) => debug!(game_key = %game_key, "match record created"),
                Ok(false) => {}
                Err(err) => {
                    error!(game_key = %game_key, %err, "bootstrap write failed");
                }
            }
        }
        RecordJob::Shot(entry) => match ledger::record_shot(store, game_key, entry).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(game_key = %game_key, "shot append skipped, record not in progress");
            }
            Err(err) => error!(game_key = %game_key, %err, "shot append failed"),
        },
        RecordJob::Complete(outcome) => {
            match ledger::complete(store, game_key, &outcome).await {
                Ok(CompletionReport::Scored { win_counted }) => {
                    debug!(game_key = %game_key, win_counted, "match scored");
                }
                Ok(CompletionReport::AlreadyScored) => {
                    // Designed no-op: the other completion path won the race.
                    debug!(game_key = %game_key, "completion already applied");
                }
                Ok(CompletionReport::MissingAccount(id)) => {
                    warn!(game_key = %game_key, account = %id, "completion skipped, account missing");
                }
                Ok(CompletionReport::MissingLogEntry(id)) => {
                    warn!(game_key = %game_key, account = %id, "completion skipped, no log entry");
                }
                Err(err) => error!(game_key = %game_key, %err, "completion write failed"),
            }
        }
    }
}
