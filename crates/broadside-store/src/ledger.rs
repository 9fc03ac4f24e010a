//! The write sequences that keep the durable store consistent with
//! match outcomes.
//!
//! Three entry points, matching the three events a match produces:
//! [`bootstrap`] at creation, [`record_shot`] per accepted shot, and
//! [`complete`] at the in-progress → finished transition. All of them
//! are best-effort: a failed step is reported to the caller (the
//! recorder task, which logs it) and nothing is retried or rolled back,
//! because the in-memory match state has already moved on and is
//! authoritative for gameplay.

use broadside_types::{AccountId, GameKey, ShipPlacement};
use tracing::warn;

use crate::{
    CompletionOutcome, LogEntry, MatchRecord, MatchStore, PlayerRef, ShotEntry, StoreError,
    unix_millis,
};

/// What a completion attempt did, for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionReport {
    /// Both log entries were written. `win_counted` is false when the
    /// repeat-opponent guard (or a disconnection) suppressed the
    /// `gamesWon` increment.
    Scored { win_counted: bool },
    /// One of the log entries already had a result — this match was
    /// scored by an earlier completion, so nothing was written.
    AlreadyScored,
    /// An account could not be loaded; nothing was written.
    MissingAccount(AccountId),
    /// The account exists but has no log entry for this match.
    MissingLogEntry(AccountId),
}

/// Creates the durable match record and opens a log entry on both
/// accounts.
///
/// All-or-nothing at the resolution step: when either account is
/// missing, nothing at all is written (no partial creation). Returns
/// whether records were written.
pub async fn bootstrap<S: MatchStore>(
    store: &S,
    game_key: &GameKey,
    players: &[AccountId; 2],
    layouts: &[Vec<ShipPlacement>; 2],
    started_at: u64,
) -> Result<bool, StoreError> {
    let Some(mut first) = store.load_account(&players[0]).await? else {
        warn!(game_key = %game_key, account = %players[0], "account missing at bootstrap");
        return Ok(false);
    };
    let Some(mut second) = store.load_account(&players[1]).await? else {
        warn!(game_key = %game_key, account = %players[1], "account missing at bootstrap");
        return Ok(false);
    };

    let record = MatchRecord::new(
        game_key.clone(),
        PlayerRef { id: first.id.clone(), username: first.username.clone() },
        PlayerRef { id: second.id.clone(), username: second.username.clone() },
        layouts[0].clone(),
        layouts[1].clone(),
    );
    store.create_match(record).await?;

    first.logs.push(open_entry(game_key, &second.username, started_at));
    first.games_played += 1;
    second.logs.push(open_entry(game_key, &first.username, started_at));
    second.games_played += 1;

    store.save_account(&first).await?;
    store.save_account(&second).await?;
    Ok(true)
}

fn open_entry(game_key: &GameKey, opponent: &str, started_at: u64) -> LogEntry {
    LogEntry {
        gameid: game_key.clone(),
        played_with: opponent.to_string(),
        start_time: started_at,
        end_time: None,
        result: None,
        disconnection: false,
    }
}

/// Appends one shot to the durable match record, but only while the
/// record is still in progress — a late append racing a completed match
/// is dropped. Returns whether the append was written.
pub async fn record_shot<S: MatchStore>(
    store: &S,
    game_key: &GameKey,
    shot: ShotEntry,
) -> Result<bool, StoreError> {
    match store.load_match(game_key).await? {
        Some(record) if record.in_progress => {
            store.append_shot(game_key, shot).await?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Scores a finished match: writes both accounts' log entries, updates
/// the winner's counters, and flips the durable match record.
///
/// Two guards protect exactly-once accounting:
///
/// - **Idempotence**: if either account's log entry for this match
///   already has a result, the whole completion is a no-op. A winning
///   shot and a disconnection can both reach here for the same match;
///   whichever lands second changes nothing.
/// - **Repeat opponent**: a prior logged win against this same opponent
///   username suppresses the `gamesWon` increment for a fresh
///   (non-disconnection) win. Both logs still record the match.
pub async fn complete<S: MatchStore>(
    store: &S,
    game_key: &GameKey,
    outcome: &CompletionOutcome,
) -> Result<CompletionReport, StoreError> {
    let Some(mut winner) = store.load_account(&outcome.winner).await? else {
        return Ok(CompletionReport::MissingAccount(outcome.winner.clone()));
    };
    let Some(mut loser) = store.load_account(&outcome.loser).await? else {
        return Ok(CompletionReport::MissingAccount(outcome.loser.clone()));
    };

    // Both guards run before anything is touched.
    let Some(winner_entry) = winner.last_log_for(game_key).map(|e| e.clone()) else {
        return Ok(CompletionReport::MissingLogEntry(outcome.winner.clone()));
    };
    let Some(loser_entry) = loser.last_log_for(game_key).map(|e| e.clone()) else {
        return Ok(CompletionReport::MissingLogEntry(outcome.loser.clone()));
    };
    if winner_entry.result.is_some() || loser_entry.result.is_some() {
        return Ok(CompletionReport::AlreadyScored);
    }
    let repeat_win = winner.has_logged_win_against(&loser.username);
    let ended_at = unix_millis();

    if let Some(entry) = winner.last_log_for(game_key) {
        entry.result = Some(true);
        entry.end_time = Some(ended_at);
        entry.disconnection = outcome.disconnection;
    }
    if let Some(entry) = loser.last_log_for(game_key) {
        entry.result = Some(false);
        entry.end_time = Some(ended_at);
        entry.disconnection = outcome.disconnection;
    }

    let win_counted = !outcome.disconnection && !repeat_win;
    if win_counted {
        winner.games_won += 1;
        winner.last_win_date = Some(ended_at);
    }

    store.save_account(&winner).await?;
    store.save_account(&loser).await?;
    store.finish_match(game_key, &winner.username).await?;

    Ok(CompletionReport::Scored { win_counted })
}
