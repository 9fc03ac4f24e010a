//! The document shapes stored durably.
//!
//! Field names follow the external store's camelCase convention; the
//! tests at the bottom pin the JSON shapes so a refactor here can't
//! silently break records already on disk.

use broadside_types::{AccountId, GameKey, ShipPlacement, ShotOutcome};
use serde::{Deserialize, Serialize};

/// Identity half of a match record: who played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: AccountId,
    pub username: String,
}

/// One entry in a match record's append-only shot log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotEntry {
    /// Index (0/1) of the shooter.
    pub player: usize,
    #[serde(rename = "type")]
    pub kind: ShotOutcome,
    pub x: usize,
    pub y: usize,
}

/// Durable mirror of one match, keyed by its game key.
///
/// Append-only except for the single terminal update that flips
/// `inProgress` to false and stamps the winner's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub gameid: GameKey,
    pub in_progress: bool,
    /// Winner's display name, or the literal `"none"` while unresolved.
    pub winner: String,
    pub player1: PlayerRef,
    pub player2: PlayerRef,
    #[serde(rename = "player1ships")]
    pub player1_ships: Vec<ShipPlacement>,
    #[serde(rename = "player2ships")]
    pub player2_ships: Vec<ShipPlacement>,
    pub shots: Vec<ShotEntry>,
}

impl MatchRecord {
    /// A freshly bootstrapped record: in progress, no winner, no shots.
    pub fn new(
        gameid: GameKey,
        player1: PlayerRef,
        player2: PlayerRef,
        player1_ships: Vec<ShipPlacement>,
        player2_ships: Vec<ShipPlacement>,
    ) -> Self {
        Self {
            gameid,
            in_progress: true,
            winner: "none".into(),
            player1,
            player2,
            player1_ships,
            player2_ships,
            shots: Vec::new(),
        }
    }
}

/// Per-match entry in an account's log.
///
/// `result` stays `None` while the match is open; completion writes it
/// exactly once (`true` for the winner, `false` for the loser). That
/// "written at most once" rule is the idempotence guard completion
/// relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub gameid: GameKey,
    pub played_with: String,
    pub start_time: u64,
    pub end_time: Option<u64>,
    pub result: Option<bool>,
    pub disconnection: bool,
}

/// Durable account record: identity, cumulative counters, and the
/// per-match log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: AccountId,
    pub username: String,
    pub games_played: u64,
    pub games_won: u64,
    pub last_win_date: Option<u64>,
    pub logs: Vec<LogEntry>,
}

impl AccountRecord {
    pub fn new(id: AccountId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            games_played: 0,
            games_won: 0,
            last_win_date: None,
            logs: Vec::new(),
        }
    }

    /// The last-appended log entry for a match, if any.
    pub fn last_log_for(&mut self, gameid: &GameKey) -> Option<&mut LogEntry> {
        self.logs.iter_mut().rev().find(|e| &e.gameid == gameid)
    }

    /// Whether this account has a prior logged win against `opponent`.
    ///
    /// Open entries (`result` unset) never count, so the entry for the
    /// match currently being scored cannot trip its own guard.
    pub fn has_logged_win_against(&self, opponent: &str) -> bool {
        self.logs
            .iter()
            .any(|e| e.played_with == opponent && e.result == Some(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> GameKey {
        GameKey("abc123".into())
    }

    fn record() -> MatchRecord {
        MatchRecord::new(
            key(),
            PlayerRef { id: AccountId::new("a@x"), username: "ada".into() },
            PlayerRef { id: AccountId::new("b@x"), username: "bob".into() },
            vec![ShipPlacement { x: 0, y: 0, size: 2, horizontal: true }],
            vec![ShipPlacement { x: 3, y: 3, size: 3, horizontal: false }],
        )
    }

    #[test]
    fn test_match_record_json_shape() {
        let json: serde_json::Value = serde_json::to_value(record()).unwrap();
        assert_eq!(json["gameid"], "abc123");
        assert_eq!(json["inProgress"], true);
        assert_eq!(json["winner"], "none");
        assert_eq!(json["player1"]["username"], "ada");
        assert_eq!(json["player1ships"][0]["size"], 2);
        assert_eq!(json["player2ships"][0]["horizontal"], false);
        assert!(json["shots"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_shot_entry_json_shape() {
        let entry = ShotEntry { player: 1, kind: ShotOutcome::Hit, x: 4, y: 7 };
        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["player"], 1);
        assert_eq!(json["type"], "hit");
        assert_eq!(json["x"], 4);
        assert_eq!(json["y"], 7);
    }

    #[test]
    fn test_account_record_json_shape() {
        let mut account = AccountRecord::new(AccountId::new("a@x"), "ada");
        account.logs.push(LogEntry {
            gameid: key(),
            played_with: "bob".into(),
            start_time: 1000,
            end_time: None,
            result: None,
            disconnection: false,
        });
        let json: serde_json::Value = serde_json::to_value(&account).unwrap();
        assert_eq!(json["gamesPlayed"], 0);
        assert_eq!(json["gamesWon"], 0);
        assert!(json["lastWinDate"].is_null());
        assert_eq!(json["logs"][0]["playedWith"], "bob");
        assert_eq!(json["logs"][0]["startTime"], 1000);
        assert!(json["logs"][0]["result"].is_null());
    }

    #[test]
    fn test_last_log_for_picks_most_recent_entry() {
        let mut account = AccountRecord::new(AccountId::new("a@x"), "ada");
        for start in [1, 2] {
            account.logs.push(LogEntry {
                gameid: key(),
                played_with: "bob".into(),
                start_time: start,
                end_time: None,
                result: None,
                disconnection: false,
            });
        }
        assert_eq!(account.last_log_for(&key()).unwrap().start_time, 2);
        assert!(account.last_log_for(&GameKey("other".into())).is_none());
    }

    #[test]
    fn test_has_logged_win_against_ignores_open_entries() {
        let mut account = AccountRecord::new(AccountId::new("a@x"), "ada");
        account.logs.push(LogEntry {
            gameid: key(),
            played_with: "bob".into(),
            start_time: 1,
            end_time: None,
            result: None,
            disconnection: false,
        });
        assert!(!account.has_logged_win_against("bob"));

        account.logs[0].result = Some(true);
        assert!(account.has_logged_win_against("bob"));
        assert!(!account.has_logged_win_against("carol"));
    }
}
