//! In-memory `MatchStore` for tests and development servers.

use std::collections::HashMap;

use broadside_types::{AccountId, GameKey};
use tokio::sync::Mutex;

use crate::{AccountRecord, MatchRecord, MatchStore, ShotEntry, StoreError};

/// A `HashMap`-backed store behind one async mutex.
///
/// Good enough for tests and single-process development: every
/// operation is a short critical section, and the per-match recorder
/// task already serializes writes for a given match.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<AccountId, AccountRecord>,
    matches: HashMap<GameKey, MatchRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account, replacing any existing record with the same id.
    pub async fn seed_account(&self, record: AccountRecord) {
        let mut inner = self.inner.lock().await;
        inner.accounts.insert(record.id.clone(), record);
    }
}

impl MatchStore for MemoryStore {
    async fn load_account(&self, id: &AccountId) -> Result<Option<AccountRecord>, StoreError> {
        Ok(self.inner.lock().await.accounts.get(id).cloned())
    }

    async fn save_account(&self, record: &AccountRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.accounts.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn create_match(&self, record: MatchRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.matches.insert(record.gameid.clone(), record);
        Ok(())
    }

    async fn load_match(&self, key: &GameKey) -> Result<Option<MatchRecord>, StoreError> {
        Ok(self.inner.lock().await.matches.get(key).cloned())
    }

    async fn append_shot(&self, key: &GameKey, shot: ShotEntry) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let record = inner
            .matches
            .get_mut(key)
            .ok_or_else(|| StoreError::Backend(format!("no match record {key}")))?;
        record.shots.push(shot);
        Ok(())
    }

    async fn finish_match(&self, key: &GameKey, winner_username: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let record = inner
            .matches
            .get_mut(key)
            .ok_or_else(|| StoreError::Backend(format!("no match record {key}")))?;
        record.in_progress = false;
        record.winner = winner_username.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use broadside_types::ShotOutcome;
    use crate::PlayerRef;

    fn record(key: &str) -> MatchRecord {
        MatchRecord::new(
            GameKey(key.into()),
            PlayerRef { id: AccountId::new("a@x"), username: "ada".into() },
            PlayerRef { id: AccountId::new("b@x"), username: "bob".into() },
            vec![],
            vec![],
        )
    }

    #[tokio::test]
    async fn test_account_round_trip() {
        let store = MemoryStore::new();
        let account = AccountRecord::new(AccountId::new("a@x"), "ada");

        store.save_account(&account).await.unwrap();

        let loaded = store.load_account(&account.id).await.unwrap();
        assert_eq!(loaded, Some(account));
    }

    #[tokio::test]
    async fn test_load_unknown_account_is_none() {
        let store = MemoryStore::new();
        let loaded = store.load_account(&AccountId::new("ghost")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_append_shot_preserves_order() {
        let store = MemoryStore::new();
        let key = GameKey("g1".into());
        store.create_match(record("g1")).await.unwrap();

        for x in 0..3 {
            store
                .append_shot(&key, ShotEntry { player: 0, kind: ShotOutcome::Miss, x, y: 0 })
                .await
                .unwrap();
        }

        let shots = store.load_match(&key).await.unwrap().unwrap().shots;
        let xs: Vec<usize> = shots.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_append_shot_unknown_match_fails() {
        let store = MemoryStore::new();
        let result = store
            .append_shot(
                &GameKey("ghost".into()),
                ShotEntry { player: 0, kind: ShotOutcome::Miss, x: 0, y: 0 },
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_finish_match_flips_progress_and_stamps_winner() {
        let store = MemoryStore::new();
        let key = GameKey("g1".into());
        store.create_match(record("g1")).await.unwrap();

        store.finish_match(&key, "ada").await.unwrap();

        let loaded = store.load_match(&key).await.unwrap().unwrap();
        assert!(!loaded.in_progress);
        assert_eq!(loaded.winner, "ada");
    }
}
