use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::storage::KvStore;
use crate::models::{PresentCheckError, Result, RewardResult};

/// Default storage key for the serialized board.
pub const DEFAULT_KEY: &str = "leaderboard";

/// The persisted, sorted list of recorded checks.
///
/// Handles are unique case-insensitively; one check per handle, ever. The
/// board is kept sorted descending by reward, equal rewards ordered by
/// earlier timestamp. Every mutation is persisted whole.
pub struct LeaderboardStore {
    storage: Box<dyn KvStore>,
    key: String,
    entries: Vec<RewardResult>,
}

impl LeaderboardStore {
    /// Loads the board from storage. Absent or unparsable data loads as an
    /// empty board, never an error.
    pub fn load(storage: Box<dyn KvStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = match storage.get(&key) {
            Some(raw) => match serde_json::from_str::<Vec<RewardResult>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(key, error = %e, "stored leaderboard is unparsable, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let mut store = Self {
            storage,
            key,
            entries,
        };
        store.sort();
        store
    }

    pub fn entries(&self) -> &[RewardResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a handle is already on the board, compared case-insensitively.
    pub fn contains(&self, handle: &str) -> bool {
        let needle = handle.to_lowercase();
        self.entries.iter().any(|e| e.handle.to_lowercase() == needle)
    }

    /// Records a new result and persists the board.
    ///
    /// Fails with `DuplicateHandle` when the handle (any case variant) is
    /// already recorded; the board is left untouched.
    pub fn record(&mut self, handle: &str, reward: u64, now: DateTime<Utc>) -> Result<&[RewardResult]> {
        if self.contains(handle) {
            return Err(PresentCheckError::DuplicateHandle {
                handle: handle.to_string(),
            });
        }
        self.entries.push(RewardResult::new(handle, reward, now));
        self.sort();
        self.persist()?;
        debug!(handle, reward, total = self.entries.len(), "recorded check");
        Ok(&self.entries)
    }

    /// Serializes the full board into storage, overwriting prior contents.
    pub fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.entries)?;
        self.storage.set(&self.key, &raw)
    }

    fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| b.reward.cmp(&a.reward).then(a.timestamp.cmp(&b.timestamp)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::storage::MemoryStore;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_735_000_000 + secs, 0).unwrap()
    }

    fn empty_store() -> LeaderboardStore {
        LeaderboardStore::load(Box::new(MemoryStore::new()), DEFAULT_KEY)
    }

    #[test]
    fn test_load_absent_is_empty() {
        let store = empty_store();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        let backing = MemoryStore::with_value(DEFAULT_KEY, "][ not json");
        let store = LeaderboardStore::load(Box::new(backing), DEFAULT_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_sorts_descending() {
        let mut store = empty_store();
        store.record("carl", 5, ts(0)).unwrap();
        store.record("dana", 900_000, ts(1)).unwrap();

        let handles: Vec<_> = store.entries().iter().map(|e| e.handle.as_str()).collect();
        assert_eq!(handles, vec!["dana", "carl"]);
        assert!(store.entries().windows(2).all(|w| w[0].reward >= w[1].reward));
    }

    #[test]
    fn test_duplicate_handle_rejected_case_insensitive() {
        let mut store = empty_store();
        store.record("alice", 42, ts(0)).unwrap();

        let err = store.record("ALICE", 7, ts(1)).unwrap_err();
        assert!(matches!(err, PresentCheckError::DuplicateHandle { .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].reward, 42);
    }

    #[test]
    fn test_equal_rewards_ordered_by_earlier_timestamp() {
        let mut store = empty_store();
        store.record("late", 100, ts(50)).unwrap();
        store.record("early", 100, ts(10)).unwrap();

        let handles: Vec<_> = store.entries().iter().map(|e| e.handle.as_str()).collect();
        assert_eq!(handles, vec!["early", "late"]);
    }

    #[test]
    fn test_persist_then_load_reproduces_entries() {
        use crate::leaderboard::storage::FileStore;
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("board.json");

        {
            let mut store = LeaderboardStore::load(Box::new(FileStore::new(&path)), DEFAULT_KEY);
            store.record("alice", 42, ts(0)).unwrap();
            store.record("bob", 7, ts(1)).unwrap();
        }

        let reloaded = LeaderboardStore::load(Box::new(FileStore::new(&path)), DEFAULT_KEY);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("alice"));
        assert!(reloaded.contains("bob"));
        assert_eq!(reloaded.entries()[0].handle, "alice");
    }
}
