//! High score leaderboard system
//!
//! Persisted through a `KeyValueStore`, tracks the top 10 sessions.

use std::cell::OnceCell;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::persistence::KeyValueStore;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Storage key for the serialized leaderboard
pub const STORAGE_KEY: &str = "mosquito_leaderboard";

pub const ADJECTIVES: [&str; 8] = [
    "Swift", "Silent", "Deadly", "Crazy", "Lucky", "Ninja", "Flying", "Mighty",
];
pub const NOUNS: [&str; 8] = [
    "Swatter", "Hunter", "Smacker", "Ninja", "Bear", "Cat", "Eagle", "Frog",
];

/// Exclusive upper bound of the numeric identity suffix
pub const IDENTITY_NUMBER_LIMIT: u32 = 1000;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Generated player name
    #[serde(alias = "username")]
    pub identity: String,
    /// Mosquitoes swatted
    pub score: u32,
}

/// Generate a player name such as `LuckyFrog42`
pub fn generate_identity<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let number = rng.random_range(0..IDENTITY_NUMBER_LIMIT);
    format!("{adjective}{noun}{number}")
}

/// Top-10 leaderboard backed by a key-value store
///
/// The stored sequence is read on first access and cached; every
/// submission rewrites the whole sequence.
#[derive(Debug)]
pub struct Leaderboard<S: KeyValueStore> {
    store: S,
    entries: OnceCell<Vec<LeaderboardEntry>>,
}

impl<S: KeyValueStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: OnceCell::new(),
        }
    }

    /// Read the persisted leaderboard from a store
    ///
    /// Missing or unreadable data is an empty leaderboard.
    pub fn read_from(store: &S) -> Vec<LeaderboardEntry> {
        let Some(json) = store.get(STORAGE_KEY) else {
            log::info!("No high scores found, starting fresh");
            return Vec::new();
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&json) {
            Ok(entries) => {
                log::info!("Loaded {} high scores", entries.len());
                entries
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high scores: {}", e);
                Vec::new()
            }
        }
    }

    /// Current entries, best first
    pub fn load(&self) -> &[LeaderboardEntry] {
        self.entries.get_or_init(|| Self::read_from(&self.store))
    }

    /// Record a finished session
    ///
    /// Returns the rank achieved (1-indexed) or None if the entry did not
    /// survive the cut.
    pub fn submit(&mut self, identity: impl Into<String>, score: u32) -> Option<usize> {
        let mut entries = self
            .entries
            .take()
            .unwrap_or_else(|| Self::read_from(&self.store));

        // Stable sort keeps earlier submissions ahead on ties
        let rank = entries.iter().filter(|e| e.score >= score).count() + 1;
        entries.push(LeaderboardEntry {
            identity: identity.into(),
            score,
        });
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);

        self.save(&entries);
        self.entries = OnceCell::from(entries);

        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    fn save(&mut self, entries: &[LeaderboardEntry]) {
        let result = serde_json::to_string(entries)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("High scores saved ({} entries)", entries.len()),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.load().first().map(|e| e.score)
    }

    /// Borrow the backing store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn scores(board: &Leaderboard<MemoryStore>) -> Vec<u32> {
        board.load().iter().map(|e| e.score).collect()
    }

    #[test]
    fn test_keeps_top_ten_descending() {
        let mut board = Leaderboard::new(MemoryStore::new());
        for (i, score) in [5, 3, 8, 1, 9, 2, 7, 4, 6, 0, 10].into_iter().enumerate() {
            board.submit(format!("P{i}"), score);
        }

        assert_eq!(scores(&board), vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);

        // The persisted copy matches the cache
        let stored = Leaderboard::read_from(board.store());
        assert_eq!(stored.len(), MAX_HIGH_SCORES);
        assert!(stored.iter().all(|e| e.score != 0));
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let mut board = Leaderboard::new(MemoryStore::new());
        board.submit("First", 5);
        board.submit("Second", 7);
        board.submit("Third", 5);
        board.submit("Fourth", 5);

        let names: Vec<&str> = board.load().iter().map(|e| e.identity.as_str()).collect();
        assert_eq!(names, vec!["Second", "First", "Third", "Fourth"]);
    }

    #[test]
    fn test_submit_returns_rank() {
        let mut board = Leaderboard::new(MemoryStore::new());
        assert_eq!(board.submit("A", 4), Some(1));
        assert_eq!(board.submit("B", 9), Some(1));
        assert_eq!(board.submit("C", 4), Some(3));

        for i in 0..7 {
            board.submit(format!("Filler{i}"), 20);
        }
        // Full board with 4 at the bottom: a tie lands after it and is cut
        assert_eq!(board.submit("Late", 4), None);
        assert_eq!(board.load().len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_every_submission_writes_whole_board() {
        let mut board = Leaderboard::new(MemoryStore::new());
        board.submit("A", 1);
        board.submit("B", 2);
        assert_eq!(board.store().write_count(), 2);

        let json = board.store().get(STORAGE_KEY).unwrap();
        let parsed: Vec<LeaderboardEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].identity, "B");
    }

    #[test]
    fn test_corrupt_data_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();
        let board = Leaderboard::new(store);
        assert!(board.is_empty());
        assert_eq!(board.top_score(), None);
    }

    #[test]
    fn test_loads_legacy_username_field() {
        let mut store = MemoryStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"[{"username":"SwiftCat7","score":12},{"username":"LuckyFrog1","score":3}]"#,
            )
            .unwrap();
        let mut board = Leaderboard::new(store);
        assert_eq!(board.top_score(), Some(12));
        assert_eq!(board.load()[0].identity, "SwiftCat7");

        board.submit("NinjaBear5", 8);
        assert_eq!(scores(&board), vec![12, 8, 3]);
    }

    #[test]
    fn test_identity_shape() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let name = generate_identity(&mut rng);
            let adjective = ADJECTIVES
                .iter()
                .find(|a| name.starts_with(**a))
                .expect("adjective prefix");
            let rest = &name[adjective.len()..];
            let noun = NOUNS
                .iter()
                .find(|n| rest.starts_with(**n))
                .expect("noun");
            let digits = &rest[noun.len()..];
            assert!(!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
            let number: u32 = digits.parse().unwrap();
            assert!(number < IDENTITY_NUMBER_LIMIT);
        }
    }
}
