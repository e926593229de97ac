//! High score leaderboard
//!
//! Always exactly 8 entries, sorted by score then by timestamp (newest
//! first on ties). Persisted with the binary format in `persistence`.

use std::cmp::Ordering;
use std::path::Path;

use crate::persistence::{self, PersistenceError};

/// Number of entries in the table
pub const MAX_HIGH_SCORES: usize = 8;

/// Name written for default and placeholder-free slots
pub const DEFAULT_NAME: &str = "GAZ";

/// Name shown for a freshly earned entry until the player types theirs
pub const PENDING_NAME: &str = "---";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    /// Player initials
    pub name: String,
    /// Final score
    pub score: u32,
    /// Unix timestamp (seconds) when achieved, used to order ties
    pub stamp: i64,
    /// Marks the entry awaiting a name between game over and name entry
    pub marker: bool,
}

impl HighScoreEntry {
    pub fn new(name: String, score: u32, stamp: i64) -> Self {
        Self {
            name,
            score,
            stamp,
            marker: false,
        }
    }
}

/// Ordering used by the table: higher score first, then newer stamp first
fn rank_order(a: &HighScoreEntry, b: &HighScoreEntry) -> Ordering {
    b.score.cmp(&a.score).then_with(|| b.stamp.cmp(&a.stamp))
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::defaults(0)
    }
}

impl HighScores {
    /// The table written when no valid file exists
    pub fn defaults(stamp: i64) -> Self {
        let entries = (0..MAX_HIGH_SCORES)
            .map(|i| HighScoreEntry::new(DEFAULT_NAME.to_string(), (i as u32 + 2) * 20, stamp))
            .collect();
        Self::from_entries(entries)
    }

    /// Build a table from arbitrary entries, sorting and padding/truncating to size
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(rank_order);
        entries.truncate(MAX_HIGH_SCORES);
        while entries.len() < MAX_HIGH_SCORES {
            entries.push(HighScoreEntry::new(DEFAULT_NAME.to_string(), 0, 0));
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-sort in place
    pub fn sort(&mut self) {
        self.entries.sort_by(rank_order);
    }

    /// Index the score would occupy: the first entry it matches or beats
    pub fn qualifying_position(&self, score: u32) -> Option<usize> {
        self.entries.iter().position(|e| score >= e.score)
    }

    /// Check if a score earns a place in the table
    pub fn qualifies(&self, score: u32) -> bool {
        self.qualifying_position(score).is_some()
    }

    /// Insert a marked placeholder entry for `score`, dropping the bottom entry.
    /// Returns the index of the new entry, or None if the score doesn't qualify.
    pub fn insert_pending(&mut self, score: u32, stamp: i64) -> Option<usize> {
        let pos = self.qualifying_position(score)?;
        let mut entry = HighScoreEntry::new(PENDING_NAME.to_string(), score, stamp);
        entry.marker = true;
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos)
    }

    /// Name the marked entry and clear every marker.
    /// Returns false if no entry was waiting for a name.
    pub fn set_player_name(&mut self, name: &str) -> bool {
        let named = match self.entries.iter_mut().find(|e| e.marker) {
            Some(entry) => {
                entry.name = name.to_string();
                true
            }
            None => false,
        };
        for entry in &mut self.entries {
            entry.marker = false;
        }
        named
    }

    /// Index of the entry currently waiting for a name
    pub fn pending_position(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.marker)
    }

    /// Name and score of the top entry, or ("ERR", 0) for an empty table
    pub fn top(&self) -> (&str, u32) {
        self.entries
            .first()
            .map(|e| (e.name.as_str(), e.score))
            .unwrap_or(("ERR", 0))
    }

    /// Load a table from disk
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let bytes = std::fs::read(path)?;
        let entries = persistence::decode_table(&bytes)?;
        log::info!("Loaded high scores from {}", path.display());
        Ok(Self::from_entries(entries))
    }

    /// Write the table to disk (sorted, exactly 8 records)
    pub fn save(&mut self, path: &Path) -> Result<(), PersistenceError> {
        self.sort();
        let bytes = persistence::encode_table(&self.entries);
        persistence::write_bytes_atomic(path, &bytes)?;
        log::info!("High scores saved to {}", path.display());
        Ok(())
    }

    /// Load the table, regenerating (and saving) defaults if the file is
    /// missing or invalid. Never fails; write errors are logged.
    pub fn load_or_create(path: &Path, stamp: i64) -> Self {
        match Self::load(path) {
            Ok(scores) => scores,
            Err(err) => {
                match &err {
                    PersistenceError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                        log::info!("No high score file at {}, creating one", path.display());
                    }
                    _ => log::warn!("Load error: {}; regenerating high scores", err),
                }
                let mut scores = Self::defaults(stamp);
                if let Err(err) = scores.save(path) {
                    log::error!("Failed to write high scores: {}", err);
                }
                scores
            }
        }
    }
}
