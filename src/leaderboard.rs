use std::fs;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::engine::grid::Score;
use crate::error::Result;

const CAPACITY: usize = 10;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct Entry {
    pub(crate) name: String,
    pub(crate) score: Score,
    pub(crate) date: String,
}

/// Leaderboard keeps the top scores, best first, capped at ten entries.
/// Persisted separately from the in-progress game so finishing or
/// abandoning a session never loses past results.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub(crate) struct Leaderboard {
    entries: Vec<Entry>,
}

impl Leaderboard {
    /// Load the leaderboard, falling back to an empty one when the file is
    /// missing or malformed.
    pub(crate) fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("unreadable leaderboard file {}: {}", path.display(), e);
                }
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(board) => board,
            Err(e) => {
                log::warn!("discarding malformed leaderboard {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string(&self)?)?;
        Ok(())
    }

    pub(crate) fn record(&mut self, name: &str, score: Score) {
        self.add(Entry {
            name: name.to_string(),
            score,
            date: Local::now().format("%Y-%m-%d").to_string(),
        });
    }

    fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(CAPACITY);
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn best(&self) -> Option<Score> {
        self.entries.first().map(|entry| entry.score)
    }
}
