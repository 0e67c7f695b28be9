use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::grid::{Grid, Idx, Score, Tile, SIZE};
use crate::error::Result;

/// On-disk record of a game in progress.
#[derive(Debug, Deserialize, Serialize)]
struct SavedGame {
    grid: Vec<Vec<Tile>>,
    score: Score,
}

impl SavedGame {
    fn capture(grid: &Grid, score: Score) -> Self {
        Self {
            grid: grid.rows().iter().map(|row| row.to_vec()).collect(),
            score,
        }
    }

    /// Validate the record back into engine types: a 4x4 grid whose cells
    /// are zero or a power of two >= 2.
    fn restore(&self) -> Option<(Grid, Score)> {
        if self.grid.len() != SIZE || self.grid.iter().any(|row| row.len() != SIZE) {
            return None;
        }
        let mut grid = Grid::default();
        for (y, row) in self.grid.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value == 1 || (value != 0 && !value.is_power_of_two()) {
                    return None;
                }
                grid.set(&Idx(x, y), value);
            }
        }
        Some((grid, self.score))
    }
}

pub(crate) fn save(path: &Path, grid: &Grid, score: Score) -> Result<()> {
    let record = SavedGame::capture(grid, score);
    fs::write(path, serde_json::to_string(&record)?)?;
    Ok(())
}

/// Load a saved game. Missing, unreadable, and malformed files all come
/// back as None: a bad save file means a fresh game, never a startup
/// failure.
pub(crate) fn load(path: &Path) -> Option<(Grid, Score)> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("unreadable save file {}: {}", path.display(), e);
            }
            return None;
        }
    };
    match decode(&raw) {
        Some(state) => Some(state),
        None => {
            log::warn!("discarding malformed save file {}", path.display());
            None
        }
    }
}

fn decode(raw: &str) -> Option<(Grid, Score)> {
    serde_json::from_str::<SavedGame>(raw).ok()?.restore()
}
