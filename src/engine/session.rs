use rand::RngCore;

use super::grid::{Direction, Grid, MoveOutcome, Score};
use super::history::History;
use super::spawn::Spawner;

/// Tiles placed when a new game starts.
const INITIAL_TILES: usize = 2;
/// Tiles placed after each successful move.
const TILES_PER_MOVE: usize = 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameStatus {
    Playing,
    Over,
}

/// Session owns one game in progress: the grid, the running score, the
/// single-level undo history, and the RNG feeding the spawner. All state
/// transitions go through it; the grid itself stays a plain value.
pub(crate) struct Session {
    grid: Grid,
    score: Score,
    status: GameStatus,
    history: History,
    spawner: Spawner,
    rng: Box<dyn RngCore>,
}

impl Session {
    /// Start a fresh game using the given random number generator.
    pub(crate) fn new(rng: impl RngCore + 'static) -> Self {
        let mut session = Self {
            grid: Grid::default(),
            score: 0,
            status: GameStatus::Playing,
            history: History::default(),
            spawner: Spawner::default(),
            rng: Box::new(rng),
        };
        session
            .spawner
            .spawn(&mut session.grid, &mut session.rng, INITIAL_TILES);
        session
    }

    /// Rebuild a session from persisted state. The status is re-derived
    /// from the grid, so loading a dead board resumes as Over.
    pub(crate) fn resume(grid: Grid, score: Score, rng: impl RngCore + 'static) -> Self {
        let status = if grid.is_terminal() {
            GameStatus::Over
        } else {
            GameStatus::Playing
        };
        Self {
            grid,
            score,
            status,
            history: History::default(),
            spawner: Spawner::default(),
            rng: Box::new(rng),
        }
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn score(&self) -> Score {
        self.score
    }

    pub(crate) fn status(&self) -> GameStatus {
        self.status
    }

    /// Attempt one move. Returns None while the game is over or when the
    /// shift changes nothing; a no-op move leaves grid, score, and history
    /// untouched. On a successful move the pre-move state is snapshotted,
    /// the shift is committed, one tile spawns, and the terminal condition
    /// is re-evaluated.
    pub(crate) fn apply(&mut self, direction: Direction) -> Option<MoveOutcome> {
        if self.status == GameStatus::Over {
            return None;
        }
        let outcome = self.grid.shift(direction);
        if !outcome.changed {
            return None;
        }

        self.history.record(self.grid, self.score);
        self.grid = outcome.grid;
        self.score += outcome.gained;
        self.spawner
            .spawn(&mut self.grid, &mut self.rng, TILES_PER_MOVE);
        if self.grid.is_terminal() {
            self.status = GameStatus::Over;
        }
        log::debug!(
            "moved {}, gained {}, score {}, status {:?}",
            direction,
            outcome.gained,
            self.score,
            self.status
        );
        Some(outcome)
    }

    /// Roll back to the state before the last successful move. Returns
    /// false when there is nothing to restore or the game is over.
    pub(crate) fn undo(&mut self) -> bool {
        if self.status == GameStatus::Over {
            return false;
        }
        match self.history.take() {
            Some(snapshot) => {
                self.grid = snapshot.grid;
                self.score = snapshot.score;
                true
            }
            None => false,
        }
    }

    /// Reset to a fresh game from any state.
    pub(crate) fn new_game(&mut self) {
        self.grid = Grid::default();
        self.score = 0;
        self.status = GameStatus::Playing;
        self.history.clear();
        self.spawner
            .spawn(&mut self.grid, &mut self.rng, INITIAL_TILES);
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, grid: Grid, score: Score) {
        self.grid = grid;
        self.score = score;
        self.status = if grid.is_terminal() {
            GameStatus::Over
        } else {
            GameStatus::Playing
        };
        self.history.clear();
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn nonzero_tiles(grid: &Grid) -> Vec<u32> {
        grid.rows()
            .iter()
            .flatten()
            .copied()
            .filter(|&v| v != 0)
            .collect()
    }

    #[test]
    fn new_game_has_two_starting_tiles() {
        let session = Session::new(rng());
        let tiles = nonzero_tiles(session.grid());
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|v| matches!(v, 2 | 4)));
        assert_eq!(session.score(), 0);
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn successful_move_commits_and_spawns() {
        let mut session = Session::new(rng());
        session.set_state(
            Grid::from_rows([[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            0,
        );
        let outcome = session.apply(Direction::Left).expect("the row can merge");
        assert_eq!(outcome.gained, 4);
        assert_eq!(session.score(), 4);
        assert_eq!(session.grid().get(&crate::engine::grid::Idx(0, 0)), 4);
        // one merged tile plus one spawned tile
        assert_eq!(nonzero_tiles(session.grid()).len(), 2);
    }

    #[test]
    fn noop_move_is_rejected_without_side_effects() {
        let mut session = Session::new(rng());
        let grid = Grid::from_rows([[2, 4, 8, 16], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        session.set_state(grid, 20);
        assert!(session.apply(Direction::Left).is_none());
        assert_eq!(*session.grid(), grid);
        assert_eq!(session.score(), 20);
        // the rejected move must not leave an undoable snapshot behind
        assert!(!session.undo());
    }

    #[test]
    fn undo_restores_premove_state_exactly_once() {
        let mut session = Session::new(rng());
        let before = Grid::from_rows([[2, 2, 4, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        session.set_state(before, 8);

        session.apply(Direction::Left).expect("the row can merge");
        assert!(session.undo());
        assert_eq!(*session.grid(), before);
        assert_eq!(session.score(), 8);

        assert!(!session.undo(), "second undo must fail");
        assert_eq!(*session.grid(), before);
    }

    #[test]
    fn finished_game_rejects_moves_and_undo() {
        let mut session = Session::new(rng());
        let dead = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        session.set_state(dead, 100);
        assert_eq!(session.status(), GameStatus::Over);

        for direction in Direction::ALL {
            assert!(session.apply(direction).is_none());
        }
        assert!(!session.undo());
        assert_eq!(*session.grid(), dead);
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn new_game_resets_a_finished_session() {
        let mut session = Session::new(rng());
        session.set_state(
            Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]),
            100,
        );
        session.new_game();
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(nonzero_tiles(session.grid()).len(), 2);
    }

    #[test]
    fn resume_rederives_status_from_the_grid() {
        let live = Grid::from_rows([[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let session = Session::resume(live, 4, rng());
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.score(), 4);

        let dead = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let session = Session::resume(dead, 240, rng());
        assert_eq!(session.status(), GameStatus::Over);
    }
}
