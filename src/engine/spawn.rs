use rand::distributions::Distribution;
use rand::distributions::WeightedIndex;
use rand::seq::IteratorRandom;
use rand::Rng;

use super::grid::{Grid, Idx, Tile};

const NEW_TILE_CHOICES: [Tile; 2] = [2, 4];
const NEW_TILE_WEIGHTS: [u8; 2] = [9, 1];

/// Spawner drops new tiles onto random empty cells: a 2 nine times out of
/// ten, a 4 otherwise.
#[derive(Clone, Debug)]
pub(crate) struct Spawner {
    weighted_index: WeightedIndex<u8>,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            weighted_index: WeightedIndex::new(NEW_TILE_WEIGHTS)
                .expect("NEW_TILE_WEIGHTS should never be empty"),
        }
    }
}

impl Spawner {
    /// Place up to `count` new tiles on distinct empty cells chosen
    /// uniformly at random. Returns the filled cells; fewer than `count`
    /// when the grid runs out of empties, none when it is already full.
    pub(crate) fn spawn<T: Rng>(&self, grid: &mut Grid, rng: &mut T, count: usize) -> Vec<Idx> {
        let chosen = grid.empty_cells().into_iter().choose_multiple(rng, count);
        for idx in &chosen {
            let value = NEW_TILE_CHOICES[self.weighted_index.sample(rng)];
            grid.set(idx, value);
        }
        chosen
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::grid::SIZE;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn spawn_fills_only_empty_cells() {
        let mut rng = rng();
        let spawner = Spawner::default();
        let occupied = Grid::from_rows([
            [2, 0, 0, 0],
            [0, 4, 0, 0],
            [0, 0, 8, 0],
            [0, 0, 0, 16],
        ]);
        for _ in 0..50 {
            let mut grid = occupied;
            let placed = spawner.spawn(&mut grid, &mut rng, 1);
            assert_eq!(placed.len(), 1);
            let idx = placed[0];
            assert_eq!(occupied.get(&idx), 0);
            assert!(matches!(grid.get(&idx), 2 | 4));
        }
    }

    #[test]
    fn spawn_count_caps_at_available_empties() {
        let mut rng = rng();
        let spawner = Spawner::default();
        let mut grid = Grid::from_rows([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 0],
        ]);
        let placed = spawner.spawn(&mut grid, &mut rng, 3);
        assert_eq!(placed, vec![Idx(3, 3)]);
        assert!(grid.empty_cells().is_empty());
    }

    #[test]
    fn spawn_on_full_grid_is_noop() {
        let mut rng = rng();
        let spawner = Spawner::default();
        let full = Grid::from_rows([[2; SIZE]; SIZE]);
        let mut grid = full;
        let placed = spawner.spawn(&mut grid, &mut rng, 1);
        assert!(placed.is_empty());
        assert_eq!(grid, full);
    }

    #[test]
    fn spawn_two_yields_distinct_cells() {
        let mut rng = rng();
        let spawner = Spawner::default();
        for _ in 0..50 {
            let mut grid = Grid::default();
            let placed = spawner.spawn(&mut grid, &mut rng, 2);
            assert_eq!(placed.len(), 2);
            assert_ne!(placed[0], placed[1]);
            assert_eq!(grid.empty_cells().len(), SIZE * SIZE - 2);
        }
    }
}
