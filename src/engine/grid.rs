pub(crate) const SIZE: usize = 4;

pub(crate) type Tile = u32;

pub(crate) type Score = u32;

/// Idx addresses a single grid cell as (x, y) with (0, 0) in the top-left
/// corner.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Idx(pub(crate) usize, pub(crate) usize);

impl std::fmt::Display for Idx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "idx({0},{1})", self.0, self.1)
    }
}

impl Idx {
    pub(crate) fn x(&self) -> usize {
        self.0
    }

    pub(crate) fn y(&self) -> usize {
        self.1
    }
}

/// Direction represents the direction indicated by the player input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub(crate) const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        write!(f, "{}", s)
    }
}

/// MoveOutcome describes the result of shifting a grid in one direction.
///
/// `grid` is the post-shift grid before any tile has been spawned. When
/// `changed` is false the shift was a no-op: `grid` equals the input,
/// `gained` is zero, and callers must not spawn a tile or record history.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MoveOutcome {
    pub(crate) grid: Grid,
    pub(crate) changed: bool,
    pub(crate) gained: Score,
    /// Cells holding a freshly merged tile, in final grid coordinates, for
    /// caller-side merge highlighting.
    pub(crate) merged: Vec<Idx>,
}

/// Grid is the 4x4 tile matrix. Zero marks an empty cell; every non-zero
/// value is a power of two >= 2. Shifting never mutates in place so callers
/// can inspect an outcome before committing it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Grid {
    slots: [[Tile; SIZE]; SIZE],
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.slots {
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}

impl Grid {
    pub(crate) fn from_rows(slots: [[Tile; SIZE]; SIZE]) -> Self {
        Self { slots }
    }

    pub(crate) fn rows(&self) -> &[[Tile; SIZE]; SIZE] {
        &self.slots
    }

    pub(crate) fn get(&self, idx: &Idx) -> Tile {
        self.slots[idx.y()][idx.x()]
    }

    pub(crate) fn set(&mut self, idx: &Idx, value: Tile) {
        self.slots[idx.y()][idx.x()] = value;
    }

    pub(crate) fn empty_cells(&self) -> Vec<Idx> {
        let mut empties = Vec::new();
        for y in 0..SIZE {
            for x in 0..SIZE {
                if self.slots[y][x] == 0 {
                    empties.push(Idx(x, y));
                }
            }
        }
        empties
    }

    /// Shift every lane toward `direction`, merging equal neighbors once per
    /// pass. Pure with respect to `self`.
    pub(crate) fn shift(&self, direction: Direction) -> MoveOutcome {
        let mut grid = *self;
        let mut changed = false;
        let mut gained = 0;
        let mut merged = Vec::new();

        for lane in lanes(direction) {
            let before: [Tile; SIZE] = std::array::from_fn(|i| self.get(&lane[i]));
            let slid = slide_lane(&before);
            if slid.tiles != before {
                changed = true;
            }
            for (offset, idx) in lane.iter().enumerate() {
                grid.set(idx, slid.tiles[offset]);
            }
            gained += slid.gained;
            merged.extend(slid.merged.iter().map(|&offset| lane[offset]));
        }

        MoveOutcome {
            grid,
            changed,
            gained,
            merged,
        }
    }

    /// True iff the grid is full and no two equal tiles touch horizontally
    /// or vertically. Only the right and lower neighbor of each cell are
    /// inspected; the mirror pairs are covered from the other side.
    pub(crate) fn is_terminal(&self) -> bool {
        for y in 0..SIZE {
            for x in 0..SIZE {
                let value = self.slots[y][x];
                if value == 0 {
                    return false;
                }
                if x + 1 < SIZE && self.slots[y][x + 1] == value {
                    return false;
                }
                if y + 1 < SIZE && self.slots[y + 1][x] == value {
                    return false;
                }
            }
        }
        true
    }
}

struct SlidLane {
    tiles: [Tile; SIZE],
    gained: Score,
    // offsets into `tiles` of merge products
    merged: Vec<usize>,
}

/// Slide one lane toward offset zero: drop empties, merge equal neighbors in
/// a single left-to-right pass, pad with zeros. A merge product never merges
/// again within the same pass, so [2, 2, 4, 0] yields [4, 4, 0, 0] rather
/// than chaining into [8, 0, 0, 0].
fn slide_lane(lane: &[Tile; SIZE]) -> SlidLane {
    let mut compact: Vec<Tile> = lane.iter().copied().filter(|&v| v != 0).collect();
    let mut gained = 0;
    let mut merged = Vec::new();

    let mut i = 0;
    while i + 1 < compact.len() {
        if compact[i] == compact[i + 1] {
            compact[i] *= 2;
            gained += compact[i];
            merged.push(i);
            compact.remove(i + 1);
        }
        i += 1;
    }

    let mut tiles = [0; SIZE];
    tiles[..compact.len()].copy_from_slice(&compact);
    SlidLane {
        tiles,
        gained,
        merged,
    }
}

/// Cell indices of each lane, ordered from the edge tiles move toward. Lane
/// offset zero is where a fully shifted tile comes to rest.
fn lanes(direction: Direction) -> Vec<Vec<Idx>> {
    (0..SIZE)
        .map(|lane| {
            (0..SIZE)
                .map(|offset| match direction {
                    Direction::Left => Idx(offset, lane),
                    Direction::Right => Idx(SIZE - 1 - offset, lane),
                    Direction::Up => Idx(lane, offset),
                    Direction::Down => Idx(lane, SIZE - 1 - offset),
                })
                .collect()
        })
        .collect()
}
