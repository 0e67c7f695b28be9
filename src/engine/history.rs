use super::grid::{Grid, Score};

/// Snapshot is the state captured before a move is applied, restored
/// verbatim by an undo.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) grid: Grid,
    pub(crate) score: Score,
}

/// History holds at most one snapshot: each successful move overwrites the
/// previous entry, and an undo consumes it. A second undo without an
/// intervening move therefore has nothing to restore.
#[derive(Debug, Default)]
pub(crate) struct History {
    slot: Option<Snapshot>,
}

impl History {
    pub(crate) fn record(&mut self, grid: Grid, score: Score) {
        self.slot = Some(Snapshot { grid, score });
    }

    pub(crate) fn take(&mut self) -> Option<Snapshot> {
        self.slot.take()
    }

    pub(crate) fn clear(&mut self) {
        self.slot = None;
    }
}
