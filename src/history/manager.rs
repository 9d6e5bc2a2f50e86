//! Linear undo/redo history of pool snapshots.
//!
//! The history is an ordered list of snapshots and a cursor that always
//! points at the snapshot matching the live pool. Committing while the
//! cursor is not at the end prunes the redo branch first, so history never
//! forks.
//!
//! ## Mode-aware stepping
//!
//! Against the AI, one human-visible turn is two snapshots: the human's
//! move and the automatic reply. Undo and redo therefore move two entries
//! at a time in `Pvai` and refuse to land on the AI's intermediate state.
//! With two humans they move one entry.
//!
//! Phase, lock and whose-turn guards belong to the session, which owns
//! those inputs; this type only knows about entries and the cursor.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameMode, Party, PoolState};

/// Immutable capture of the pool and the party to move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub pool: PoolState,
    pub current_turn: Party,
}

impl Snapshot {
    #[must_use]
    pub fn new(pool: PoolState, current_turn: Party) -> Self {
        Self { pool, current_turn }
    }

    /// Items present in this snapshot.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.pool.remaining()
    }
}

/// Snapshot log plus cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryManager {
    entries: Vector<Snapshot>,
    cursor: usize,
}

impl HistoryManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries = Vector::unit(initial);
        self.cursor = 0;
    }

    /// Discard all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Record a new snapshot after the cursor, pruning any redo branch.
    pub fn commit(&mut self, snapshot: Snapshot) {
        if !self.entries.is_empty() {
            let pruned = self.entries.len() - (self.cursor + 1);
            if pruned > 0 {
                debug!(pruned, "redo branch discarded");
            }
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(snapshot);
        self.cursor = self.entries.len() - 1;
    }

    /// Step back and return the snapshot to restore, or `None` at the boundary.
    pub fn undo(&mut self, mode: GameMode) -> Option<Snapshot> {
        let step = self.undo_step(mode)?;
        self.cursor -= step;
        debug!(step, cursor = self.cursor, "undo");
        self.current().cloned()
    }

    /// Step forward and return the snapshot to restore, or `None` at the boundary.
    pub fn redo(&mut self, mode: GameMode) -> Option<Snapshot> {
        let step = self.redo_step(mode)?;
        self.cursor += step;
        debug!(step, cursor = self.cursor, "redo");
        self.current().cloned()
    }

    #[must_use]
    pub fn can_undo(&self, mode: GameMode) -> bool {
        self.undo_step(mode).is_some()
    }

    #[must_use]
    pub fn can_redo(&self, mode: GameMode) -> bool {
        self.redo_step(mode).is_some()
    }

    /// Snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.entries.iter()
    }

    fn stride(mode: GameMode) -> usize {
        match mode {
            GameMode::Pvai => 2,
            GameMode::Pvp => 1,
        }
    }

    fn undo_step(&self, mode: GameMode) -> Option<usize> {
        let step = Self::stride(mode);
        (!self.entries.is_empty() && self.cursor >= step).then_some(step)
    }

    fn redo_step(&self, mode: GameMode) -> Option<usize> {
        let step = Self::stride(mode);
        let ahead = self.entries.len().checked_sub(self.cursor + 1)?;
        (ahead >= step).then_some(step)
    }
}
