//! The shared pool of removable items.
//!
//! Items are presence flags in a fixed order. `remaining` is cached next to
//! the flags and must always equal the number of present flags; every
//! mutation goes through `remove`, which keeps the two in step.
//!
//! Flags are stored in an `im::Vector`, so snapshotting a pool for history
//! is an O(1) clone. Deserialization recounts the flags and rejects a pool
//! whose cached count disagrees.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::GameError;

/// Indices struck by a single move. Moves never exceed ten items.
pub type MoveIndices = SmallVec<[usize; 10]>;

/// Presence flags plus the cached remaining count.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPool")]
pub struct PoolState {
    flags: Vector<bool>,
    remaining: u32,
}

/// Wire form of `PoolState`, checked before it becomes one.
#[derive(Deserialize)]
struct RawPool {
    flags: Vector<bool>,
    remaining: u32,
}

impl TryFrom<RawPool> for PoolState {
    type Error = GameError;

    fn try_from(raw: RawPool) -> Result<Self, Self::Error> {
        let present = count_present(&raw.flags);
        if present != raw.remaining {
            return Err(GameError::InconsistentPool {
                remaining: raw.remaining,
                present,
            });
        }
        Ok(Self {
            flags: raw.flags,
            remaining: raw.remaining,
        })
    }
}

fn count_present(flags: &Vector<bool>) -> u32 {
    flags.iter().filter(|&&present| present).count() as u32
}

impl PoolState {
    /// A pool with `size` items, all present.
    #[must_use]
    pub fn full(size: u32) -> Self {
        Self {
            flags: std::iter::repeat(true).take(size as usize).collect(),
            remaining: size,
        }
    }

    /// Total number of positions, present or removed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of items still present.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Is the item at `index` still present? Out-of-range indices are not.
    #[must_use]
    pub fn is_present(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Presence flags in position order.
    pub fn flags(&self) -> impl Iterator<Item = bool> + '_ {
        self.flags.iter().copied()
    }

    /// The first `count` present positions, lowest index first.
    ///
    /// Returns fewer than `count` indices if fewer items remain.
    #[must_use]
    pub fn front_indices(&self, count: u32) -> MoveIndices {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, &present)| present)
            .map(|(i, _)| i)
            .take(count as usize)
            .collect()
    }

    /// Number of present items at positions `0..=index`.
    ///
    /// This is the move size a hover or click on `index` stands for.
    #[must_use]
    pub fn present_through(&self, index: usize) -> u32 {
        self.flags
            .iter()
            .take(index.saturating_add(1))
            .filter(|&&present| present)
            .count() as u32
    }

    /// Mark `index` removed. Returns `false` if it was absent or out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.flags.get_mut(index) {
            Some(flag) if *flag => {
                *flag = false;
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    /// Recount present flags and compare with the cached count.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        count_present(&self.flags) == self.remaining
    }
}
