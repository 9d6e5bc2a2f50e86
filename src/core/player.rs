//! Party identification and per-party data storage.
//!
//! ## Party
//!
//! The game always has exactly two parties. `Party1` always moves first;
//! in human-vs-AI mode `Party2` is the automated opponent.
//!
//! ## PartyMap
//!
//! Fixed two-slot storage indexed by `Party` for O(1) access.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two parties in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    /// The party that moves first. Always human.
    Party1,
    /// The second party. The automated opponent in human-vs-AI mode.
    Party2,
}

impl Party {
    /// Both parties in turn order.
    pub const ALL: [Party; 2] = [Party::Party1, Party::Party2];

    /// The opposing party.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Party::Party1 => Party::Party2,
            Party::Party2 => Party::Party1,
        }
    }

    /// Slot index (0 for `Party1`, 1 for `Party2`).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Party::Party1 => 0,
            Party::Party2 => 1,
        }
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Party::Party1 => write!(f, "Party 1"),
            Party::Party2 => write!(f, "Party 2"),
        }
    }
}

/// Per-party data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use last_strike::core::{Party, PartyMap};
///
/// let mut names = PartyMap::new(|p| format!("{}", p));
/// assert_eq!(names[Party::Party2], "Party 2");
///
/// names[Party::Party1] = "ALICE".to_string();
/// assert_eq!(names[Party::Party1], "ALICE");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyMap<T> {
    data: [T; 2],
}

impl<T> PartyMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Party) -> T) -> Self {
        Self {
            data: [factory(Party::Party1), factory(Party::Party2)],
        }
    }

    /// Create a map from explicit values for each party.
    pub fn from_pair(party1: T, party2: T) -> Self {
        Self {
            data: [party1, party2],
        }
    }

    /// Get a reference to a party's data.
    #[must_use]
    pub fn get(&self, party: Party) -> &T {
        &self.data[party.index()]
    }

    /// Get a mutable reference to a party's data.
    pub fn get_mut(&mut self, party: Party) -> &mut T {
        &mut self.data[party.index()]
    }

    /// Iterate over (Party, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Party, &T)> {
        Party::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Party> for PartyMap<T> {
    type Output = T;

    fn index(&self, party: Party) -> &Self::Output {
        self.get(party)
    }
}

impl<T> IndexMut<Party> for PartyMap<T> {
    fn index_mut(&mut self, party: Party) -> &mut Self::Output {
        self.get_mut(party)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_other() {
        assert_eq!(Party::Party1.other(), Party::Party2);
        assert_eq!(Party::Party2.other(), Party::Party1);
        assert_eq!(Party::Party1.other().other(), Party::Party1);
    }

    #[test]
    fn test_party_display() {
        assert_eq!(format!("{}", Party::Party1), "Party 1");
        assert_eq!(format!("{}", Party::Party2), "Party 2");
    }

    #[test]
    fn test_party_map_indexing() {
        let mut map = PartyMap::from_pair(1, 2);
        assert_eq!(map[Party::Party1], 1);
        assert_eq!(map[Party::Party2], 2);

        map[Party::Party2] = 20;
        assert_eq!(map[Party::Party2], 20);
    }

    #[test]
    fn test_party_map_iter_order() {
        let map = PartyMap::new(|p| p.index());
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Party::Party1, &0), (Party::Party2, &1)]);
    }

    #[test]
    fn test_party_map_serialization() {
        let map = PartyMap::from_pair("A".to_string(), "B".to_string());
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PartyMap<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
