//! Session phase and the render snapshot handed to collaborators.
//!
//! ## Phase
//!
//! Exactly one phase is active at a time:
//! `Config` → `Playing` → `GameOver` → `Config`.
//!
//! ## SessionView
//!
//! Everything the presentation layer needs to draw one frame. Views are
//! plain data: rendering never calls back into the session.

use serde::{Deserialize, Serialize};

use super::config::GameMode;
use super::player::{Party, PartyMap};
use super::pool::PoolState;

/// Top-level session phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Parameters are being chosen. Initial phase.
    #[default]
    Config,
    /// A game is in progress.
    Playing,
    /// The pool is empty and a winner is known.
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Config => write!(f, "config"),
            Phase::Playing => write!(f, "playing"),
            Phase::GameOver => write!(f, "game over"),
        }
    }
}

/// Render snapshot of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: Phase,
    pub mode: GameMode,
    pub misere: bool,
    /// Party to move (or the last mover once the game is over).
    pub current_turn: Party,
    /// Display names of both parties.
    pub names: PartyMap<String>,
    pub pool: PoolState,
    /// Present items at the front of the pool that a move may take.
    /// Items past this prefix are drawn locked.
    pub selectable: u32,
    /// A move is settling; controls are disabled.
    pub locked: bool,
    pub winner: Option<Party>,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl SessionView {
    /// Items still present.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.pool.remaining()
    }

    /// Display name of the party to move.
    #[must_use]
    pub fn current_name(&self) -> &str {
        &self.names[self.current_turn]
    }
}
