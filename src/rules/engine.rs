//! Move validation, application and winner resolution.
//!
//! `MoveEngine` is stateless: every operation takes the pool it works on and
//! returns a result without touching anything else.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{GameConfig, GameError, GameMode, Party, PoolState, MIN_MOVE};

/// Sound/effect cue for the end of a game, from the human's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Victory,
    Defeat,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// The winning party.
    pub winner: Party,
    /// The party that took the last item.
    pub last_mover: Party,
    /// Whether misère rules decided the game.
    pub misere: bool,
}

impl GameResult {
    /// Resolve the result of a game whose last item was taken by `last_mover`.
    #[must_use]
    pub fn decide(last_mover: Party, misere: bool) -> Self {
        Self {
            winner: MoveEngine::resolve_winner(last_mover, misere),
            last_mover,
            misere,
        }
    }

    /// Check if a party won.
    #[must_use]
    pub fn is_winner(&self, party: Party) -> bool {
        self.winner == party
    }

    /// Victory or defeat cue. Against the AI the cue follows the human
    /// (`Party1`); with two humans someone always won.
    #[must_use]
    pub fn cue(&self, mode: GameMode) -> Cue {
        match mode {
            GameMode::Pvai if self.winner != Party::Party1 => Cue::Defeat,
            _ => Cue::Victory,
        }
    }
}

/// Stateless rules of the subtraction game.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveEngine;

impl MoveEngine {
    /// Check that `requested` is a legal move size for `turn_owner`.
    ///
    /// Legal sizes are `MIN_MOVE..=min(max_move, remaining)`. Callers usually
    /// pre-clamp through preview/selection, but the bound is always re-checked
    /// here.
    pub fn validate(
        pool: &PoolState,
        config: &GameConfig,
        requested: u32,
        turn_owner: Party,
    ) -> Result<(), GameError> {
        let max = config.move_cap(pool.remaining());
        if requested < MIN_MOVE || requested > max {
            trace!(%turn_owner, requested, max, "move size rejected");
            return Err(GameError::InvalidMoveSize { requested, max });
        }
        Ok(())
    }

    /// Remove `indices` from a copy of `pool`.
    ///
    /// Fails without applying anything if an index is out of range, already
    /// removed, or listed twice.
    pub fn apply(pool: &PoolState, indices: &[usize]) -> Result<PoolState, GameError> {
        let mut next = pool.clone();
        for &index in indices {
            if !next.remove(index) {
                return Err(GameError::ItemUnavailable { index });
            }
        }
        Ok(next)
    }

    /// The game ends when the pool is empty.
    #[must_use]
    pub fn is_terminal(pool: &PoolState) -> bool {
        pool.remaining() == 0
    }

    /// Normal play: the last mover wins. Misère: the last mover loses.
    #[must_use]
    pub fn resolve_winner(last_mover: Party, misere: bool) -> Party {
        if misere {
            last_mover.other()
        } else {
            last_mover
        }
    }
}
