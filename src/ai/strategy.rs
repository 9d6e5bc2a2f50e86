//! Move selection for the automated opponent.
//!
//! The subtraction game has a closed-form solution, so there is no search:
//!
//! - Normal play: positions with `remaining ≡ 0 (mod max_move + 1)` are lost
//!   for the player to move.
//! - Misère play: positions with `remaining ≡ 1 (mod max_move + 1)` are lost
//!   for the player to move.
//!
//! `OptimalStrategy` always moves into such a position when one is reachable
//! and otherwise stalls with a uniformly random legal move.

use tracing::debug;

use crate::core::{GameConfig, RandomSource, MIN_MOVE};

// =============================================================================
// Closed form
// =============================================================================

/// A chosen move and whether it forces a win.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveChoice {
    /// Items to remove.
    pub count: u32,
    /// `true` if the move leaves the opponent in a lost position.
    /// `false` for stalling moves and the forced misère last move.
    pub forcing: bool,
}

/// Is `remaining` a lost position for the player to move?
#[must_use]
pub fn is_losing_position(remaining: u32, max_move: u32, misere: bool) -> bool {
    let modulus = max_move + 1;
    if misere {
        remaining % modulus == 1
    } else {
        remaining % modulus == 0
    }
}

/// Optimal move with the forcing flag.
///
/// Returns a zero-count choice when `remaining` is zero.
pub fn choose_optimal<R: RandomSource + ?Sized>(
    remaining: u32,
    max_move: u32,
    misere: bool,
    rng: &mut R,
) -> MoveChoice {
    if remaining == 0 {
        return MoveChoice { count: 0, forcing: false };
    }

    let modulus = max_move + 1;

    if misere && remaining == 1 {
        // Forced, and it loses
        return MoveChoice { count: 1, forcing: false };
    }

    let target = if misere {
        (remaining - 1) % modulus
    } else {
        remaining % modulus
    };

    if target == 0 {
        let count = rng.pick_inclusive(MIN_MOVE, remaining.min(max_move));
        debug!(remaining, max_move, misere, count, "no forcing move, stalling");
        MoveChoice { count, forcing: false }
    } else {
        MoveChoice { count: target, forcing: true }
    }
}

/// Number of items an optimal player removes from `remaining`.
///
/// Deterministic except for stalling moves, which draw from `rng`.
///
/// ```
/// use last_strike::ai::compute_move;
/// use last_strike::core::GameRng;
///
/// let mut rng = GameRng::new(0);
/// // 21 mod 4 = 1: take one, leave a multiple of four
/// assert_eq!(compute_move(21, 3, false, &mut rng), 1);
/// ```
pub fn compute_move<R: RandomSource + ?Sized>(remaining: u32, max_move: u32, misere: bool, rng: &mut R) -> u32 {
    choose_optimal(remaining, max_move, misere, rng).count
}

// =============================================================================
// Strategy trait
// =============================================================================

/// How the automated party picks its move.
pub trait Strategy {
    /// Choose a move from `remaining` items under `config`.
    ///
    /// Must return a count in `1..=min(max_move, remaining)` when
    /// `remaining > 0`.
    fn choose(&self, remaining: u32, config: &GameConfig, rng: &mut dyn RandomSource) -> MoveChoice;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Perfect play via the closed form.
#[derive(Clone, Copy, Debug, Default)]
pub struct OptimalStrategy;

impl Strategy for OptimalStrategy {
    fn choose(&self, remaining: u32, config: &GameConfig, rng: &mut dyn RandomSource) -> MoveChoice {
        choose_optimal(remaining, config.max_move(), config.misere(), rng)
    }

    fn name(&self) -> &'static str {
        "optimal"
    }
}

/// Uniformly random legal move. A beatable opponent and a test baseline.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn choose(&self, remaining: u32, config: &GameConfig, rng: &mut dyn RandomSource) -> MoveChoice {
        let cap = config.move_cap(remaining);
        if cap == 0 {
            return MoveChoice { count: 0, forcing: false };
        }
        let count = rng.pick_inclusive(MIN_MOVE, cap);
        let forcing = is_losing_position(remaining - count, config.max_move(), config.misere());
        MoveChoice { count, forcing }
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub that records calls and always answers `low`.
    struct CountingSource {
        calls: u32,
    }

    impl RandomSource for CountingSource {
        fn pick_inclusive(&mut self, low: u32, high: u32) -> u32 {
            assert!(low <= high);
            self.calls += 1;
            low
        }
    }

    #[test]
    fn test_normal_forcing_move() {
        let mut rng = CountingSource { calls: 0 };
        assert_eq!(compute_move(21, 3, false, &mut rng), 1);
        assert_eq!(compute_move(7, 3, false, &mut rng), 3);
        assert_eq!(compute_move(2, 3, false, &mut rng), 2);
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn test_normal_stall_uses_rng() {
        let mut rng = CountingSource { calls: 0 };
        let choice = choose_optimal(20, 3, false, &mut rng);
        assert!(!choice.forcing);
        assert_eq!(choice.count, 1);
        assert_eq!(rng.calls, 1);
    }

    #[test]
    fn test_misere_forcing_move() {
        let mut rng = CountingSource { calls: 0 };
        // (22 - 1) mod 4 = 1
        assert_eq!(compute_move(22, 3, true, &mut rng), 1);
        // (4 - 1) mod 4 = 3, leaves the last item to the opponent
        assert_eq!(compute_move(4, 3, true, &mut rng), 3);
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn test_misere_stall_uses_rng() {
        let mut rng = CountingSource { calls: 0 };
        let choice = choose_optimal(21, 3, true, &mut rng);
        assert!(!choice.forcing);
        assert_eq!(rng.calls, 1);
    }

    #[test]
    fn test_misere_single_item_is_forced() {
        let mut rng = CountingSource { calls: 0 };
        let choice = choose_optimal(1, 3, true, &mut rng);
        assert_eq!(choice, MoveChoice { count: 1, forcing: false });
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn test_empty_pool_yields_zero() {
        let mut rng = CountingSource { calls: 0 };
        assert_eq!(compute_move(0, 3, false, &mut rng), 0);
        assert_eq!(compute_move(0, 3, true, &mut rng), 0);
    }

    #[test]
    fn test_losing_positions() {
        assert!(is_losing_position(0, 3, false));
        assert!(is_losing_position(8, 3, false));
        assert!(!is_losing_position(9, 3, false));
        assert!(is_losing_position(1, 3, true));
        assert!(is_losing_position(9, 3, true));
        assert!(!is_losing_position(8, 3, true));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(OptimalStrategy.name(), "optimal");
        assert_eq!(RandomStrategy.name(), "random");
    }

    #[test]
    fn test_random_strategy_legal() {
        let config = GameConfig::default().with_max_move(4);
        let mut rng = crate::core::GameRng::new(3);
        for remaining in 1..=20 {
            let choice = RandomStrategy.choose(remaining, &config, &mut rng);
            assert!(choice.count >= 1 && choice.count <= config.move_cap(remaining));
        }
    }
}
