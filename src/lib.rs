//! # last-strike
//!
//! Rules and state engine for a two-party subtraction game: players take
//! turns removing 1..=M items from a shared pool of N. In normal play the
//! party taking the last item wins; in misère play it loses. The second
//! party can be an automated opponent that plays perfectly.
//!
//! ## Design Principles
//!
//! 1. **One owned session**: all mutable game state lives in a single
//!    `GameSession` value. No globals.
//!
//! 2. **Intents in, events out**: collaborators (rendering, audio, effects)
//!    send discrete intents and react to notifications. They never reach
//!    into the session's state.
//!
//! 3. **Explicit two-phase moves**: a move is accepted and locks the
//!    session, then committed once its effects have settled. Timers live
//!    outside the engine.
//!
//! ## Modules
//!
//! - `core`: Parties, configuration, pool, phase, RNG, errors
//! - `rules`: Move validation, application, winner resolution
//! - `ai`: Closed-form optimal strategy
//! - `history`: Linear undo/redo log of snapshots
//! - `session`: The state machine, dispatch and notifications
//!
//! ## Example
//!
//! ```
//! use last_strike::{GameConfig, GameMode, GameSession, MoveOutcome, Party};
//!
//! let config = GameConfig::default()
//!     .with_mode(GameMode::Pvp)
//!     .with_pool_size(5)
//!     .with_max_move(3);
//! let mut session = GameSession::new(config).with_seed(42);
//! session.start().unwrap();
//!
//! session.play_move(1).unwrap();
//! let outcome = session.play_move(3).unwrap();
//! assert!(matches!(outcome, MoveOutcome::Continue { next: Party::Party1, remaining: 1 }));
//!
//! match session.play_move(1).unwrap() {
//!     MoveOutcome::Finished(result) => assert_eq!(result.winner, Party::Party1),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod core;
pub mod rules;
pub mod ai;
pub mod history;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConfigParams, GameConfig, GameMode, TimingConfig,
    GameError,
    Party, PartyMap,
    PoolState, MoveIndices,
    GameRng, RandomSource,
    Phase, SessionView,
};

pub use crate::rules::{Cue, GameResult, MoveEngine};

pub use crate::ai::{compute_move, is_losing_position, MoveChoice, OptimalStrategy, RandomStrategy, Strategy};

pub use crate::history::{HistoryManager, Snapshot};

pub use crate::session::{
    Dispatched, GameSession, Intent, MoveOutcome,
    PendingMove, SessionEvent, SessionObserver,
};
