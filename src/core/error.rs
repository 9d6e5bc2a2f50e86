//! Error type shared by every engine operation.
//!
//! An `Err` from a session operation always means the intent was rejected
//! without mutating state or emitting notifications.

use super::player::Party;
use super::state::Phase;

/// Reasons an intent or engine call is rejected.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// Strictly validated configuration was out of bounds.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Requested move size outside `1..=max`.
    #[error("move of {requested} is outside 1..={max}")]
    InvalidMoveSize { requested: u32, max: u32 },

    /// An index handed to `apply` is out of range, already removed, or repeated.
    #[error("item {index} is not available in the pool")]
    ItemUnavailable { index: usize },

    /// Nothing to undo or redo.
    #[error("no snapshot to step to")]
    HistoryBoundary,

    /// The intent is not accepted in the current phase.
    #[error("intent not accepted during {0}")]
    WrongPhase(Phase),

    /// A previous move is still settling.
    #[error("a move is still settling")]
    Locked,

    /// The intent came from, or targets, the party that is not to move.
    #[error("{0} may not act now")]
    NotYourTurn(Party),

    /// `complete_move` without a preceding request.
    #[error("no move is pending")]
    NoPendingMove,

    /// Hover/selection position that maps to no legal move.
    #[error("position {index} does not map to a legal move")]
    PreviewRejected { index: usize },

    /// Loaded pool whose cached count disagrees with its flags.
    #[error("pool claims {remaining} remaining but has {present} present items")]
    InconsistentPool { remaining: u32, present: u32 },
}
