//! Notifications from the session to its collaborators.
//!
//! Collaborators (renderer, audio, effects, control enablement) never call
//! back into the session while handling a notification; they schedule
//! follow-up intents instead. Notifications are delivered to each
//! registered `SessionObserver`; a session without observers queues them as
//! `SessionEvent`s to be drained instead.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{MoveIndices, Party, SessionView};
use crate::rules::GameResult;

/// A move that has been accepted and is waiting for its effects to settle.
///
/// The session stays locked until `complete_move` is called, normally after
/// `settle_delay` has elapsed on the collaborator's clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMove {
    /// Party making the move.
    pub mover: Party,
    /// Items the move takes.
    pub count: u32,
    /// Items the move strikes, lowest index first.
    pub indices: MoveIndices,
    /// Chosen by the automated opponent.
    pub automated: bool,
    /// How long the strike effects take before `complete_move`.
    pub settle_delay: Duration,
}

/// Something collaborators may want to react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Anything visible changed; re-render from the view.
    StateChanged(SessionView),
    /// A move was accepted and the session locked. Start the strike effects.
    MoveStarted(PendingMove),
    /// A move was applied and recorded.
    MoveCommitted { who: Party, count: u32 },
    /// The pool is empty.
    GameOver(GameResult),
    /// Undo/redo availability, for enabling controls.
    HistoryChanged { can_undo: bool, can_redo: bool },
    /// The automated party is to move; request its move after `delay`.
    AiTurn { delay: Duration },
}

impl SessionEvent {
    /// Route this event to the matching observer callback.
    pub fn deliver(&self, observer: &mut dyn SessionObserver) {
        match self {
            SessionEvent::StateChanged(view) => observer.on_state_changed(view),
            SessionEvent::MoveStarted(pending) => observer.on_move_started(pending),
            SessionEvent::MoveCommitted { who, count } => observer.on_move_committed(*who, *count),
            SessionEvent::GameOver(result) => observer.on_game_over(result),
            SessionEvent::HistoryChanged { can_undo, can_redo } => {
                observer.on_history_changed(*can_undo, *can_redo)
            }
            SessionEvent::AiTurn { delay } => observer.on_ai_turn(*delay),
        }
    }
}

/// Collaborator hooks. Every method defaults to doing nothing.
pub trait SessionObserver {
    fn on_state_changed(&mut self, _view: &SessionView) {}

    fn on_move_started(&mut self, _pending: &PendingMove) {}

    fn on_move_committed(&mut self, _who: Party, _count: u32) {}

    fn on_game_over(&mut self, _result: &GameResult) {}

    fn on_history_changed(&mut self, _can_undo: bool, _can_redo: bool) {}

    fn on_ai_turn(&mut self, _delay: Duration) {}
}
