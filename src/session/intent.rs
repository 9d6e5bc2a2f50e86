//! Command dispatch.
//!
//! The presentation layer turns raw input (clicks, hovers, timers firing)
//! into `Intent`s and feeds them to `GameSession::dispatch` one at a time.
//! Each intent is handled to completion before the next.

use serde::{Deserialize, Serialize};

use crate::core::{ConfigParams, GameError};
use crate::history::Snapshot;

use super::events::PendingMove;
use super::game::{GameSession, MoveOutcome};

/// A discrete request from a collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Configure(ConfigParams),
    Start,
    Reset,
    GoHome,
    /// Human move of the given size.
    RequestMove(u32),
    /// Human click on an item position.
    Select(usize),
    /// Human hover over an item position.
    Preview(usize),
    /// The AI think timer fired.
    AiMove,
    /// The strike effects of the pending move finished.
    AnimationSettled,
    Undo,
    Redo,
}

/// What handling an intent produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// Lifecycle change; observe the emitted events for details.
    Done,
    /// A move was accepted and is settling.
    Pending(PendingMove),
    /// The pending move was committed.
    Committed(MoveOutcome),
    /// Move size for a hover.
    Preview(u32),
    /// Undo/redo restored this snapshot.
    Restored(Snapshot),
}

impl GameSession {
    /// Handle one intent.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Dispatched, GameError> {
        match intent {
            Intent::Configure(params) => self.configure(params).map(|()| Dispatched::Done),
            Intent::Start => self.start().map(|()| Dispatched::Done),
            Intent::Reset => self.reset().map(|()| Dispatched::Done),
            Intent::GoHome => self.go_home().map(|()| Dispatched::Done),
            Intent::RequestMove(count) => self.request_move(count).map(Dispatched::Pending),
            Intent::Select(index) => self.select(index).map(Dispatched::Pending),
            Intent::Preview(index) => self.preview_move(index).map(Dispatched::Preview),
            Intent::AiMove => self.request_ai_move().map(Dispatched::Pending),
            Intent::AnimationSettled => self.complete_move().map(Dispatched::Committed),
            Intent::Undo => self.undo().map(Dispatched::Restored),
            Intent::Redo => self.redo().map(Dispatched::Restored),
        }
    }
}
