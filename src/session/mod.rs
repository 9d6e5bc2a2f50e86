//! Game session: state machine, command dispatch, collaborator notifications.

pub mod events;
pub mod game;
pub mod intent;

pub use events::{PendingMove, SessionEvent, SessionObserver};
pub use game::{GameSession, MoveOutcome};
pub use intent::{Dispatched, Intent};
