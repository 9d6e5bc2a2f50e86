//! Rules of the subtraction game.
//!
//! - Legal move sizes
//! - How a move changes the pool
//! - Terminal condition and winner (normal or misère play)

pub mod engine;

pub use engine::{Cue, GameResult, MoveEngine};
