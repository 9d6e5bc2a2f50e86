//! Automated opponent.
//!
//! - `compute_move` / `choose_optimal`: the closed-form optimal move
//! - `Strategy`: trait the session uses to ask for a move
//! - `OptimalStrategy`, `RandomStrategy`: the two built-in players

pub mod strategy;

pub use strategy::{
    choose_optimal, compute_move, is_losing_position, MoveChoice, OptimalStrategy, RandomStrategy, Strategy,
};
