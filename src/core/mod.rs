//! Core engine types: parties, configuration, pool, phase, RNG, errors.
//!
//! Everything here is a leaf: no module in `core` depends on the rules,
//! strategy, history or session layers.

pub mod config;
pub mod error;
pub mod player;
pub mod pool;
pub mod rng;
pub mod state;

pub use config::{
    ConfigParams, GameConfig, GameMode, TimingConfig, DEFAULT_MAX_MOVE, DEFAULT_POOL_SIZE, MAX_MAX_MOVE,
    MAX_POOL_SIZE, MIN_MAX_MOVE, MIN_MOVE, MIN_POOL_SIZE,
};
pub use error::GameError;
pub use player::{Party, PartyMap};
pub use pool::{MoveIndices, PoolState};
pub use rng::{GameRng, RandomSource};
pub use state::{Phase, SessionView};
