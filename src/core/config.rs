//! Game configuration types.
//!
//! - `ConfigParams`: raw, possibly out-of-range input from the presentation layer
//! - `GameConfig`: validated parameters, frozen while a game is running
//! - `TimingConfig`: delay hints for collaborators that animate moves
//!
//! Out-of-range input is never an error: `ConfigParams::resolve` clamps it
//! into bounds. Deserializing a `GameConfig` goes through `ConfigParams`, so
//! a `GameConfig` value is always within bounds.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::GameError;
use super::player::Party;

/// Smallest allowed pool.
pub const MIN_POOL_SIZE: u32 = 5;
/// Largest allowed pool.
pub const MAX_POOL_SIZE: u32 = 100;
/// Smallest allowed move cap.
pub const MIN_MAX_MOVE: u32 = 2;
/// Largest allowed move cap.
pub const MAX_MAX_MOVE: u32 = 10;
/// Every move removes at least this many items.
pub const MIN_MOVE: u32 = 1;

/// Pool size used when none is given.
pub const DEFAULT_POOL_SIZE: u32 = 30;
/// Move cap used when none is given.
pub const DEFAULT_MAX_MOVE: u32 = 3;

/// Who plays whom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans sharing the controls.
    Pvp,
    /// Human (`Party1`) against the automated opponent (`Party2`).
    #[default]
    Pvai,
}

impl GameMode {
    /// Is `party` played by the automated opponent in this mode?
    #[must_use]
    pub fn is_automated(self, party: Party) -> bool {
        self == GameMode::Pvai && party == Party::Party2
    }

    /// Default display name for a party in this mode.
    #[must_use]
    pub fn default_name(self, party: Party) -> &'static str {
        match (self, party) {
            (_, Party::Party1) => "PLAYER 1",
            (GameMode::Pvai, Party::Party2) => "AI",
            (GameMode::Pvp, Party::Party2) => "PLAYER 2",
        }
    }
}

/// Raw configuration input.
///
/// Every field is optional or defaulted; `resolve` produces a valid
/// `GameConfig` from whatever was supplied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigParams {
    /// Requested pool size. `None` means the default.
    pub pool_size: Option<i64>,
    /// Requested move cap. `None` means the default.
    pub max_move: Option<i64>,
    /// Two humans or human against the AI.
    pub mode: GameMode,
    /// Whoever takes the last item loses.
    pub misere: bool,
    /// Display name for `Party1`; trimmed and upper-cased, blank means default.
    pub party1_name: Option<String>,
    /// Display name for `Party2`; trimmed and upper-cased, blank means default.
    pub party2_name: Option<String>,
}

impl ConfigParams {
    /// Clamp and normalize into a `GameConfig`.
    #[must_use]
    pub fn resolve(&self) -> GameConfig {
        GameConfig {
            pool_size: clamp_logged(
                "pool_size",
                self.pool_size.unwrap_or(i64::from(DEFAULT_POOL_SIZE)),
                MIN_POOL_SIZE,
                MAX_POOL_SIZE,
            ),
            max_move: clamp_logged(
                "max_move",
                self.max_move.unwrap_or(i64::from(DEFAULT_MAX_MOVE)),
                MIN_MAX_MOVE,
                MAX_MAX_MOVE,
            ),
            mode: self.mode,
            misere: self.misere,
            party1_name: normalize_name(self.party1_name.as_deref()),
            party2_name: normalize_name(self.party2_name.as_deref()),
        }
    }
}

impl From<ConfigParams> for GameConfig {
    fn from(params: ConfigParams) -> Self {
        params.resolve()
    }
}

/// Validated game configuration.
///
/// Party names are stored only when explicitly given; `party_name` falls
/// back to the mode's default so switching modes keeps defaults sensible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigParams")]
pub struct GameConfig {
    pool_size: u32,
    max_move: u32,
    mode: GameMode,
    misere: bool,
    party1_name: Option<String>,
    party2_name: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            max_move: DEFAULT_MAX_MOVE,
            mode: GameMode::default(),
            misere: false,
            party1_name: None,
            party2_name: None,
        }
    }
}

impl GameConfig {
    /// Build a configuration, rejecting out-of-range values instead of clamping.
    pub fn try_new(pool_size: u32, max_move: u32, mode: GameMode, misere: bool) -> Result<Self, GameError> {
        if !(MIN_POOL_SIZE..=MAX_POOL_SIZE).contains(&pool_size) {
            return Err(GameError::InvalidConfiguration(format!(
                "pool size {pool_size} outside {MIN_POOL_SIZE}..={MAX_POOL_SIZE}"
            )));
        }
        if !(MIN_MAX_MOVE..=MAX_MAX_MOVE).contains(&max_move) {
            return Err(GameError::InvalidConfiguration(format!(
                "max move {max_move} outside {MIN_MAX_MOVE}..={MAX_MAX_MOVE}"
            )));
        }
        Ok(Self {
            pool_size,
            max_move,
            mode,
            misere,
            party1_name: None,
            party2_name: None,
        })
    }

    /// Set the pool size, clamped into bounds.
    #[must_use]
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = clamp_logged("pool_size", i64::from(pool_size), MIN_POOL_SIZE, MAX_POOL_SIZE);
        self
    }

    /// Set the move cap, clamped into bounds.
    #[must_use]
    pub fn with_max_move(mut self, max_move: u32) -> Self {
        self.max_move = clamp_logged("max_move", i64::from(max_move), MIN_MAX_MOVE, MAX_MAX_MOVE);
        self
    }

    /// Set the game mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable misère play.
    #[must_use]
    pub fn with_misere(mut self, misere: bool) -> Self {
        self.misere = misere;
        self
    }

    /// Set display names. Blank names fall back to the mode defaults.
    #[must_use]
    pub fn with_party_names(mut self, party1: &str, party2: &str) -> Self {
        self.party1_name = normalize_name(Some(party1));
        self.party2_name = normalize_name(Some(party2));
        self
    }

    /// Nudge the pool size by one step up or down, staying within bounds.
    pub fn step_pool_size(&mut self, up: bool) {
        self.pool_size = step(self.pool_size, up, MIN_POOL_SIZE, MAX_POOL_SIZE);
    }

    /// Nudge the move cap by one step up or down, staying within bounds.
    pub fn step_max_move(&mut self, up: bool) {
        self.max_move = step(self.max_move, up, MIN_MAX_MOVE, MAX_MAX_MOVE);
    }

    #[must_use]
    pub fn pool_size(&self) -> u32 {
        self.pool_size
    }

    #[must_use]
    pub fn max_move(&self) -> u32 {
        self.max_move
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn misere(&self) -> bool {
        self.misere
    }

    /// Display name of a party, upper-cased.
    #[must_use]
    pub fn party_name(&self, party: Party) -> &str {
        let explicit = match party {
            Party::Party1 => self.party1_name.as_deref(),
            Party::Party2 => self.party2_name.as_deref(),
        };
        explicit.unwrap_or_else(|| self.mode.default_name(party))
    }

    /// Largest legal move given `remaining` items.
    #[must_use]
    pub fn move_cap(&self, remaining: u32) -> u32 {
        self.max_move.min(remaining)
    }
}

/// Delay hints for collaborators that animate moves and drive the AI timer.
///
/// The engine never sleeps; these values are reported with pending moves
/// and AI-turn notifications so the presentation layer can schedule the
/// follow-up intents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Simulated thinking time before the AI move is requested.
    pub ai_think: Duration,
    /// Time the AI's choice stays highlighted before it is struck.
    pub ai_highlight: Duration,
    /// Fixed part of the settle time after a move is accepted.
    pub settle_base: Duration,
    /// Additional settle time per removed item.
    pub settle_per_item: Duration,
    /// Delay before a game-over overlay appears.
    pub game_over_overlay: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ai_think: Duration::from_millis(500),
            ai_highlight: Duration::from_millis(300),
            settle_base: Duration::from_millis(150),
            settle_per_item: Duration::from_millis(30),
            game_over_overlay: Duration::from_millis(600),
        }
    }
}

impl TimingConfig {
    /// No delays at all. Useful for headless drivers.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            ai_think: Duration::ZERO,
            ai_highlight: Duration::ZERO,
            settle_base: Duration::ZERO,
            settle_per_item: Duration::ZERO,
            game_over_overlay: Duration::ZERO,
        }
    }

    /// How long a move of `count` items takes to settle.
    #[must_use]
    pub fn settle_delay(&self, count: u32) -> Duration {
        self.settle_base + self.settle_per_item * count
    }
}

fn clamp_logged(field: &'static str, value: i64, min: u32, max: u32) -> u32 {
    let clamped = value.clamp(i64::from(min), i64::from(max));
    if clamped != value {
        warn!(field, requested = value, applied = clamped, "configuration value clamped");
    }
    // In range of u32 after the clamp above.
    clamped as u32
}

fn step(value: u32, up: bool, min: u32, max: u32) -> u32 {
    if up {
        (value + 1).min(max)
    } else {
        value.saturating_sub(1).max(min)
    }
}

fn normalize_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_uppercase)
}
