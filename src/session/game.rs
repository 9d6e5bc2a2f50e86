//! The game session state machine.
//!
//! `GameSession` owns the configuration, phase, turn, pool, lock flag and
//! history, and is the only type collaborators talk to.
//!
//! ## Phases
//!
//! ```text
//! Config --start--> Playing --last item taken--> GameOver
//!   ^                 |  ^                          |
//!   +----go_home------+  +---------reset------------+
//!   +--------------------go_home--------------------+
//! ```
//!
//! ## Two-phase moves
//!
//! A move is accepted by `request_move` (human) or `request_ai_move`
//! (automated party). Both validate, lock the session and return a
//! `PendingMove`. Once the collaborator's strike effects have settled it
//! calls `complete_move`, which applies the move, records the snapshot,
//! resolves the game or passes the turn, and unlocks. While locked, moves,
//! previews, undo and redo are rejected.
//!
//! ## Errors
//!
//! Every operation returns `Err` without changing state or emitting events
//! when the intent is rejected.

use tracing::{debug, info, trace};

use crate::ai::{OptimalStrategy, Strategy};
use crate::core::{
    GameConfig, GameError, GameRng, Party, PartyMap, Phase, PoolState, RandomSource, SessionView, TimingConfig,
};
use crate::history::{HistoryManager, Snapshot};
use crate::rules::{GameResult, MoveEngine};

use super::events::{PendingMove, SessionEvent, SessionObserver};

/// What `complete_move` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game goes on with `next` to move.
    Continue { next: Party, remaining: u32 },
    /// The move emptied the pool.
    Finished(GameResult),
}

/// A single game session.
pub struct GameSession {
    config: GameConfig,
    timing: TimingConfig,
    phase: Phase,
    current_turn: Party,
    pool: PoolState,
    locked: bool,
    pending: Option<PendingMove>,
    history: HistoryManager,
    result: Option<GameResult>,
    strategy: Box<dyn Strategy>,
    rng: Box<dyn RandomSource>,
    observers: Vec<Box<dyn SessionObserver>>,
    events: Vec<SessionEvent>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameSession {
    /// Create a session in the `Config` phase.
    ///
    /// Uses the optimal strategy and an entropy-seeded RNG; see
    /// `with_strategy` and `with_seed`/`with_rng` to change either.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let pool = PoolState::full(config.pool_size());
        let rng = GameRng::from_entropy();
        debug!(seed = rng.seed(), "session rng seeded");
        Self {
            config,
            timing: TimingConfig::default(),
            phase: Phase::Config,
            current_turn: Party::Party1,
            pool,
            locked: false,
            pending: None,
            history: HistoryManager::new(),
            result: None,
            strategy: Box::new(OptimalStrategy),
            rng: Box::new(rng),
            observers: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Use different delay hints.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Use a different strategy for the automated party.
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl Strategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Use a deterministic RNG with the given seed.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(GameRng::new(seed))
    }

    /// Use a custom randomness source for stalling moves.
    #[must_use]
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Register a collaborator. From now on notifications go to observers
    /// only and are no longer queued for `drain_events`.
    pub fn add_observer(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Lifecycle ===

    /// Replace the configuration. Only accepted in the `Config` phase.
    ///
    /// Accepts raw `ConfigParams` (clamped) or a ready `GameConfig`.
    pub fn configure(&mut self, config: impl Into<GameConfig>) -> Result<(), GameError> {
        self.ensure_phase(&[Phase::Config])?;
        self.config = config.into();
        self.pool = PoolState::full(self.config.pool_size());
        debug!(
            pool_size = self.config.pool_size(),
            max_move = self.config.max_move(),
            mode = ?self.config.mode(),
            misere = self.config.misere(),
            "configured"
        );
        self.emit_state();
        Ok(())
    }

    /// Leave `Config` and begin a fresh game.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.ensure_phase(&[Phase::Config])?;
        info!(
            pool_size = self.config.pool_size(),
            max_move = self.config.max_move(),
            mode = ?self.config.mode(),
            misere = self.config.misere(),
            "game started"
        );
        self.begin_game();
        Ok(())
    }

    /// Restart with the same configuration. Accepted while playing and after
    /// the game is over; discards any pending move.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.ensure_phase(&[Phase::Playing, Phase::GameOver])?;
        info!(from = %self.phase, "game reset");
        self.begin_game();
        Ok(())
    }

    /// Abandon or leave the game and return to `Config`.
    pub fn go_home(&mut self) -> Result<(), GameError> {
        self.ensure_phase(&[Phase::Playing, Phase::GameOver])?;
        info!(from = %self.phase, "returned to configuration");
        self.phase = Phase::Config;
        self.current_turn = Party::Party1;
        self.pool = PoolState::full(self.config.pool_size());
        self.locked = false;
        self.pending = None;
        self.result = None;
        self.history.clear();
        self.emit_history();
        self.emit_state();
        Ok(())
    }

    fn begin_game(&mut self) {
        self.phase = Phase::Playing;
        self.current_turn = Party::Party1;
        self.pool = PoolState::full(self.config.pool_size());
        self.locked = false;
        self.pending = None;
        self.result = None;
        self.history
            .reset(Snapshot::new(self.pool.clone(), self.current_turn));
        self.emit_history();
        self.emit_state();
    }

    // === Moves ===

    /// Accept a human move of `count` items and lock until `complete_move`.
    pub fn request_move(&mut self, count: u32) -> Result<PendingMove, GameError> {
        self.ensure_human_turn()?;
        MoveEngine::validate(&self.pool, &self.config, count, self.current_turn)?;
        Ok(self.begin_move(count, false))
    }

    /// Let the automated party choose and accept its move.
    pub fn request_ai_move(&mut self) -> Result<PendingMove, GameError> {
        self.ensure_phase(&[Phase::Playing])?;
        self.ensure_unlocked()?;
        if !self.config.mode().is_automated(self.current_turn) {
            return Err(GameError::NotYourTurn(Party::Party2));
        }

        let remaining = self.pool.remaining();
        let choice = self
            .strategy
            .choose(remaining, &self.config, self.rng.as_mut());
        debug!(
            strategy = self.strategy.name(),
            remaining,
            count = choice.count,
            forcing = choice.forcing,
            "AI chose move"
        );
        MoveEngine::validate(&self.pool, &self.config, choice.count, self.current_turn)?;
        Ok(self.begin_move(choice.count, true))
    }

    fn begin_move(&mut self, count: u32, automated: bool) -> PendingMove {
        let mut settle_delay = self.timing.settle_delay(count);
        if automated {
            settle_delay += self.timing.ai_highlight;
        }
        let pending = PendingMove {
            mover: self.current_turn,
            count,
            indices: self.pool.front_indices(count),
            automated,
            settle_delay,
        };
        debug!(mover = %pending.mover, count, automated, "move accepted");

        self.locked = true;
        self.pending = Some(pending.clone());
        self.emit(SessionEvent::MoveStarted(pending.clone()));
        self.emit_history();
        self.emit_state();
        pending
    }

    /// Apply the pending move, record it, and unlock.
    pub fn complete_move(&mut self) -> Result<MoveOutcome, GameError> {
        let pending = self.pending.as_ref().ok_or(GameError::NoPendingMove)?;
        let next_pool = MoveEngine::apply(&self.pool, &pending.indices)?;
        let mover = pending.mover;
        let count = pending.count;

        self.pending = None;
        self.pool = next_pool;
        self.emit(SessionEvent::MoveCommitted { who: mover, count });

        if MoveEngine::is_terminal(&self.pool) {
            let result = GameResult::decide(mover, self.config.misere());
            self.history.commit(Snapshot::new(self.pool.clone(), mover));
            self.phase = Phase::GameOver;
            self.result = Some(result);
            self.locked = false;
            info!(
                winner = %result.winner,
                last_mover = %mover,
                misere = result.misere,
                "game over"
            );
            self.emit_history();
            self.emit(SessionEvent::GameOver(result));
            self.emit_state();
            return Ok(MoveOutcome::Finished(result));
        }

        self.current_turn = mover.other();
        self.history
            .commit(Snapshot::new(self.pool.clone(), self.current_turn));
        self.locked = false;
        debug!(
            mover = %mover,
            count,
            remaining = self.pool.remaining(),
            next = %self.current_turn,
            "move committed"
        );
        self.emit_history();
        self.emit_state();
        if self.awaiting_ai() {
            self.emit(SessionEvent::AiTurn {
                delay: self.timing.ai_think,
            });
        }

        Ok(MoveOutcome::Continue {
            next: self.current_turn,
            remaining: self.pool.remaining(),
        })
    }

    /// Request and immediately complete a human move.
    pub fn play_move(&mut self, count: u32) -> Result<MoveOutcome, GameError> {
        self.request_move(count)?;
        self.complete_move()
    }

    /// Request and immediately complete the automated party's move.
    pub fn play_ai_move(&mut self) -> Result<MoveOutcome, GameError> {
        self.request_ai_move()?;
        self.complete_move()
    }

    // === Selection ===

    /// Move size a hover on `index` stands for: the number of present items
    /// up to and including `index`. Does not change any state.
    pub fn preview_move(&self, index: usize) -> Result<u32, GameError> {
        self.ensure_human_turn()?;
        if index >= self.pool.len() {
            return Err(GameError::PreviewRejected { index });
        }
        let count = self.pool.present_through(index);
        if count == 0 || count > self.config.max_move() {
            trace!(index, count, "preview rejected");
            return Err(GameError::PreviewRejected { index });
        }
        trace!(index, count, "preview");
        Ok(count)
    }

    /// Click on `index`: preview it and request the resulting move.
    pub fn select(&mut self, index: usize) -> Result<PendingMove, GameError> {
        let count = self.preview_move(index)?;
        self.request_move(count)
    }

    // === History ===

    /// Step back one turn (two snapshots against the AI).
    pub fn undo(&mut self) -> Result<Snapshot, GameError> {
        self.ensure_history_guard()?;
        let snapshot = self
            .history
            .undo(self.config.mode())
            .ok_or(GameError::HistoryBoundary)?;
        self.restore(&snapshot);
        Ok(snapshot)
    }

    /// Step forward one turn (two snapshots against the AI).
    pub fn redo(&mut self) -> Result<Snapshot, GameError> {
        self.ensure_history_guard()?;
        let snapshot = self
            .history
            .redo(self.config.mode())
            .ok_or(GameError::HistoryBoundary)?;
        self.restore(&snapshot);
        Ok(snapshot)
    }

    /// Is undo available right now?
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history_guard_open() && self.history.can_undo(self.config.mode())
    }

    /// Is redo available right now?
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history_guard_open() && self.history.can_redo(self.config.mode())
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        self.pool = snapshot.pool.clone();
        self.current_turn = snapshot.current_turn;
        self.emit_history();
        self.emit_state();
    }

    // === Queries ===

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Delay hints handed to collaborators.
    #[must_use]
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Party to move, or the last mover once the game is over.
    #[must_use]
    pub fn current_turn(&self) -> Party {
        self.current_turn
    }

    /// Live pool.
    #[must_use]
    pub fn pool(&self) -> &PoolState {
        &self.pool
    }

    /// Items still present in the live pool.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.pool.remaining()
    }

    /// Is a move waiting for `complete_move`?
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The move waiting for `complete_move`, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    /// Undo/redo log.
    #[must_use]
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Result of the finished game, if any.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Present items a move may take right now.
    #[must_use]
    pub fn selectable_count(&self) -> u32 {
        match self.phase {
            Phase::Playing => self.config.move_cap(self.pool.remaining()),
            _ => 0,
        }
    }

    /// Is the session waiting for `request_ai_move`?
    #[must_use]
    pub fn awaiting_ai(&self) -> bool {
        self.phase == Phase::Playing
            && !self.locked
            && self.config.mode().is_automated(self.current_turn)
    }

    /// Render snapshot.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            mode: self.config.mode(),
            misere: self.config.misere(),
            current_turn: self.current_turn,
            names: PartyMap::new(|p| self.config.party_name(p).to_string()),
            pool: self.pool.clone(),
            selectable: self.selectable_count(),
            locked: self.locked,
            winner: self.result.map(|r| r.winner),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Take every event queued since the last drain.
    ///
    /// Events are queued only while no observer is registered.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // === Guards ===

    fn ensure_phase(&self, allowed: &[Phase]) -> Result<(), GameError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(GameError::WrongPhase(self.phase))
        }
    }

    fn ensure_unlocked(&self) -> Result<(), GameError> {
        if self.locked {
            Err(GameError::Locked)
        } else {
            Ok(())
        }
    }

    /// Playing, unlocked, and a human is to move.
    fn ensure_human_turn(&self) -> Result<(), GameError> {
        self.ensure_phase(&[Phase::Playing])?;
        self.ensure_unlocked()?;
        if self.config.mode().is_automated(self.current_turn) {
            return Err(GameError::NotYourTurn(self.current_turn));
        }
        Ok(())
    }

    fn ensure_history_guard(&self) -> Result<(), GameError> {
        self.ensure_human_turn()
    }

    fn history_guard_open(&self) -> bool {
        self.ensure_history_guard().is_ok()
    }

    // === Notifications ===

    fn emit(&mut self, event: SessionEvent) {
        if self.observers.is_empty() {
            self.events.push(event);
            return;
        }
        for observer in &mut self.observers {
            event.deliver(observer.as_mut());
        }
    }

    fn emit_state(&mut self) {
        let view = self.view();
        self.emit(SessionEvent::StateChanged(view));
    }

    fn emit_history(&mut self) {
        let event = SessionEvent::HistoryChanged {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        };
        self.emit(event);
    }
}
