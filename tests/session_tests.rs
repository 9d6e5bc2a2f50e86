//! Session integration tests: full games, AI turns, lifecycle, notifications.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use last_strike::{
    Cue, GameConfig, GameError, GameMode, GameResult, GameRng, GameSession, MoveOutcome, Party, Phase,
    RandomSource, SessionEvent, SessionObserver, TimingConfig,
};

fn pvai(pool_size: u32, max_move: u32, misere: bool) -> GameSession {
    let config = GameConfig::default()
        .with_mode(GameMode::Pvai)
        .with_pool_size(pool_size)
        .with_max_move(max_move)
        .with_misere(misere);
    let mut session = GameSession::new(config).with_seed(7);
    session.start().unwrap();
    session
}

fn pvp(pool_size: u32, max_move: u32, misere: bool) -> GameSession {
    let config = GameConfig::default()
        .with_mode(GameMode::Pvp)
        .with_pool_size(pool_size)
        .with_max_move(max_move)
        .with_misere(misere);
    let mut session = GameSession::new(config).with_seed(7);
    session.start().unwrap();
    session
}

/// Human plays a random legal move; the AI replies if the game goes on.
fn human_then_ai(session: &mut GameSession, rng: &mut GameRng) -> Option<GameResult> {
    let count = rng.pick_inclusive(1, session.selectable_count());
    match session.play_move(count).unwrap() {
        MoveOutcome::Finished(result) => return Some(result),
        MoveOutcome::Continue { next, .. } => assert_eq!(next, Party::Party2),
    }
    assert!(session.awaiting_ai());
    match session.play_ai_move().unwrap() {
        MoveOutcome::Finished(result) => Some(result),
        MoveOutcome::Continue { .. } => None,
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_pvai_undo_skips_ai_reply() {
    let mut session = pvai(30, 3, false);

    session.play_move(2).unwrap();
    assert_eq!(session.remaining(), 28);
    assert!(session.awaiting_ai());

    session.play_ai_move().unwrap();
    assert_eq!(session.current_turn(), Party::Party1);
    assert!(session.remaining() < 28);

    let snapshot = session.undo().unwrap();
    assert_eq!(snapshot.remaining(), 30);
    assert_eq!(session.remaining(), 30);
    assert_eq!(session.current_turn(), Party::Party1);
    assert_eq!(session.history().cursor(), 0);
}

#[test]
fn test_pvai_undo_blocked_during_ai_turn() {
    let mut session = pvai(30, 3, false);
    session.play_move(1).unwrap();

    assert_eq!(session.undo().unwrap_err(), GameError::NotYourTurn(Party::Party2));
    assert_eq!(session.request_move(1), Err(GameError::NotYourTurn(Party::Party2)));
    assert!(!session.can_undo());
}

#[test]
fn test_ai_takes_forcing_move() {
    // Human leaves 21: 21 mod 4 = 1, so the AI takes exactly one
    let mut session = pvai(22, 3, false);
    session.play_move(1).unwrap();
    let pending = session.request_ai_move().unwrap();
    assert_eq!(pending.count, 1);
    assert!(pending.automated);
    assert_eq!(session.complete_move().unwrap(), MoveOutcome::Continue {
        next: Party::Party1,
        remaining: 20,
    });
}

#[test]
fn test_optimal_ai_wins_from_losing_start_normal() {
    // 20 is a multiple of 4: the human moving first cannot win
    let mut human = GameRng::new(99);
    for _ in 0..25 {
        let mut session = pvai(20, 3, false);
        let result = loop {
            if let Some(result) = human_then_ai(&mut session, &mut human) {
                break result;
            }
        };
        assert_eq!(result.winner, Party::Party2);
        assert_eq!(result.cue(GameMode::Pvai), Cue::Defeat);
        assert_eq!(session.phase(), Phase::GameOver);
    }
}

#[test]
fn test_optimal_ai_wins_from_losing_start_misere() {
    // 21 ≡ 1 (mod 4): lost for the human under misère
    let mut human = GameRng::new(5);
    for _ in 0..25 {
        let mut session = pvai(21, 3, true);
        let result = loop {
            if let Some(result) = human_then_ai(&mut session, &mut human) {
                break result;
            }
        };
        assert_eq!(result.winner, Party::Party2);
        assert_eq!(result.last_mover, Party::Party1);
    }
}

#[test]
fn test_misere_forced_last_item_loses() {
    // Human takes 4 of 5, AI must take the last one
    let mut session = pvai(5, 4, true);
    session.play_move(4).unwrap();

    let pending = session.request_ai_move().unwrap();
    assert_eq!(pending.count, 1);

    match session.complete_move().unwrap() {
        MoveOutcome::Finished(result) => {
            assert_eq!(result.last_mover, Party::Party2);
            assert_eq!(result.winner, Party::Party1);
            assert_eq!(result.cue(GameMode::Pvai), Cue::Victory);
        }
        other => panic!("expected game over, got {:?}", other),
    }
    assert_eq!(session.result().map(|r| r.winner), Some(Party::Party1));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_game_over_freezes_controls() {
    let mut session = pvp(5, 3, false);
    session.play_move(2).unwrap();
    session.play_move(3).unwrap();

    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.result().unwrap().winner, Party::Party2);
    assert_eq!(session.request_move(1), Err(GameError::WrongPhase(Phase::GameOver)));
    assert_eq!(session.undo().unwrap_err(), GameError::WrongPhase(Phase::GameOver));
    assert_eq!(session.redo().unwrap_err(), GameError::WrongPhase(Phase::GameOver));
    assert!(!session.view().can_undo);
    // Terminal snapshot records the last mover
    assert_eq!(session.history().current().unwrap().current_turn, Party::Party2);
}

#[test]
fn test_reset_from_game_over() {
    let mut session = pvp(5, 3, false);
    session.play_move(2).unwrap();
    session.play_move(3).unwrap();
    assert_eq!(session.phase(), Phase::GameOver);

    session.reset().unwrap();
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.remaining(), 5);
    assert_eq!(session.current_turn(), Party::Party1);
    assert_eq!(session.history().len(), 1);
    assert!(session.result().is_none());
}

#[test]
fn test_reset_mid_game() {
    let mut session = pvp(10, 3, false);
    session.play_move(3).unwrap();
    session.play_move(3).unwrap();
    session.reset().unwrap();
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.remaining(), 10);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_go_home_then_reconfigure() {
    let mut session = pvp(10, 3, false);
    session.play_move(1).unwrap();
    session.go_home().unwrap();

    let config = GameConfig::default().with_pool_size(50).with_mode(GameMode::Pvp);
    session.configure(config).unwrap();
    session.start().unwrap();
    assert_eq!(session.remaining(), 50);
    assert_eq!(session.pool().len(), 50);
}

#[test]
fn test_oversized_request_is_noop() {
    let mut session = pvp(10, 3, false);
    session.play_move(3).unwrap();
    session.play_move(3).unwrap();
    session.play_move(3).unwrap();
    session.drain_events();

    // One left: cap is one
    assert_eq!(
        session.request_move(2),
        Err(GameError::InvalidMoveSize { requested: 2, max: 1 })
    );
    assert_eq!(session.remaining(), 1);
    assert_eq!(session.history().len(), 4);
    assert!(session.drain_events().is_empty());
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Clone, Default)]
struct Recorder {
    log: Rc<RefCell<Vec<String>>>,
}

impl SessionObserver for Recorder {
    fn on_move_committed(&mut self, who: Party, count: u32) {
        self.log.borrow_mut().push(format!("commit {} {}", who, count));
    }

    fn on_game_over(&mut self, result: &GameResult) {
        self.log.borrow_mut().push(format!("over {}", result.winner));
    }

    fn on_ai_turn(&mut self, delay: Duration) {
        self.log.borrow_mut().push(format!("ai {}", delay.as_millis()));
    }
}

#[test]
fn test_observer_sees_moves_and_ai_turns() {
    let recorder = Recorder::default();
    let log = recorder.log.clone();

    let config = GameConfig::default().with_pool_size(6).with_max_move(5);
    let mut session = GameSession::new(config).with_seed(3);
    session.add_observer(recorder);
    session.start().unwrap();

    session.play_move(1).unwrap();
    // 5 left, AI takes all five and wins
    session.play_ai_move().unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "commit Party 1 1".to_string(),
            "ai 500".to_string(),
            "commit Party 2 5".to_string(),
            "over Party 2".to_string(),
        ]
    );
}

#[test]
fn test_observed_session_queues_nothing() {
    let recorder = Recorder::default();
    let log = recorder.log.clone();

    let config = GameConfig::default()
        .with_mode(GameMode::Pvp)
        .with_pool_size(100)
        .with_max_move(2);
    let mut session = GameSession::new(config).with_seed(1);
    session.add_observer(recorder);
    session.start().unwrap();

    for _ in 0..50 {
        while session.phase() == Phase::Playing {
            session.play_move(session.selectable_count()).unwrap();
        }
        session.reset().unwrap();
    }

    assert_eq!(log.borrow().iter().filter(|line| line.starts_with("over")).count(), 50);
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_event_order_for_move() {
    let mut session = pvp(10, 3, false).with_timing(TimingConfig::instant());
    session.drain_events();

    session.request_move(2).unwrap();
    let started = session.drain_events();
    assert!(matches!(started[0], SessionEvent::MoveStarted(ref p) if p.count == 2));
    assert!(started.iter().any(|e| matches!(
        e,
        SessionEvent::HistoryChanged { can_undo: false, can_redo: false }
    )));
    assert!(matches!(started.last(), Some(SessionEvent::StateChanged(v)) if v.locked));

    session.complete_move().unwrap();
    let committed = session.drain_events();
    assert_eq!(committed[0], SessionEvent::MoveCommitted { who: Party::Party1, count: 2 });
    assert!(committed.contains(&SessionEvent::HistoryChanged { can_undo: true, can_redo: false }));
    assert!(matches!(committed.last(), Some(SessionEvent::StateChanged(v)) if !v.locked && v.remaining() == 8));
}

#[test]
fn test_game_over_event_emitted_once() {
    let mut session = pvp(5, 3, true);
    session.play_move(3).unwrap();
    session.play_move(2).unwrap();

    let over: Vec<_> = session
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            SessionEvent::GameOver(result) => Some(result),
            _ => None,
        })
        .collect();
    assert_eq!(over.len(), 1);
    // Party 2 took the last item under misère
    assert_eq!(over[0].winner, Party::Party1);
}

#[test]
fn test_ai_settle_includes_highlight() {
    let mut session = pvai(30, 3, false);
    session.play_move(1).unwrap();
    let pending = session.request_ai_move().unwrap();
    let timing = session.timing();
    assert_eq!(pending.settle_delay, timing.settle_delay(pending.count) + timing.ai_highlight);
}
