//! Supply and session tests - generation, gravity, lockout, game over.

use gridfall::core::supply::ActionInput;
use gridfall::core::{GameSession, SupplyEvent, SupplyState};
use gridfall::types::{BoardConfig, GameAction, PieceKind, TICK_MS};

/// Table-backed input for driving sessions in tests.
#[derive(Debug, Default, Clone, Copy)]
struct TestInput {
    pressed: [bool; 6],
    just: [bool; 6],
}

impl TestInput {
    fn hold(action: GameAction) -> Self {
        let mut input = Self::default();
        input.pressed[action.index()] = true;
        input
    }

    fn tap(action: GameAction) -> Self {
        let mut input = Self::hold(action);
        input.just[action.index()] = true;
        input
    }
}

impl ActionInput for TestInput {
    fn is_pressed(&self, action: GameAction) -> bool {
        self.pressed[action.index()]
    }
    fn is_just_pressed(&self, action: GameAction) -> bool {
        self.just[action.index()]
    }
}

fn idle_ticks(session: &mut GameSession, n: usize) {
    for _ in 0..n {
        session.tick(TICK_MS, &TestInput::default());
    }
}

#[test]
fn test_first_tick_activates_supply() {
    let mut session = GameSession::new(BoardConfig::default(), 42);
    assert!(session.active_piece().is_none());

    session.tick(TICK_MS, &TestInput::default());
    assert_eq!(session.supply().state(), SupplyState::Active);
    assert!(session.active_piece().is_some());
}

#[test]
fn test_hard_drop_locks_with_single_event() {
    let mut session = GameSession::new(BoardConfig::default(), 42);
    session.tick(TICK_MS, &TestInput::tap(GameAction::HardDrop));

    assert_eq!(session.pop_event(), Some(SupplyEvent::PieceLocked));
    assert_eq!(session.pop_event(), None);
    assert_eq!(session.grid().occupied_count(), 4);
    assert!(session.active_piece().is_none());
}

#[test]
fn test_gravity_follows_configured_interval() {
    let config = BoardConfig {
        drop_interval_ms: 500,
        ..BoardConfig::default()
    };
    let mut session = GameSession::new(config, 42);
    session.tick(TICK_MS, &TestInput::default());
    let y0 = session.active_piece().unwrap().cells()[0].y;

    session.tick(500 - TICK_MS - 1, &TestInput::default());
    assert_eq!(session.active_piece().unwrap().cells()[0].y, y0);

    session.tick(1, &TestInput::default());
    assert_eq!(session.active_piece().unwrap().cells()[0].y, y0 + 1);
}

#[test]
fn test_held_key_is_throttled_by_lockout() {
    let mut session = GameSession::new(BoardConfig::default(), 42);
    let held = TestInput::hold(GameAction::MoveRight);

    session.tick(TICK_MS, &held);
    let x1 = session.active_piece().unwrap().cells()[0].x;

    // 70ms lockout swallows the next four 16ms ticks.
    for _ in 0..4 {
        session.tick(TICK_MS, &held);
        assert_eq!(session.active_piece().unwrap().cells()[0].x, x1);
    }
    session.tick(TICK_MS, &held);
    assert_eq!(session.active_piece().unwrap().cells()[0].x, x1 + 1);
}

#[test]
fn test_seven_bag_is_fair_across_two_bags() {
    let mut session = GameSession::new(BoardConfig::default(), 42);
    let mut kinds = Vec::new();

    while kinds.len() < 14 {
        idle_ticks(&mut session, 5);
        let kind = session.active_piece().expect("piece active").kind();
        kinds.push(kind);
        session.tick(TICK_MS, &TestInput::tap(GameAction::HardDrop));
        assert!(!session.game_over(), "board filled before two bags");
    }

    for window in kinds.chunks(7) {
        for kind in PieceKind::ALL {
            assert_eq!(
                window.iter().filter(|&&k| k == kind).count(),
                1,
                "{:?} not drawn exactly once in a bag",
                kind
            );
        }
    }
}

#[test]
fn test_blocked_spawn_ends_the_game() {
    let mut session = GameSession::new(BoardConfig::default(), 42);

    for _ in 0..200 {
        idle_ticks(&mut session, 5);
        if session.game_over() {
            break;
        }
        session.tick(TICK_MS, &TestInput::tap(GameAction::HardDrop));
    }

    assert!(session.game_over());
    let occupied = session.grid().occupied_count();

    // Dead sessions ignore input and gravity.
    session.tick(TICK_MS, &TestInput::tap(GameAction::HardDrop));
    idle_ticks(&mut session, 10);
    assert_eq!(session.grid().occupied_count(), occupied);
    assert!(session.active_piece().is_none());
}

#[test]
fn test_restart_is_a_fresh_session() {
    let config = BoardConfig::default();
    let mut session = GameSession::new(config, 42);
    session.tick(TICK_MS, &TestInput::tap(GameAction::HardDrop));
    assert!(session.grid().occupied_count() > 0);

    session = GameSession::new(config, 42);
    assert_eq!(session.grid().occupied_count(), 0);
    assert!(!session.game_over());
}
