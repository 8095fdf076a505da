//! Integration tests for the engine driven through its public surface

use blockfall::core::{CoreEvent, EngineConfig, GameState, RotateOutcome};
use blockfall::input::InputHandler;
use blockfall::types::{Cell, GameAction, HeldInputs, PieceKind, GRAVITY_INTERVAL_MS, TICK_MS};
use crossterm::event::KeyCode;

fn held(action: GameAction) -> HeldInputs {
    let mut inputs = HeldInputs::default();
    inputs.set(action, true);
    inputs
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert!(!state.started());
    assert!(state.active().is_none());

    state.start(0);
    assert!(state.started());
    let active = state.active().unwrap();
    assert_eq!((active.x, active.y), (7, 0));
    assert!(state.next_piece().is_some());
    assert_eq!(state.score(), 0);
    assert_eq!(state.games_played(), 0);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(99);
    let mut b = GameState::new(99);
    a.start(0);
    b.start(0);

    for tick in 1..200u64 {
        let inputs = held(GameAction::ALL[(tick % 4) as usize]);
        assert_eq!(a.tick(tick * TICK_MS, inputs), b.tick(tick * TICK_MS, inputs));
        assert_eq!(a.active(), b.active());
    }
    assert_eq!(a.board(), b.board());
}

#[test]
fn test_gravity_moves_piece_down_once_per_interval() {
    let mut state = GameState::new(1);
    state.start(0);
    let y0 = state.active().unwrap().y;

    let mut now = 0;
    while now < GRAVITY_INTERVAL_MS * 3 {
        now += TICK_MS;
        state.tick(now, HeldInputs::default());
    }

    assert_eq!(state.active().unwrap().y, y0 + 3);
}

#[test]
fn test_hard_drop_through_tick_locks_at_floor() {
    let mut state = GameState::new(5);
    state.start(0);
    let piece = state.active().unwrap();

    let report = state.tick(TICK_MS, held(GameAction::HardDrop));

    assert!(report.hard_dropped);
    assert_eq!(state.board().occupied_count(), 4);
    assert!(state.board().is_row_occupied(15));
    for (x, _) in piece.cells() {
        assert!((0..16).contains(&x));
    }
    assert_eq!(
        state.take_last_event(),
        Some(CoreEvent::Locked { rows_cleared: 0 })
    );
}

#[test]
fn test_actions_without_debounce_fire_every_call() {
    let mut state = GameState::with_config(EngineConfig::without_debounce(), 3);
    state.start(0);
    let x0 = state.active().unwrap().x;

    assert!(state.move_left(0));
    assert!(state.move_left(0));
    assert!(state.move_right(0));
    assert_eq!(state.active().unwrap().x, x0 - 1);
}

#[test]
fn test_debounced_move_left_within_window_moves_once() {
    let mut state = GameState::new(3);
    state.start(0);
    let x0 = state.active().unwrap().x;

    state.move_left(1000);
    state.move_left(1010);

    assert_eq!(state.active().unwrap().x, x0 - 1);
}

#[test]
fn test_stack_to_top_triggers_reset() {
    let mut state = GameState::with_config(EngineConfig::without_debounce(), 7);
    state.start(0);

    // Drop every piece straight down the spawn column until the stack tops out.
    let mut game_over_at = None;
    for tick in 1..200u64 {
        let report = state.tick(tick, held(GameAction::HardDrop));
        if report.game_over {
            game_over_at = Some(tick);
            break;
        }
    }

    assert!(game_over_at.is_some(), "stack never reached the top");
    assert_eq!(state.games_played(), 1);
    assert_eq!(state.score(), 0);
    assert_eq!(state.board().occupied_count(), 0);
    assert!(matches!(
        state.take_last_event(),
        Some(CoreEvent::GameOver { .. })
    ));
    // Play continues with a fresh piece.
    assert!(state.active().is_some());
}

#[test]
fn test_rotate_reports_outcome() {
    let mut state = GameState::with_config(EngineConfig::without_debounce(), 11);
    state.start(0);

    let kind = state.active().unwrap().kind;
    let outcome = state.rotate(0).unwrap();
    let expected = match kind {
        PieceKind::O | PieceKind::L | PieceKind::J => RotateOutcome::Corrected,
        _ => RotateOutcome::Rotated,
    };
    assert_eq!(outcome, expected);
}

#[test]
fn test_snapshot_matches_accessors() {
    let mut state = GameState::new(21);
    state.start(0);
    state.tick(TICK_MS, held(GameAction::HardDrop));

    let snap = state.snapshot();
    assert_eq!(snap.board, state.board().rows());
    assert_eq!(snap.next.map(|n| n.kind), state.next_piece());
    assert_eq!(snap.active.map(|a| (a.x, a.y)), state.active().map(|a| (a.x, a.y)));
    assert_eq!(
        snap.board.iter().flatten().filter(|c| **c != Cell::Empty).count(),
        4
    );
}

#[test]
fn test_input_handler_feeds_tick() {
    let mut input = InputHandler::new();
    let mut state = GameState::new(8);
    state.start(0);
    let x0 = state.active().unwrap().x;

    input.handle_key_press(KeyCode::Left, 40);
    let report = state.tick(50, input.sample(50));
    assert!(report.moved);
    assert_eq!(state.active().unwrap().x, x0 - 1);

    // No further presses: the key times out and nothing moves.
    let report = state.tick(400, input.sample(400));
    assert!(!report.moved);
    assert_eq!(state.active().unwrap().x, x0 - 1);
}
