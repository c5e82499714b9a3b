//! Integration tests for the game loop through the public facade

use blockfall::core::{get_shape, spawn_x, GameState, ManualClock, SpawnOutcome, TickOutcome};
use blockfall::types::{CellEventCause, GameAction, GameEvent, BOARD_HEIGHT};

#[test]
fn test_new_game_is_ready_to_play() {
    let game = GameState::new(12345);
    let active = game.active();

    assert_eq!(active.y, 0);
    assert_eq!(active.x, spawn_x(active.shape.size()));
    assert_eq!(active.shape, get_shape(active.kind));
    assert_eq!(game.hold_piece(), None);
    assert!(game.can_hold());
    assert_eq!(game.score(), 0);
    assert!(game.board().is_empty());
}

#[test]
fn test_rejected_actions_change_nothing() {
    let mut game = GameState::new(12345);
    while game.try_move(-1, 0) {}
    let before = game.snapshot();

    assert!(!game.apply_action(GameAction::MoveLeft));
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.drain_events().count(), 0);
}

#[test]
fn test_hold_from_empty_then_second_hold_is_noop() {
    let mut game = GameState::new(2024);
    let first = game.active().kind;
    let queued = game.next_piece();

    assert!(game.apply_action(GameAction::Hold));
    assert_eq!(game.hold_piece(), Some(first));
    assert_eq!(game.active().kind, queued);
    assert!(!game.can_hold());

    let snap = game.snapshot();
    assert!(!game.apply_action(GameAction::Hold));
    assert_eq!(game.snapshot(), snap);
}

#[test]
fn test_hold_swap_places_incoming_piece_at_its_spawn() {
    let mut game = GameState::new(77);
    let held = game.active().kind;
    game.hold();
    game.hard_drop();
    assert!(game.can_hold());

    // Disturb the current piece before swapping it out.
    game.try_move(1, 0);
    game.try_move(0, 3);
    game.try_rotate();
    let outgoing = game.active().kind;

    assert!(game.hold());
    let active = game.active();
    assert_eq!(active.kind, held);
    assert_eq!(active.shape, get_shape(held));
    assert_eq!(active.x, spawn_x(held.shape_size()));
    assert_eq!(active.y, 0);
    assert_eq!(game.hold_piece(), Some(outgoing));
    assert!(!game.can_hold());
}

#[test]
fn test_game_over_on_blocked_spawn() {
    let mut game = GameState::new(4);
    for y in 0..4 {
        for x in 3..7 {
            game.board_mut().set(x, y, 1);
        }
    }
    game.drain_events().for_each(drop);
    let episode = game.episode_id();

    assert_eq!(game.spawn_piece(), SpawnOutcome::GameOver);

    assert!(game.board().is_empty());
    assert_eq!(game.score(), 0);
    assert_eq!(game.episode_id(), episode + 1);
    assert!(game.can_hold());
    let events: Vec<_> = game.drain_events().collect();
    assert_eq!(events, vec![GameEvent::ScoreChanged(0), GameEvent::GameOver]);

    // Still playable straight away.
    assert!(!game.active().collides(game.board()));
    assert!(game.apply_action(GameAction::SoftDrop));
}

#[test]
fn test_gravity_threshold() {
    let mut game = GameState::new(9);
    let y0 = game.active().y;

    assert_eq!(game.tick(400), TickOutcome::Idle);
    assert_eq!(game.tick(599), TickOutcome::Idle);
    assert_eq!(game.active().y, y0);
    assert_eq!(game.drop_timer_ms(), 999);

    assert_eq!(game.tick(1), TickOutcome::Fell);
    assert_eq!(game.active().y, y0 + 1);
    assert_eq!(game.drop_timer_ms(), 0);

    // A large step still moves only one row.
    assert_eq!(game.tick(5000), TickOutcome::Fell);
    assert_eq!(game.active().y, y0 + 2);
    assert_eq!(game.drop_timer_ms(), 0);
}

#[test]
fn test_scripted_session_with_manual_clock() {
    let mut game = GameState::new(31);
    let mut clock = ManualClock::new();
    let mut locks = 0;

    // Let gravity alone play the first piece down to the floor.
    for _ in 0..(BOARD_HEIGHT as usize + 2) {
        clock.advance(1000);
        if let TickOutcome::Locked(outcome) = game.advance(&mut clock) {
            assert!(!outcome.game_over);
            locks += 1;
            break;
        }
    }
    assert_eq!(locks, 1);
    assert!(!game.board().is_empty());
    assert_eq!(game.piece_id(), 2);

    let lock_cells = game
        .drain_events()
        .filter(|e| matches!(e, GameEvent::Cell(c) if c.cause == CellEventCause::Lock))
        .count();
    assert_eq!(lock_cells, 4);
}

#[test]
fn test_stacking_until_game_over_keeps_running() {
    let mut game = GameState::new(55);
    let mut game_overs = 0;

    // Dropping straight down in the middle tops out quickly.
    for _ in 0..200 {
        if game.hard_drop().game_over {
            game_overs += 1;
        }
    }

    assert!(game_overs > 0);
    assert_eq!(game.episode_id(), game_overs);
    assert!(!game.active().collides(game.board()));
}

#[test]
fn test_seeded_games_replay_identically() {
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];

    let play = || {
        let mut game = GameState::new(1234);
        for action in script {
            game.apply_action(action);
            game.tick(250);
        }
        (game.snapshot(), game.drain_events().collect::<Vec<_>>())
    };

    assert_eq!(play(), play());
}

#[test]
fn test_snapshot_previews_use_templates() {
    let mut game = GameState::new(8);
    game.try_rotate();
    let kind = game.active().kind;
    game.hold();

    let snap = game.snapshot();
    assert_eq!(snap.hold, Some(kind));
    assert_eq!(snap.hold_shape(), Some(get_shape(kind)));
    assert_eq!(snap.next_shape(), get_shape(snap.next));
    assert!(!snap.can_hold);
}
