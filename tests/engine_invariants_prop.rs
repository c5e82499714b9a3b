//! Property tests for the rules engine.
//!
//! - Four clockwise rotations return any piece's matrix; O never changes.
//! - `Board::collides` agrees with the bounds/overlap definition for arbitrary boards.
//! - Random action rollouts keep the active piece legal and the score a multiple of 100.

use proptest::prelude::*;

use blockfall::core::{get_shape, Board, GameState, Shape};
use blockfall::types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL};

const ACTIONS: [GameAction; 6] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::Rotate,
    GameAction::HardDrop,
    GameAction::Hold,
];

fn piece_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn rotated(kind: PieceKind, turns: usize) -> Shape {
    (0..turns).fold(get_shape(kind), |s, _| s.rotated_cw())
}

/// Reference collision check written straight from the rules.
fn expected_collision(board: &Board, shape: &Shape, x: i8, y: i8) -> bool {
    let n = shape.size();
    for dy in 0..n {
        for dx in 0..n {
            if shape.get(dx, dy) == EMPTY_CELL {
                continue;
            }
            let px = x as i32 + dx as i32;
            let py = y as i32 + dy as i32;
            if px < 0 || px >= BOARD_WIDTH as i32 || py >= BOARD_HEIGHT as i32 {
                return true;
            }
            if py >= 0 && board.get(px as i8, py as i8) != Some(EMPTY_CELL) {
                return true;
            }
        }
    }
    false
}

proptest! {
    #[test]
    fn four_rotations_are_identity(kind in piece_kind(), start in 0usize..4) {
        let shape = rotated(kind, start);
        prop_assert_eq!(rotated(kind, start + 4), shape);
        prop_assert_eq!(shape.minos().count(), 4);
    }

    #[test]
    fn o_rotation_is_identity(turns in 0usize..8) {
        prop_assert_eq!(rotated(PieceKind::O, turns), get_shape(PieceKind::O));
    }

    #[test]
    fn collides_matches_definition(
        filled in prop::collection::vec(any::<bool>(), 200),
        kind in piece_kind(),
        turns in 0usize..4,
        x in -4i8..13,
        y in -4i8..22,
    ) {
        let mut board = Board::new();
        for (i, &on) in filled.iter().enumerate() {
            if on {
                let bx = (i % BOARD_WIDTH as usize) as i8;
                let by = (i / BOARD_WIDTH as usize) as i8;
                board.set(bx, by, 1);
            }
        }
        let shape = rotated(kind, turns);

        prop_assert_eq!(board.collides(&shape, x, y), expected_collision(&board, &shape, x, y));
    }

    #[test]
    fn rollouts_keep_the_active_piece_legal(
        seed in any::<u64>(),
        script in prop::collection::vec((0usize..ACTIONS.len(), 0u32..1500), 1..120),
    ) {
        let mut game = GameState::new(seed);

        for (action, elapsed) in script {
            game.apply_action(ACTIONS[action]);
            game.tick(elapsed);

            prop_assert!(!game.active().collides(game.board()));
            prop_assert_eq!(game.score() % 100, 0);
            prop_assert!(game.drop_timer_ms() < game.gravity_interval_ms());

            let ghost = game.ghost();
            prop_assert!(ghost.y >= game.active().y);
            prop_assert!(!ghost.collides(game.board()));
            prop_assert!(ghost.shifted(0, 1).collides(game.board()));
        }
    }
}
