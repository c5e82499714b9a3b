//! Piece tests: templates, rotation, spawn placement and the random catalog

use blockfall::core::{get_shape, spawn_x, PieceCatalog, Shape, Tetromino};
use blockfall::types::{Cell, PieceKind, BOARD_WIDTH};

fn rows(shape: &Shape) -> Vec<Vec<Cell>> {
    shape.rows().map(|r| r.to_vec()).collect()
}

// ============== Templates ==============

#[test]
fn test_template_matrices() {
    assert_eq!(
        rows(&get_shape(PieceKind::T)),
        vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 0, 0]]
    );
    assert_eq!(
        rows(&get_shape(PieceKind::I)),
        vec![
            vec![0, 0, 0, 0],
            vec![2, 2, 2, 2],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0]
        ]
    );
    assert_eq!(rows(&get_shape(PieceKind::O)), vec![vec![3, 3], vec![3, 3]]);
    assert_eq!(
        rows(&get_shape(PieceKind::L)),
        vec![vec![0, 4, 0], vec![0, 4, 0], vec![0, 4, 4]]
    );
    assert_eq!(
        rows(&get_shape(PieceKind::J)),
        vec![vec![0, 5, 0], vec![0, 5, 0], vec![5, 5, 0]]
    );
    assert_eq!(
        rows(&get_shape(PieceKind::S)),
        vec![vec![0, 6, 6], vec![6, 6, 0], vec![0, 0, 0]]
    );
    assert_eq!(
        rows(&get_shape(PieceKind::Z)),
        vec![vec![7, 7, 0], vec![0, 7, 7], vec![0, 0, 0]]
    );
}

#[test]
fn test_color_ids_round_trip_through_kind() {
    for kind in PieceKind::ALL {
        assert_eq!(PieceKind::from_color_id(kind.color_id()), Some(kind));
    }
    assert_eq!(PieceKind::from_color_id(0), None);
}

// ============== Rotation ==============

#[test]
fn test_l_rotation() {
    let once = get_shape(PieceKind::L).rotated_cw();
    assert_eq!(
        rows(&once),
        vec![vec![0, 0, 0], vec![4, 4, 4], vec![4, 0, 0]]
    );
}

#[test]
fn test_s_rotation() {
    let once = get_shape(PieceKind::S).rotated_cw();
    assert_eq!(
        rows(&once),
        vec![vec![0, 6, 0], vec![0, 6, 6], vec![0, 0, 6]]
    );
}

#[test]
fn test_o_rotation_is_identity() {
    let o = get_shape(PieceKind::O);
    assert_eq!(o.rotated_cw(), o);
}

#[test]
fn test_four_rotations_restore_every_template() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        let spun = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(spun, shape, "{kind:?}");
    }
}

#[test]
fn test_rotating_a_piece_leaves_the_template_alone() {
    let piece = Tetromino::new(PieceKind::T);
    let turned = piece.rotated();

    assert_ne!(turned.shape, piece.shape);
    assert_eq!(piece.shape, get_shape(PieceKind::T));
    assert_eq!((turned.x, turned.y), (piece.x, piece.y));
}

// ============== Spawn ==============

#[test]
fn test_spawn_columns() {
    let half = (BOARD_WIDTH / 2) as i8;
    assert_eq!(spawn_x(4), half - 2);
    assert_eq!(spawn_x(3), half - 1);
    assert_eq!(spawn_x(2), half - 1);

    for kind in PieceKind::ALL {
        let piece = Tetromino::new(kind);
        assert_eq!(piece.y, 0);
        assert_eq!(piece.x, spawn_x(kind.shape_size()), "{kind:?}");
    }
}

// ============== Catalog ==============

#[test]
fn test_catalog_is_reproducible_from_seed() {
    let mut a = PieceCatalog::new(99);
    let mut b = PieceCatalog::new(99);
    let seq_a: Vec<_> = (0..50).map(|_| a.random_piece()).collect();
    let seq_b: Vec<_> = (0..50).map(|_| b.random_piece()).collect();
    assert_eq!(seq_a, seq_b);
}

#[test]
fn test_catalog_draws_every_kind() {
    let mut catalog = PieceCatalog::new(5);
    let mut seen = [false; 7];
    for _ in 0..500 {
        let kind = catalog.random_piece();
        seen[kind.color_id() as usize - 1] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
