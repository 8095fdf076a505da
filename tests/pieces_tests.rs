//! Pieces module tests - catalog and bounding-box rotation

use blockfall::core::pieces::{get_color, get_shape, rotate_shape, try_rotate, RotateKind, CATALOG};
use blockfall::types::{PieceKind, Rgb};

// ============== Catalog Tests ==============

#[test]
fn test_catalog_shapes() {
    assert_eq!(get_shape(PieceKind::O), [(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert_eq!(get_shape(PieceKind::I), [(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(get_shape(PieceKind::S), [(1, 0), (2, 0), (0, 1), (1, 1)]);
    assert_eq!(get_shape(PieceKind::Z), [(0, 0), (1, 0), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::L), [(0, 0), (0, 1), (0, 2), (1, 2)]);
    assert_eq!(get_shape(PieceKind::J), [(1, 0), (1, 1), (1, 2), (0, 2)]);
    assert_eq!(get_shape(PieceKind::T), [(0, 0), (1, 0), (2, 0), (1, 1)]);
}

#[test]
fn test_catalog_colors() {
    assert_eq!(get_color(PieceKind::O), Rgb::new(255, 255, 0));
    assert_eq!(get_color(PieceKind::I), Rgb::new(0, 255, 255));
    assert_eq!(get_color(PieceKind::S), Rgb::new(0, 255, 0));
    assert_eq!(get_color(PieceKind::Z), Rgb::new(255, 0, 0));
    assert_eq!(get_color(PieceKind::L), Rgb::new(255, 165, 0));
    assert_eq!(get_color(PieceKind::J), Rgb::new(0, 0, 255));
    assert_eq!(get_color(PieceKind::T), Rgb::new(128, 0, 128));
}

#[test]
fn test_catalog_has_seven_entries_in_kind_order() {
    assert_eq!(CATALOG.len(), 7);
    for (entry, kind) in CATALOG.iter().zip(PieceKind::ALL) {
        assert_eq!(entry.kind, kind);
    }
}

// ============== Rotation Tests ==============

#[test]
fn test_rotate_i_becomes_vertical() {
    assert_eq!(
        rotate_shape(&get_shape(PieceKind::I)),
        [(1, -1), (1, 0), (1, 1), (1, 2)]
    );
}

#[test]
fn test_rotate_l_needs_left_correction() {
    let rotated = rotate_shape(&get_shape(PieceKind::L));
    assert_eq!(rotated, [(1, 1), (0, 1), (-1, 1), (-1, 2)]);

    let open = |_x: i8, _y: i8| false;
    let (shape, kind) = try_rotate(&get_shape(PieceKind::L), 5, 5, open).unwrap();
    assert_eq!(kind, RotateKind::Corrected);
    assert_eq!(shape, [(2, 1), (1, 1), (0, 1), (0, 2)]);
}

#[test]
fn test_rotation_is_checked_before_correction() {
    // Left wall at x < 0: the uncorrected L at x=0 reaches x=-1.
    let walls = |x: i8, _y: i8| !(0..16).contains(&x);
    assert!(try_rotate(&get_shape(PieceKind::L), 0, 5, walls).is_none());
    assert!(try_rotate(&get_shape(PieceKind::L), 1, 5, walls).is_some());
}

#[test]
fn test_no_right_wall_correction() {
    let walls = |x: i8, _y: i8| !(0..16).contains(&x);
    let vertical_i = [(1, -1), (1, 0), (1, 1), (1, 2)];
    assert!(try_rotate(&vertical_i, 14, 5, walls).is_none());
    assert!(try_rotate(&vertical_i, 12, 5, walls).is_some());
}

#[test]
fn test_four_rotations_restore_every_shape() {
    let open = |_x: i8, _y: i8| false;
    for kind in PieceKind::ALL {
        let mut shape = get_shape(kind);
        for _ in 0..4 {
            shape = try_rotate(&shape, 7, 5, open).unwrap().0;
        }
        assert_eq!(shape, get_shape(kind), "{:?}", kind);
    }
}

#[test]
fn test_rotation_outcome_sequences() {
    use RotateKind::{Corrected as K, InPlace as R};
    let open = |_x: i8, _y: i8| false;
    let expected = [
        (PieceKind::O, [K, K, K, K]),
        (PieceKind::I, [R, K, R, K]),
        (PieceKind::S, [R, K, R, K]),
        (PieceKind::Z, [R, K, R, K]),
        (PieceKind::T, [R, K, R, K]),
        (PieceKind::L, [K, R, K, R]),
        (PieceKind::J, [K, R, K, R]),
    ];

    for (kind, outcomes) in expected {
        let mut shape = get_shape(kind);
        for want in outcomes {
            let (next, got) = try_rotate(&shape, 7, 5, open).unwrap();
            assert_eq!(got, want, "{:?}", kind);
            shape = next;
        }
    }
}
