//! Pieces module - the tetromino catalog and bounding-box rotation
//!
//! Every catalog entry is four (dx, dy) offsets from the piece origin plus one
//! paint color. Rotation is computed from a shape's bounding box rather than
//! from per-shape rotation tables.

use crate::types::{PieceKind, Rgb};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// One fixed catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub color: Rgb,
}

/// The seven tetrominoes, indexed by [`PieceKind::index`]
pub const CATALOG: [CatalogEntry; 7] = [
    CatalogEntry {
        kind: PieceKind::O,
        shape: [(0, 0), (1, 0), (0, 1), (1, 1)],
        color: Rgb::new(255, 255, 0),
    },
    CatalogEntry {
        kind: PieceKind::I,
        shape: [(0, 0), (1, 0), (2, 0), (3, 0)],
        color: Rgb::new(0, 255, 255),
    },
    CatalogEntry {
        kind: PieceKind::S,
        shape: [(1, 0), (2, 0), (0, 1), (1, 1)],
        color: Rgb::new(0, 255, 0),
    },
    CatalogEntry {
        kind: PieceKind::Z,
        shape: [(0, 0), (1, 0), (1, 1), (2, 1)],
        color: Rgb::new(255, 0, 0),
    },
    CatalogEntry {
        kind: PieceKind::L,
        shape: [(0, 0), (0, 1), (0, 2), (1, 2)],
        color: Rgb::new(255, 165, 0),
    },
    CatalogEntry {
        kind: PieceKind::J,
        shape: [(1, 0), (1, 1), (1, 2), (0, 2)],
        color: Rgb::new(0, 0, 255),
    },
    CatalogEntry {
        kind: PieceKind::T,
        shape: [(0, 0), (1, 0), (2, 0), (1, 1)],
        color: Rgb::new(128, 0, 128),
    },
];

/// Catalog entry for a piece kind
pub fn catalog_entry(kind: PieceKind) -> &'static CatalogEntry {
    let entry = &CATALOG[kind.index()];
    debug_assert_eq!(entry.kind, kind, "catalog out of order");
    entry
}

/// Spawn shape for a piece kind
pub fn get_shape(kind: PieceKind) -> PieceShape {
    catalog_entry(kind).shape
}

/// Paint color for a piece kind
pub fn get_color(kind: PieceKind) -> Rgb {
    catalog_entry(kind).color
}

/// How a successful rotation was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateKind {
    /// Rotated shape fit as computed
    InPlace,
    /// Rotated shape needed the leftward correction (offsets pushed right)
    Corrected,
}

/// Rotate a shape 90° around the center of its bounding box.
///
/// `center = min + (max - min) / 2` per axis, then
/// `new_dx = cy - dy + cx` and `new_dy = dx - cx + cy`.
pub fn rotate_shape(shape: &PieceShape) -> PieceShape {
    let (min_x, max_x, min_y, max_y) = bounds(shape);
    let cx = min_x + (max_x - min_x) / 2;
    let cy = min_y + (max_y - min_y) / 2;

    shape.map(|(dx, dy)| (cy - dy + cx, dx - cx + cy))
}

/// Smallest dx of a shape
pub fn min_dx(shape: &PieceShape) -> i8 {
    shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0)
}

/// (min_x, max_x, min_y, max_y) over the offsets
pub fn bounds(shape: &PieceShape) -> (i8, i8, i8, i8) {
    let mut min_x = i8::MAX;
    let mut max_x = i8::MIN;
    let mut min_y = i8::MAX;
    let mut max_y = i8::MIN;
    for &(dx, dy) in shape {
        min_x = min_x.min(dx);
        max_x = max_x.max(dx);
        min_y = min_y.min(dy);
        max_y = max_y.max(dy);
    }
    (min_x, max_x, min_y, max_y)
}

/// Try to rotate a shape placed at (x, y).
///
/// `is_blocked` is the per-cell collision rule. The rotation is abandoned if
/// the rotated shape collides. If it fits but has negative x offsets, every
/// offset is pushed right so the smallest dx is 0 and the placement is tested
/// again. There is no correction for right or bottom overflow.
///
/// Returns None if the piece has to stay as it is.
pub fn try_rotate(
    shape: &PieceShape,
    x: i8,
    y: i8,
    is_blocked: impl Fn(i8, i8) -> bool,
) -> Option<(PieceShape, RotateKind)> {
    let fits = |s: &PieceShape| s.iter().all(|&(dx, dy)| !is_blocked(x + dx, y + dy));

    let rotated = rotate_shape(shape);
    if !fits(&rotated) {
        return None;
    }

    let min = min_dx(&rotated);
    if min >= 0 {
        return Some((rotated, RotateKind::InPlace));
    }

    let corrected = rotated.map(|(dx, dy)| (dx - min, dy));
    if fits(&corrected) {
        Some((corrected, RotateKind::Corrected))
    } else {
        None
    }
}
