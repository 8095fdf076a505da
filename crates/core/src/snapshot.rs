use crate::board::BoardRows;
use crate::game_state::Piece;
use crate::pieces::{get_color, get_shape, PieceShape};
use crate::types::{Cell, PieceKind, Rgb, BOARD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub shape: PieceShape,
    pub color: Rgb,
}

impl ActiveSnapshot {
    /// Absolute board cells covered by the piece (may include rows above the top)
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.iter().map(|&(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            x: value.x,
            y: value.y,
            shape: value.shape,
            color: value.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub color: Rgb,
}

impl From<PieceKind> for NextSnapshot {
    fn from(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            color: get_color(kind),
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardRows,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<NextSnapshot>,
    pub score: u32,
    pub games_played: u32,
    pub started: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[Cell::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        self.active = None;
        self.next = None;
        self.score = 0;
        self.games_played = 0;
        self.started = false;
    }

    /// Board cell with the active piece painted over it
    pub fn cell_at(&self, x: i8, y: i8) -> Option<Cell> {
        if x < 0 || y < 0 || x >= BOARD_SIZE as i8 || y >= BOARD_SIZE as i8 {
            return None;
        }
        if let Some(active) = &self.active {
            if active.cells().any(|c| c == (x, y)) {
                return Some(Cell::Occupied(active.color));
            }
        }
        Some(self.board[y as usize][x as usize])
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            active: None,
            next: None,
            score: 0,
            games_played: 0,
            started: false,
        }
    }
}
