//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, input sampling, terminal rendering).
//!
//! # Board Dimensions
//!
//! The playfield is a square 16x16 grid:
//!
//! - **Size**: 16 columns and 16 rows (indexed 0-15)
//! - **Row 0** is the top (spawn side), row 15 is the floor
//! - **Spawn position**: (7, 0)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds of a monotonic host clock:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Host loop cadence (~20 Hz) |
//! | `GRAVITY_INTERVAL_MS` | 500 | One automatic row of descent |
//! | `MOVE_DEBOUNCE_MS` | 150 | Minimum gap between two moves in one direction |
//! | `ROTATE_DEBOUNCE_MS` | 300 | Minimum gap between two rotations |
//! | `DROP_DEBOUNCE_MS` | 300 | Minimum gap between two hard drops |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, GameAction, HeldInputs, PieceKind, Rgb, BOARD_SIZE};
//!
//! // Parse from string (case-insensitive)
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! // Cells carry their paint color only when occupied
//! let cell = Cell::Occupied(Rgb::new(255, 0, 0));
//! assert!(cell.is_occupied());
//! assert_ne!(Cell::Empty, Cell::Occupied(Rgb::new(0, 0, 0)));
//!
//! // Held signals are level-triggered
//! let mut held = HeldInputs::default();
//! held.set(GameAction::Rotate, true);
//! assert!(held.is_held(GameAction::Rotate));
//!
//! assert_eq!(BOARD_SIZE, 16);
//! ```

/// Board side length in cells (16 columns, 16 rows)
pub const BOARD_SIZE: u8 = 16;

/// Spawn column for new pieces (`BOARD_SIZE / 2 - 1`)
pub const SPAWN_X: i8 = (BOARD_SIZE / 2) as i8 - 1;

/// Spawn row for new pieces (top edge)
pub const SPAWN_Y: i8 = 0;

/// Host loop interval in milliseconds (50ms ≈ 20 Hz)
pub const TICK_MS: u64 = 50;

/// Gravity interval (one row every 500ms)
pub const GRAVITY_INTERVAL_MS: u64 = 500;

/// Debounce window for left/right movement (each direction has its own timer)
pub const MOVE_DEBOUNCE_MS: u64 = 150;

/// Debounce window for rotation
pub const ROTATE_DEBOUNCE_MS: u64 = 300;

/// Debounce window for hard drop
pub const DROP_DEBOUNCE_MS: u64 = 300;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A single board cell.
///
/// Emptiness is its own variant, so no paint color can ever be mistaken for an
/// empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Rgb),
}

impl Cell {
    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Paint color of an occupied cell
    pub fn color(&self) -> Option<Rgb> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(color) => Some(*color),
        }
    }
}

/// Tetromino piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Position in the catalog (0..7)
    pub fn index(&self) -> usize {
        match self {
            PieceKind::O => 0,
            PieceKind::I => 1,
            PieceKind::S => 2,
            PieceKind::Z => 3,
            PieceKind::L => 4,
            PieceKind::J => 5,
            PieceKind::T => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
        }
    }
}

/// Player actions. Each one is polled as a held signal once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Rotate,
    HardDrop,
}

impl GameAction {
    /// Every action, in the order a tick applies them
    pub const ALL: [GameAction; 4] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::HardDrop,
    ];

    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
        }
    }
}

/// Level-triggered input state sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldInputs {
    pub move_left: bool,
    pub move_right: bool,
    pub rotate: bool,
    pub hard_drop: bool,
}

impl HeldInputs {
    pub fn is_held(&self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left,
            GameAction::MoveRight => self.move_right,
            GameAction::Rotate => self.rotate,
            GameAction::HardDrop => self.hard_drop,
        }
    }

    pub fn set(&mut self, action: GameAction, held: bool) {
        match action {
            GameAction::MoveLeft => self.move_left = held,
            GameAction::MoveRight => self.move_right = held,
            GameAction::Rotate => self.rotate = held,
            GameAction::HardDrop => self.hard_drop = held,
        }
    }

    /// Held actions in tick order
    pub fn actions(&self) -> impl Iterator<Item = GameAction> + '_ {
        GameAction::ALL
            .into_iter()
            .filter(move |action| self.is_held(*action))
    }

    pub fn any(&self) -> bool {
        self.move_left || self.move_right || self.rotate || self.hard_drop
    }
}
