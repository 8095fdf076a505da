//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management for a falling
//! block game on a 16x16 board. It has no dependency on terminals or I/O, so
//! the same engine runs under the terminal host, in tests and in benchmarks.
//!
//! # Module Structure
//!
//! - [`board`]: 16x16 grid of colored cells, collision checks and row clearing
//! - [`pieces`]: the seven-shape catalog and bounding-box rotation
//! - [`rng`]: seeded uniform draws with a one-piece lookahead
//! - [`debounce`]: per-action time gates for level-triggered input
//! - [`config`]: debounce and gravity intervals
//! - [`game_state`]: the session (active piece, score, tick order, game over)
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at (7, 0); each draw is an independent uniform pick
//! - Rotation turns a shape around its bounding-box center, pushing it right
//!   off the left wall if needed; there is no other wall kick
//! - Gravity moves the piece down one row every 500ms and locks it when blocked
//! - Each cleared row scores one point
//! - A locked cell in the top row (or a spawn onto locked cells) ends the game;
//!   the session resets in place and the games-played counter goes up
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, GameState};
//! use blockfall_types::{GameAction, HeldInputs};
//!
//! let mut game = GameState::with_config(EngineConfig::without_debounce(), 12345);
//! game.start(0);
//!
//! game.apply_action(GameAction::MoveRight, 0);
//! game.apply_action(GameAction::HardDrop, 0);
//! assert_eq!(game.board().occupied_count(), 4);
//!
//! // Regular play goes through `tick` with the sampled held buttons.
//! let report = game.tick(50, HeldInputs::default());
//! assert!(!report.game_over);
//! ```
//!
//! # Timing
//!
//! Time is a caller-supplied millisecond clock. The host calls
//! [`GameState::tick`](game_state::GameState::tick) every 50ms with the
//! buttons currently held; debounce gates decide which actions fire.

pub mod board;
pub mod config;
pub mod debounce;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardRows};
pub use config::EngineConfig;
pub use debounce::Debounce;
pub use game_state::{CoreEvent, DropResult, GameState, Piece, RotateOutcome, Step, TickReport};
pub use pieces::{get_color, get_shape, rotate_shape, try_rotate, PieceShape, CATALOG};
pub use rng::PieceQueue;
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
