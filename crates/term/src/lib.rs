//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a plain framebuffer that is then flushed to the terminal through
//! `crossterm`, without any widget or layout toolkit.
//!
//! - [`fb`]: framebuffer of styled glyphs
//! - [`game_view`]: board, side panel and banner layout (pure, testable)
//! - [`renderer`]: raw-mode terminal session and diff flushing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph};
pub use game_view::{AnchorY, BoardFrame, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
