//! Game state module - manages the complete game session
//!
//! This module ties together all core components: board, catalog, lookahead
//! queue, debounce gates and score. It handles the per-tick action order,
//! piece movement, rotation, locking, line clears and the game-over reset.
//!
//! All time values are milliseconds of a monotonic host clock.

use crate::board::Board;
use crate::config::EngineConfig;
use crate::debounce::Debounce;
use crate::pieces::{get_color, get_shape, try_rotate, PieceShape, RotateKind};
use crate::rng::PieceQueue;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    pub shape: PieceShape,
    pub color: Rgb,
}

impl Piece {
    /// Create a new piece at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_X, SPAWN_Y)
    }

    /// Create a piece with its catalog shape at (x, y)
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            x,
            y,
            shape: get_shape(kind),
            color: get_color(kind),
        }
    }

    /// Would the piece, shifted by (dx, dy), leave the board sideways or
    /// through the floor, or overlap a locked cell?
    pub fn collides(&self, board: &Board, dx: i8, dy: i8) -> bool {
        self.shape
            .iter()
            .any(|&(cx, cy)| board.is_blocked(self.x + cx + dx, self.y + cy + dy))
    }

    /// Does any cell of the piece sit on a locked cell?
    pub fn overlaps(&self, board: &Board) -> bool {
        self.cells().any(|(x, y)| board.is_occupied(x, y))
    }

    /// Absolute cells covered by the piece
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape.iter().map(|&(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Result of a rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    Rotated,
    /// Rotated after pushing the shape right off the left wall
    Corrected,
    /// Left unchanged
    Blocked,
}

/// Result of one step along the gravity path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fell,
    Locked { rows_cleared: u32 },
}

/// Result of a hard drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropResult {
    /// Rows fallen before locking
    pub distance: u32,
    pub rows_cleared: u32,
}

/// Last lock/game-over event (consumed by hosts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    Locked { rows_cleared: u32 },
    GameOver { final_score: u32 },
}

/// What one call to [`GameState::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub moved: bool,
    pub rotated: bool,
    pub hard_dropped: bool,
    pub gravity_stepped: bool,
    pub rows_cleared: u32,
    pub game_over: bool,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Option<Piece>,
    queue: PieceQueue,
    score: u32,
    /// Finished games (increments on every game-over reset).
    games_played: u32,
    started: bool,
    move_left_gate: Debounce,
    move_right_gate: Debounce,
    rotate_gate: Debounce,
    drop_gate: Debounce,
    gravity_gate: Debounce,
    last_event: Option<CoreEvent>,
}

impl GameState {
    /// Create a new session with default timings and the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_config(EngineConfig::default(), seed)
    }

    pub fn with_config(config: EngineConfig, seed: u64) -> Self {
        Self {
            config,
            board: Board::new(),
            active: None,
            queue: PieceQueue::new(seed),
            score: 0,
            games_played: 0,
            started: false,
            move_left_gate: Debounce::new(config.move_debounce_ms),
            move_right_gate: Debounce::new(config.move_debounce_ms),
            rotate_gate: Debounce::new(config.rotate_debounce_ms),
            drop_gate: Debounce::new(config.drop_debounce_ms),
            gravity_gate: Debounce::new(config.gravity_interval_ms),
            last_event: None,
        }
    }

    /// Start the game and spawn the first piece.
    ///
    /// Gravity first fires one full interval after `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        if self.started {
            return;
        }
        self.started = true;
        self.gravity_gate.arm(now_ms);
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// The lookahead piece
    pub fn next_piece(&self) -> Option<PieceKind> {
        self.queue.peek()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn seed(&self) -> u64 {
        self.queue.seed()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_rows(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.queue.peek().map(NextSnapshot::from);
        out.score = self.score;
        out.games_played = self.games_played;
        out.started = self.started;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the lookahead piece to the active piece at the spawn position.
    ///
    /// Returns false if the new piece landed on locked cells. That is not
    /// handled here; the next game-over check picks it up.
    pub fn spawn_piece(&mut self) -> bool {
        let piece = Piece::new(self.queue.promote());
        self.active = Some(piece);
        !piece.overlaps(&self.board)
    }

    /// Would the active piece collide if shifted by (dx, dy)?
    ///
    /// With no active piece everything collides.
    pub fn collides(&self, dx: i8, dy: i8) -> bool {
        match self.active {
            Some(piece) => piece.collides(&self.board, dx, dy),
            None => true,
        }
    }

    /// Does the active piece sit on locked cells?
    pub fn active_overlaps_board(&self) -> bool {
        self.active.is_some_and(|piece| piece.overlaps(&self.board))
    }

    /// Try to move the active piece (no debounce)
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if active.collides(&self.board, dx, dy) {
            return false;
        }

        self.active = Some(Piece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        true
    }

    /// Move one column left if the left-move window has elapsed.
    ///
    /// The window re-arms on every attempt that passes the gate, including
    /// attempts blocked by a wall or locked cells.
    pub fn move_left(&mut self, now_ms: u64) -> bool {
        if self.active.is_none() || !self.move_left_gate.ready(now_ms) {
            return false;
        }
        self.try_move(-1, 0)
    }

    /// Move one column right if the right-move window has elapsed.
    pub fn move_right(&mut self, now_ms: u64) -> bool {
        if self.active.is_none() || !self.move_right_gate.ready(now_ms) {
            return false;
        }
        self.try_move(1, 0)
    }

    /// Rotate the active piece (no debounce)
    pub(crate) fn try_rotate(&mut self) -> RotateOutcome {
        let Some(active) = self.active else {
            return RotateOutcome::Blocked;
        };

        let board = &self.board;
        match try_rotate(&active.shape, active.x, active.y, |x, y| {
            board.is_blocked(x, y)
        }) {
            Some((shape, kind)) => {
                self.active = Some(Piece { shape, ..active });
                match kind {
                    RotateKind::InPlace => RotateOutcome::Rotated,
                    RotateKind::Corrected => RotateOutcome::Corrected,
                }
            }
            None => RotateOutcome::Blocked,
        }
    }

    /// Rotate if the rotate window has elapsed.
    ///
    /// Returns None when the call was swallowed by the debounce gate.
    pub fn rotate(&mut self, now_ms: u64) -> Option<RotateOutcome> {
        if self.active.is_none() || !self.rotate_gate.ready(now_ms) {
            return None;
        }
        Some(self.try_rotate())
    }

    /// One step along the gravity path: fall one row, or lock if blocked.
    pub(crate) fn step_down(&mut self) -> Option<Step> {
        self.active?;

        if self.try_move(0, 1) {
            return Some(Step::Fell);
        }

        Some(Step::Locked {
            rows_cleared: self.lock_piece(),
        })
    }

    /// Drop the active piece until it collides, then lock it.
    ///
    /// Returns None when there is no piece or the drop window has not elapsed.
    pub fn hard_drop(&mut self, now_ms: u64) -> Option<DropResult> {
        if self.active.is_none() || !self.drop_gate.ready(now_ms) {
            return None;
        }

        let mut distance = 0;
        while let Some(step) = self.step_down() {
            match step {
                Step::Fell => distance += 1,
                Step::Locked { rows_cleared } => {
                    return Some(DropResult {
                        distance,
                        rows_cleared,
                    })
                }
            }
        }
        None
    }

    /// Time-gated gravity step.
    pub fn tick_gravity(&mut self, now_ms: u64) -> Option<Step> {
        if !self.started || self.active.is_none() || !self.gravity_gate.ready(now_ms) {
            return None;
        }
        self.step_down()
    }

    /// Lock the active piece onto the board, clear full rows and spawn the
    /// next piece. Returns the number of rows cleared.
    pub fn lock_piece(&mut self) -> u32 {
        let Some(active) = self.active.take() else {
            return 0;
        };

        self.board
            .lock_cells(&active.shape, active.x, active.y, active.color);

        let rows_cleared = self.clear_lines();
        self.last_event = Some(CoreEvent::Locked { rows_cleared });

        self.spawn_piece();
        rows_cleared
    }

    /// Remove every full row, scoring one point per row.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_rows().len() as u32;
        self.score += cleared;
        cleared
    }

    /// Top row holds a locked cell, or the active piece spawned onto locked cells.
    pub fn is_game_over(&self) -> bool {
        self.board.is_row_occupied(0) || self.active_overlaps_board()
    }

    /// Run the once-per-tick game-over check; on game over, reset in place.
    pub fn check_and_handle_game_over(&mut self) -> bool {
        if !self.started || !self.is_game_over() {
            return false;
        }

        self.last_event = Some(CoreEvent::GameOver {
            final_score: self.score,
        });
        self.games_played = self.games_played.wrapping_add(1);
        self.reset();
        true
    }

    /// Empty the board, zero the score, discard the lookahead and respawn.
    ///
    /// Debounce gates keep their timestamps.
    pub fn reset(&mut self) {
        self.board.reset();
        self.score = 0;
        self.queue.clear();
        self.active = None;
        if self.started {
            self.spawn_piece();
        }
    }

    /// Take and clear the last lock/game-over event.
    pub fn take_last_event(&mut self) -> Option<CoreEvent> {
        self.last_event.take()
    }

    /// Apply one action through its debounce gate
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(now_ms),
            GameAction::MoveRight => self.move_right(now_ms),
            GameAction::Rotate => self
                .rotate(now_ms)
                .is_some_and(|outcome| outcome != RotateOutcome::Blocked),
            GameAction::HardDrop => self.hard_drop(now_ms).is_some(),
        }
    }

    /// Main game tick.
    ///
    /// Order is fixed: held actions (left, right, rotate, hard drop), then
    /// the gravity step, then the game-over check.
    pub fn tick(&mut self, now_ms: u64, held: HeldInputs) -> TickReport {
        let mut report = TickReport::default();
        if !self.started {
            return report;
        }

        if held.move_left && self.move_left(now_ms) {
            report.moved = true;
        }
        if held.move_right && self.move_right(now_ms) {
            report.moved = true;
        }
        if held.rotate {
            if let Some(outcome) = self.rotate(now_ms) {
                report.rotated = outcome != RotateOutcome::Blocked;
            }
        }
        if held.hard_drop {
            if let Some(drop) = self.hard_drop(now_ms) {
                report.hard_dropped = true;
                report.rows_cleared += drop.rows_cleared;
            }
        }

        match self.tick_gravity(now_ms) {
            Some(Step::Fell) => report.gravity_stepped = true,
            Some(Step::Locked { rows_cleared }) => {
                report.gravity_stepped = true;
                report.rows_cleared += rows_cleared;
            }
            None => {}
        }

        report.game_over = self.check_and_handle_game_over();
        report
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
