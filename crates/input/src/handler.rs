//! Held-button sampler for terminal environments.
//!
//! The engine wants level-triggered input: "is this button held right now",
//! sampled once per tick. Terminals mostly deliver edge events, and many never
//! send key releases. A press (or auto-repeat) marks its button held; a release
//! clears it. Until a release event has been seen, a button that receives no
//! further press within the release timeout counts as released.

use crossterm::event::KeyCode;

use crate::map::action_for_code;
use crate::types::{GameAction, HeldInputs};

// A single tap on a terminal without release events must not stay held past
// the first auto-repeat gap.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Tracks which buttons are held.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Time of the last press/repeat per button, indexed like `GameAction::ALL`.
    pressed_at: [Option<u64>; 4],
    release_events_seen: bool,
    key_release_timeout_ms: u64,
}

fn slot(action: GameAction) -> usize {
    match action {
        GameAction::MoveLeft => 0,
        GameAction::MoveRight => 1,
        GameAction::Rotate => 2,
        GameAction::HardDrop => 3,
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pressed_at: [None; 4],
            release_events_seen: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout_ms
    }

    /// Record a press or auto-repeat.
    ///
    /// Returns the button if it was not already held.
    pub fn handle_key_press(&mut self, code: KeyCode, now_ms: u64) -> Option<GameAction> {
        let action = action_for_code(code)?;
        let was_held = self.is_held(action, now_ms);
        self.pressed_at[slot(action)] = Some(now_ms);
        (!was_held).then_some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(action) = action_for_code(code) {
            self.release_events_seen = true;
            self.pressed_at[slot(action)] = None;
        }
    }

    fn is_held(&self, action: GameAction, now_ms: u64) -> bool {
        match self.pressed_at[slot(action)] {
            Some(at) => {
                self.release_events_seen
                    || now_ms.saturating_sub(at) <= self.key_release_timeout_ms
            }
            None => false,
        }
    }

    /// Held buttons at `now_ms`; expired presses are dropped.
    pub fn sample(&mut self, now_ms: u64) -> HeldInputs {
        let mut held = HeldInputs::default();
        for action in GameAction::ALL {
            if self.is_held(action, now_ms) {
                held.set(action, true);
            } else {
                self.pressed_at[slot(action)] = None;
            }
        }
        held
    }

    pub fn reset(&mut self) {
        self.pressed_at = [None; 4];
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
