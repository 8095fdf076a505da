//! Engine timing configuration.

use crate::types::{DROP_DEBOUNCE_MS, GRAVITY_INTERVAL_MS, MOVE_DEBOUNCE_MS, ROTATE_DEBOUNCE_MS};

/// Debounce and gravity intervals, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub move_debounce_ms: u64,
    pub rotate_debounce_ms: u64,
    pub drop_debounce_ms: u64,
    pub gravity_interval_ms: u64,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            move_debounce_ms: MOVE_DEBOUNCE_MS,
            rotate_debounce_ms: ROTATE_DEBOUNCE_MS,
            drop_debounce_ms: DROP_DEBOUNCE_MS,
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
        }
    }

    /// Every player action fires on every call; gravity keeps its interval.
    pub fn without_debounce() -> Self {
        Self {
            move_debounce_ms: 0,
            rotate_debounce_ms: 0,
            drop_debounce_ms: 0,
            ..Self::new()
        }
    }

    pub fn with_move_debounce_ms(mut self, ms: u64) -> Self {
        self.move_debounce_ms = ms;
        self
    }

    pub fn with_rotate_debounce_ms(mut self, ms: u64) -> Self {
        self.rotate_debounce_ms = ms;
        self
    }

    pub fn with_drop_debounce_ms(mut self, ms: u64) -> Self {
        self.drop_debounce_ms = ms;
        self
    }

    pub fn with_gravity_interval_ms(mut self, ms: u64) -> Self {
        self.gravity_interval_ms = ms;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
