//! Debounce gates for level-triggered actions.
//!
//! Inputs are sampled as "is this button held" once per tick. Without a gate a
//! held button would repeat its action every tick, so each action keeps the
//! timestamp of its last execution and only fires again once its interval
//! has elapsed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl Debounce {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_ms(&self) -> Option<u64> {
        self.last_ms
    }

    /// Decide whether the action may run at `now_ms`.
    ///
    /// - Never fired: always ready.
    /// - Otherwise ready once `now_ms - last >= interval` (a clock that went
    ///   backwards counts as zero elapsed).
    ///
    /// A ready gate re-arms at `now_ms` whatever the action then does.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_ms {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return false;
            }
        }
        self.last_ms = Some(now_ms);
        true
    }

    /// Start a window at `now_ms` without firing.
    pub fn arm(&mut self, now_ms: u64) {
        self.last_ms = Some(now_ms);
    }

    /// Forget the last execution.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
