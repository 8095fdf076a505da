//! RNG module - one-piece lookahead with uniform random draws
//!
//! Every draw is an independent uniform pick over the 7 catalog entries (no
//! bag). The queue holds at most one pending piece: the preview shown to the
//! player and the seed of the next spawn.
//!
//! Draws come from a seeded [`StdRng`], so a given seed replays the same
//! sequence (useful for tests and benchmarks).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// One-slot lookahead queue
#[derive(Debug, Clone)]
pub struct PieceQueue {
    /// Pending piece, if any
    next: Option<PieceKind>,
    rng: StdRng,
    seed: u64,
}

impl PieceQueue {
    /// Create an empty queue with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            next: None,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Uniform draw over the catalog (does not touch the queue)
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Peek at the pending piece
    pub fn peek(&self) -> Option<PieceKind> {
        self.next
    }

    /// Take the pending piece (drawing one first if the queue is empty) and
    /// refill the queue with a fresh draw.
    pub fn promote(&mut self) -> PieceKind {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.draw(),
        };
        self.next = Some(self.draw());
        kind
    }

    /// Discard the pending piece
    pub fn clear(&mut self) {
        self.next = None;
    }

    /// Seed the queue was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Force the pending piece
    #[cfg(test)]
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = Some(kind);
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_starts_empty() {
        let queue = PieceQueue::new(7);
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.seed(), 7);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceQueue::new(12345);
        let mut b = PieceQueue::new(12345);
        for _ in 0..100 {
            assert_eq!(a.promote(), b.promote());
            assert_eq!(a.peek(), b.peek());
        }
    }

    #[test]
    fn test_promote_returns_previous_preview() {
        let mut queue = PieceQueue::new(1);
        queue.promote();

        for _ in 0..20 {
            let preview = queue.peek().unwrap();
            assert_eq!(queue.promote(), preview);
            assert!(queue.peek().is_some());
        }
    }

    #[test]
    fn test_clear_discards_preview() {
        let mut queue = PieceQueue::new(1);
        queue.set_next(PieceKind::T);
        queue.clear();
        assert_eq!(queue.peek(), None);

        // Promoting from an empty queue still yields a piece and refills.
        queue.promote();
        assert!(queue.peek().is_some());
    }

    #[test]
    fn test_draws_cover_catalog() {
        let mut queue = PieceQueue::new(99);
        let mut seen = [false; 7];
        for _ in 0..1000 {
            seen[queue.draw().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {:?}", seen);
    }
}
