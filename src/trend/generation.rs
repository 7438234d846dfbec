//! Aggregation Pass Generations
//!
//! Every trend pass takes a ticket. Issuing a new ticket makes all older
//! ones stale, so a slow pass can tell it has been superseded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared source of pass tickets
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    latest: Arc<AtomicU64>,
}

/// Ticket for one aggregation pass
#[derive(Debug, Clone)]
pub struct PassTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new pass, superseding every earlier ticket
    pub fn next(&self) -> PassTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        PassTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Invalidate outstanding tickets without starting a pass
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Whether `generation` is still the newest
    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

impl PassTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes() {
        let counter = GenerationCounter::new();
        let first = counter.next();
        assert!(first.is_current());

        let second = counter.next();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.generation() > first.generation());
        assert!(counter.is_current(second.generation()));
    }

    #[test]
    fn test_invalidate() {
        let counter = GenerationCounter::new();
        let ticket = counter.next();
        counter.invalidate();
        assert!(!ticket.is_current());
    }

    #[test]
    fn test_clones_share_state() {
        let counter = GenerationCounter::new();
        let ticket = counter.next();
        counter.clone().next();
        assert!(!ticket.is_current());
    }
}
