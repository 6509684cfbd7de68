//! Request sequencing for list fetches.
//!
//! When filters change quickly several fetches can be in flight at once and
//! their responses can arrive in any order. Each fetch takes a [`Ticket`]; only
//! the response holding the most recently issued ticket may be applied.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic tag for one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and answers whether a ticket is still the newest.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket newer than every ticket issued so far.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersede every outstanding ticket, e.g. when the view unmounts.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_ticket_wins() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();

        assert!(first < second);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn test_invalidate_supersedes_everything() {
        let sequencer = RequestSequencer::new();
        let ticket = sequencer.issue();
        sequencer.invalidate();
        assert!(!sequencer.is_current(ticket));
        assert!(sequencer.is_current(sequencer.issue()));
    }
}
