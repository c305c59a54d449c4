use std::sync::atomic::{AtomicU64, Ordering};

// Ticket marks the issue order of a remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

// Sequencer hands out increasing tickets; only the newest one is current
#[derive(Debug, Default)]
pub struct Sequencer {
    issued: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }
}
