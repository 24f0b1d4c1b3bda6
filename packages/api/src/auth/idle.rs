//! Idle timeout bookkeeping.
//!
//! The timer itself is a sleeping task owned by the UI runtime; this module
//! only decides whether a wake-up still counts. Every arm or cancel bumps a
//! generation counter, and a [`IdleTicket`] carrying an older generation is
//! ignored when it fires.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdleTicket {
    generation: u64,
    duration: Duration,
}

impl IdleTicket {
    /// How long the UI should sleep before reporting this ticket.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

pub struct IdleTimer {
    duration: Duration,
    generation: AtomicU64,
    tickets: watch::Sender<Option<IdleTicket>>,
}

impl IdleTimer {
    pub fn new(duration: Duration) -> Self {
        let (tickets, _) = watch::channel(None);
        Self {
            duration,
            generation: AtomicU64::new(0),
            tickets,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Arm (or re-arm) the timer, invalidating any outstanding ticket.
    pub fn arm(&self) -> IdleTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let ticket = IdleTicket {
            generation,
            duration: self.duration,
        };
        self.tickets.send_replace(Some(ticket));
        ticket
    }

    /// Disarm the timer. Outstanding tickets become stale.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.tickets.send_replace(None);
    }

    pub fn is_armed(&self) -> bool {
        self.tickets.borrow().is_some()
    }

    /// Whether `ticket` is the one most recently armed and not cancelled since.
    pub fn is_current(&self, ticket: IdleTicket) -> bool {
        ticket.generation == self.generation.load(Ordering::SeqCst) && self.is_armed()
    }

    /// Receiver of every armed ticket (`None` on cancel).
    pub fn subscribe(&self) -> watch::Receiver<Option<IdleTicket>> {
        self.tickets.subscribe()
    }
}
