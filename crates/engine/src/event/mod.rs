//! Cancellable events and their observer lists.
//!
//! An [`Event`] is built immediately before a decision point, handed by
//! mutable borrow to every observer registered on a [`HandlerList`], and
//! inspected by the caller once the list returns. It borrows its subject and
//! payload and is never stored past the call.

pub mod handler_list;

pub use handler_list::{CallSummary, HandlerList, ListenerError, ListenerId};

/// Observer ordering. Lower priorities run first; `Monitor` runs last and is
/// meant for observers that only record the final outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Lowest,
    Low,
    #[default]
    Normal,
    High,
    Highest,
    Monitor,
}

/// Envelope around a borrowed subject (whose state is at stake) and a
/// borrowed payload (what is about to happen to it).
///
/// The cancel flag is monotonic: observers can set it but nothing can clear
/// it again within one call.
#[derive(Debug)]
pub struct Event<'a, S: ?Sized, P: ?Sized> {
    subject: &'a S,
    payload: &'a P,
    cancelled: bool,
}

impl<'a, S: ?Sized, P: ?Sized> Event<'a, S, P> {
    pub fn new(subject: &'a S, payload: &'a P) -> Self {
        Self {
            subject,
            payload,
            cancelled: false,
        }
    }

    pub fn subject(&self) -> &'a S {
        self.subject
    }

    pub fn payload(&self) -> &'a P {
        self.payload
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}
