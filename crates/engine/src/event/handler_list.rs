use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::{Event, Priority};

/// Error type observers may return. `anyhow::Error` and any
/// `std::error::Error` convert into it with `?`.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

type Callback<S, P> =
    Box<dyn for<'a> Fn(&mut Event<'a, S, P>) -> Result<(), ListenerError> + Send + Sync>;

/// Handle returned by [`HandlerList::register`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration<S: ?Sized + 'static, P: ?Sized + 'static> {
    id: ListenerId,
    name: &'static str,
    priority: Priority,
    ignore_cancelled: bool,
    callback: Callback<S, P>,
}

/// What happened during one [`HandlerList::call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallSummary {
    /// Observers that were invoked (skipped ones not counted).
    pub invoked: usize,
    /// Observers that returned an error or panicked.
    pub failures: usize,
}

/// Ordered observers for one event family.
///
/// Observers run in ascending [`Priority`]; equal priorities run in
/// registration order. A failing observer (returned `Err` or panicked) is
/// logged and the remaining observers still run.
pub struct HandlerList<S: ?Sized + 'static, P: ?Sized + 'static> {
    event_name: &'static str,
    registrations: Vec<Registration<S, P>>,
    next_id: u64,
}

impl<S: ?Sized + 'static, P: ?Sized + 'static> HandlerList<S, P> {
    pub fn new(event_name: &'static str) -> Self {
        Self {
            event_name,
            registrations: Vec::new(),
            next_id: 0,
        }
    }

    pub fn event_name(&self) -> &'static str {
        self.event_name
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Register an observer that runs even if an earlier one cancelled.
    pub fn register<F>(&mut self, name: &'static str, priority: Priority, callback: F) -> ListenerId
    where
        F: for<'a> Fn(&mut Event<'a, S, P>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.insert(name, priority, false, Box::new(callback))
    }

    /// Register an observer that is skipped once the event is cancelled.
    pub fn register_ignore_cancelled<F>(
        &mut self,
        name: &'static str,
        priority: Priority,
        callback: F,
    ) -> ListenerId
    where
        F: for<'a> Fn(&mut Event<'a, S, P>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.insert(name, priority, true, Box::new(callback))
    }

    fn insert(
        &mut self,
        name: &'static str,
        priority: Priority,
        ignore_cancelled: bool,
        callback: Callback<S, P>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        // After every registration of the same or lower priority: keeps
        // registration order as the tiebreak.
        let at = self
            .registrations
            .iter()
            .position(|r| r.priority > priority)
            .unwrap_or(self.registrations.len());
        self.registrations.insert(
            at,
            Registration {
                id,
                name,
                priority,
                ignore_cancelled,
                callback,
            },
        );
        id
    }

    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    /// Notify every observer in order. The caller inspects
    /// [`Event::is_cancelled`] afterwards.
    pub fn call(&self, event: &mut Event<'_, S, P>) -> CallSummary {
        let mut summary = CallSummary::default();
        for reg in &self.registrations {
            if reg.ignore_cancelled && event.is_cancelled() {
                continue;
            }
            summary.invoked += 1;

            match panic::catch_unwind(AssertUnwindSafe(|| (reg.callback)(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    summary.failures += 1;
                    tracing::error!(
                        "Observer '{}' failed while handling {}: {}",
                        reg.name,
                        self.event_name,
                        e
                    );
                }
                Err(payload) => {
                    summary.failures += 1;
                    tracing::error!(
                        "Observer '{}' panicked while handling {}: {}",
                        reg.name,
                        self.event_name,
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
        summary
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
