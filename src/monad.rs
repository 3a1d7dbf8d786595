//! Short-circuiting accumulator for sequential fallible steps.

use crate::{Error, Result};

/// Runs a sequence of fallible steps, stopping at the first failure while
/// still running registered cleanups.
///
/// Two states: *ok* and *failed*. [`maybe`](Monad::maybe) runs its step
/// only in the ok state and stores the first failure; [`defer`](Monad::defer)
/// queues a cleanup in the ok state; [`err`](Monad::err) runs every queued
/// cleanup in registration order, exactly once, and returns the stored
/// failure if any. Cleanups registered before the failing step run even
/// when a later step fails, which is the point: register the cleanup for a
/// resource immediately after acquiring it and stop bookkeeping "how far
/// did we get".
///
/// Each call consumes and returns the accumulator, so a sequence threads it
/// forward:
///
/// ```rust
/// use errkind::maybe;
///
/// let result = maybe(|| Ok(()))
///     .defer(|| { /* release the lease */ })
///     .maybe(|| Ok(()))
///     .err();
/// assert!(result.is_ok());
/// ```
///
/// The accumulator is a single-threaded sequencing helper local to one call
/// sequence; it is not meant to be shared.
#[derive(Default)]
pub struct Monad {
    err: Option<Error>,
    defers: Vec<Box<dyn FnOnce()>>,
}

/// Starts a sequence with its first step.
pub fn maybe(step: impl FnOnce() -> Result<()>) -> Monad {
    Monad::new().maybe(step)
}

impl Monad {
    pub fn new() -> Monad {
        Monad::default()
    }

    /// Runs `step` unless a previous step already failed.
    pub fn maybe(mut self, step: impl FnOnce() -> Result<()>) -> Monad {
        if self.err.is_none() {
            if let Err(e) = step() {
                self.err = Some(e);
            }
        }
        self
    }

    /// Queues `cleanup` to run at [`err`](Monad::err). No-op once a step
    /// has failed; cleanups queued before the failure stay queued.
    pub fn defer(mut self, cleanup: impl FnOnce() + 'static) -> Monad {
        if self.err.is_none() {
            self.defers.push(Box::new(cleanup));
        }
        self
    }

    /// Runs every queued cleanup in registration order, then returns the
    /// first failure or `Ok(())`.
    pub fn err(self) -> Result<()> {
        for cleanup in self.defers {
            cleanup();
        }
        match self.err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
