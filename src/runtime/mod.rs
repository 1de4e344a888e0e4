//! Timer and task capabilities for the single-threaded page runtime.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything runs on the page's event loop. Network continuations are local
//! (`!Send`) futures handed to a [`Spawner`]; delayed work goes through
//! [`Timers`]. Both are injected so tests can drive virtual time and run the
//! executor to quiescence deterministically.

#[cfg(feature = "hydrate")]
pub mod browser;
#[cfg(test)]
pub mod fake;


use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Pending one-shot timer. Dropping the handle cancels the callback.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle").finish_non_exhaustive()
    }
}

/// Schedules one-shot callbacks.
pub trait Timers {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Runs local futures to completion on the page's event loop.
pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Cancel-previous, schedule-new delay.
///
/// Each [`Debouncer::schedule`] replaces the pending callback, so the action
/// only runs once the caller has been quiet for the full delay.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TimerHandle>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn schedule(&mut self, timers: &dyn Timers, action: impl FnOnce() + 'static) {
        self.pending = None;
        self.pending = Some(timers.set_timeout(self.delay, Box::new(action)));
    }

    /// Drop the pending action, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
