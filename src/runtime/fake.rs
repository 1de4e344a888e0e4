//! Virtual clock and local executor for tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use super::{Spawner, TimerHandle, Timers};

struct Scheduled {
    id: u64,
    due: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: RefCell<Vec<Scheduled>>,
}

/// Timers that only fire when the test advances the clock.
#[derive(Clone, Default)]
pub struct VirtualTimers {
    clock: Rc<Clock>,
}

impl VirtualTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now.get()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock.queue.borrow().len()
    }

    /// Move the clock forward, firing due callbacks in deadline order.
    /// Callbacks scheduled while advancing fire too if they fall due in range.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let next = {
                let mut queue = self.clock.queue.borrow_mut();
                let earliest = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.due <= target)
                    .min_by_key(|(_, s)| (s.due, s.id))
                    .map(|(index, _)| index);
                earliest.map(|index| queue.remove(index))
            };
            let Some(scheduled) = next else {
                break;
            };
            self.clock.now.set(scheduled.due);
            (scheduled.callback)();
        }
        self.clock.now.set(target);
    }
}

impl Timers for VirtualTimers {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let id = self.clock.next_id.get();
        self.clock.next_id.set(id + 1);
        let due = self.now() + delay;
        self.clock.queue.borrow_mut().push(Scheduled { id, due, callback });
        let clock = Rc::clone(&self.clock);
        TimerHandle::new(move || clock.queue.borrow_mut().retain(|s| s.id != id))
    }
}

/// Spawner backed by a [`LocalPool`] the test runs explicitly.
#[derive(Clone)]
pub struct PoolSpawner {
    spawner: LocalSpawner,
}

impl PoolSpawner {
    #[must_use]
    pub fn new(pool: &LocalPool) -> Self {
        Self { spawner: pool.spawner() }
    }
}

impl Spawner for PoolSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(err) = self.spawner.spawn_local(task) {
            log::error!("test executor rejected task: {err}");
        }
    }
}
