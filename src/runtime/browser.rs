//! Browser timers (`gloo-timers`) and task spawning (`wasm-bindgen-futures`).

use std::time::Duration;

use futures::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;

use super::{Spawner, TimerHandle, Timers};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

impl Timers for BrowserTimers {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, callback);
        TimerHandle::new(move || drop(timeout))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSpawner;

impl Spawner for BrowserSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
