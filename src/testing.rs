//! Shared wiring for widget tests: fake document, scripted HTTP, virtual
//! clock, and a local executor run to quiescence on demand.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::executor::LocalPool;

use crate::config::StoreConfig;
use crate::dom::fake::FakeDom;
use crate::env::Env;
use crate::net::fake::FakeHttp;
use crate::net::http::HttpClient;
use crate::runtime::Timers;
use crate::runtime::fake::{PoolSpawner, VirtualTimers};

pub struct Harness {
    pub dom: Rc<FakeDom>,
    pub http: Rc<FakeHttp>,
    pub timers: Rc<VirtualTimers>,
    pub env: Env<FakeDom>,
    pool: RefCell<LocalPool>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let pool = LocalPool::new();
        let dom = Rc::new(FakeDom::new());
        let http = Rc::new(FakeHttp::new());
        let timers = Rc::new(VirtualTimers::new());
        let http_client: Rc<dyn HttpClient> = http.clone();
        let clock: Rc<dyn Timers> = timers.clone();
        let env = Env {
            dom: Rc::clone(&dom),
            http: http_client,
            timers: clock,
            tasks: Rc::new(PoolSpawner::new(&pool)),
            config: Rc::new(config),
        };
        Self { dom, http, timers, env, pool: RefCell::new(pool) }
    }

    /// Run spawned tasks until none can make progress.
    pub fn settle(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Advance virtual time, then settle any tasks the timers spawned.
    pub fn advance_ms(&self, millis: u64) {
        self.timers.advance(Duration::from_millis(millis));
        self.settle();
    }
}
