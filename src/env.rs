//! Capability bundle handed to every widget binder.

use std::future::Future;
use std::rc::Rc;

use crate::config::StoreConfig;
use crate::dom::Dom;
use crate::net::http::HttpClient;
use crate::runtime::{Spawner, Timers};
use crate::util::cookie::read_cookie;

/// Document, network, timers, task spawning, and configuration.
pub struct Env<D: Dom> {
    pub dom: Rc<D>,
    pub http: Rc<dyn HttpClient>,
    pub timers: Rc<dyn Timers>,
    pub tasks: Rc<dyn Spawner>,
    pub config: Rc<StoreConfig>,
}

impl<D: Dom> Clone for Env<D> {
    fn clone(&self) -> Self {
        Self {
            dom: Rc::clone(&self.dom),
            http: Rc::clone(&self.http),
            timers: Rc::clone(&self.timers),
            tasks: Rc::clone(&self.tasks),
            config: Rc::clone(&self.config),
        }
    }
}

impl<D: Dom> Env<D> {
    /// Anti-forgery token from the configured cookie.
    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        read_cookie(&self.dom.cookies(), &self.config.csrf_cookie)
    }

    /// Run a network continuation on the page's executor.
    pub fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        self.tasks.spawn(Box::pin(task));
    }
}
