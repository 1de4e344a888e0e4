//! Scripted HTTP client for tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use super::http::{ApiRequest, HttpClient};
use crate::error::ActionError;

/// Answers requests from a FIFO script and records what was sent.
#[derive(Default)]
pub struct FakeHttp {
    script: RefCell<VecDeque<Result<String, ActionError>>>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl FakeHttp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_json(&self, body: serde_json::Value) {
        self.script.borrow_mut().push_back(Ok(body.to_string()));
    }

    pub fn respond_raw(&self, body: &str) {
        self.script.borrow_mut().push_back(Ok(body.to_owned()));
    }

    pub fn fail(&self, reason: &str) {
        self.script.borrow_mut().push_back(Err(ActionError::Transport(reason.to_owned())));
    }

    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl HttpClient for FakeHttp {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'static, Result<String, ActionError>> {
        self.sent.borrow_mut().push(request);
        let answer = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ActionError::Transport("no scripted response".to_owned())));
        futures::future::ready(answer).boxed_local()
    }
}
