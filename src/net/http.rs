//! Minimal request model and the HTTP capability.
//!
//! Client-side (hydrate): [`BrowserHttp`] sends through `gloo-net`.
//! Tests script responses through `net::fake::FakeHttp`.

use futures::future::LocalBoxFuture;

use crate::error::ActionError;

/// Header carrying the anti-forgery token on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    /// Already-encoded `application/x-www-form-urlencoded` payload.
    Form(String),
}

impl Body {
    #[must_use]
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Json(_) => Some("application/json"),
            Self::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }
}

/// One outgoing request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub csrf_token: Option<String>,
    pub body: Body,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), csrf_token: None, body: Body::Empty }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn with_csrf(mut self, token: Option<String>) -> Self {
        self.csrf_token = token;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }
}

/// Sends a request and yields the raw response body.
///
/// Status codes are not interpreted here: the store endpoints report logical
/// failures inside the body, and a non-JSON error page surfaces later as a
/// decode failure.
pub trait HttpClient {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'static, Result<String, ActionError>>;
}

#[cfg(feature = "hydrate")]
pub use self::browser_http::BrowserHttp;

#[cfg(feature = "hydrate")]
mod browser_http {
    use futures::FutureExt;
    use futures::future::LocalBoxFuture;
    use gloo_net::http::Request;

    use super::{ApiRequest, Body, CSRF_HEADER, HttpClient, Method};
    use crate::error::ActionError;

    fn transport(err: gloo_net::Error) -> ActionError {
        ActionError::Transport(err.to_string())
    }

    /// `fetch`-backed client for same-origin store endpoints.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserHttp;

    impl HttpClient for BrowserHttp {
        fn send(&self, request: ApiRequest) -> LocalBoxFuture<'static, Result<String, ActionError>> {
            async move {
                let mut builder = match request.method {
                    Method::Get => Request::get(&request.path),
                    Method::Post => Request::post(&request.path),
                    Method::Delete => Request::delete(&request.path),
                };
                if let Some(token) = request.csrf_token.as_deref() {
                    builder = builder.header(CSRF_HEADER, token);
                }
                if let Some(content_type) = request.body.content_type() {
                    builder = builder.header("Content-Type", content_type);
                }
                let prepared = match request.body {
                    Body::Empty => builder.build(),
                    Body::Json(value) => builder.body(value.to_string()),
                    Body::Form(encoded) => builder.body(encoded),
                }
                .map_err(transport)?;
                let response = prepared.send().await.map_err(transport)?;
                let status = response.status();
                if !(200..300).contains(&status) {
                    log::debug!("{} answered {status} {}", request.path, response.status_text());
                }
                response.text().await.map_err(transport)
            }
            .boxed_local()
        }
    }
}
