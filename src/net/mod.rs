//! Networking for the store's JSON endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines the request model and transport capability, `types` the
//! response schema, and `api` one typed async function per endpoint.

pub mod api;
#[cfg(test)]
pub mod fake;
pub mod http;
pub mod types;
