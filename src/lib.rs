//! Interaction layer for the server-rendered storefront.
//!
//! This crate is compiled to WebAssembly and loaded on every store page. It
//! binds the page's widgets (carousel, gallery, quantity steppers, payment
//! and address forms, wishlist buttons, live search, cart badge, checkout
//! coupon form) to server-rendered markup and talks to the store's JSON
//! endpoints. All widget logic is written against injected capabilities so
//! it runs natively under test with an in-memory document, scripted HTTP and
//! a virtual clock.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Binds every widget once the document is parsed |
//! | [`widgets`] | One binder per page behavior |
//! | [`dom`] | Document capability (`Dom`) and its event model |
//! | [`net`] | Request model, response types, typed endpoint calls |
//! | [`runtime`] | Timers, task spawning, and the search debounce |
//! | [`env`] | Capability bundle handed to binders |
//! | [`config`] | Page-embedded configuration and localized messages |
//! | [`error`] | Action and configuration errors |
//! | [`util`] | Cookie lookup |
//!
//! The `hydrate` feature adds the browser implementations and the wasm start
//! hook.

pub mod app;
pub mod config;
pub mod dom;
pub mod env;
pub mod error;
pub mod net;
pub mod runtime;
pub mod util;
pub mod widgets;

#[cfg(feature = "hydrate")]
mod boot;
#[cfg(test)]
mod testing;
