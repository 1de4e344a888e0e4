//! Browser entry points: the wasm start hook and the functions page scripts
//! call directly (`addToCart`, `updateCartCount`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The start hook installs the panic hook and console logger, reads the
//! page's configuration block, and binds widgets as soon as the document is
//! parsed. The capability bundle and the bindings live in a thread-local for
//! the lifetime of the page so exported functions can reach them.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::app::{self, Bindings};
use crate::config::StoreConfig;
use crate::dom::browser::BrowserDom;
use crate::dom::{Dom, EventKind, Listener, Target};
use crate::env::Env;
use crate::net::http::BrowserHttp;
use crate::runtime::browser::{BrowserSpawner, BrowserTimers};
use crate::widgets::cart;

struct Page {
    env: Env<BrowserDom>,
    bindings: Option<Bindings>,
    /// `DOMContentLoaded` hook while the document is still loading.
    _ready: Option<Listener>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

fn install_logger(config: &StoreConfig) {
    let level = match config.log_filter() {
        Ok(filter) => filter.to_level(),
        Err(_) => Some(log::Level::Info),
    };
    if let Some(level) = level {
        if let Err(err) = console_log::init_with_level(level) {
            web_sys::console::warn_1(&format!("logger already installed: {err}").into());
        }
    }
}

fn bind_widgets() {
    PAGE.with_borrow_mut(|page| {
        if let Some(page) = page {
            if page.bindings.is_none() {
                page.bindings = Some(app::init(&page.env));
            }
        }
    });
}

fn current_env() -> Option<Env<BrowserDom>> {
    PAGE.with_borrow(|page| page.as_ref().map(|page| page.env.clone()))
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let Some(dom) = BrowserDom::from_window() else {
        web_sys::console::warn_1(&"storefront: no document; widgets not bound".into());
        return;
    };

    let loaded = StoreConfig::load(&dom);
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => StoreConfig::default(),
    };
    install_logger(&config);
    if let Err(err) = loaded {
        log::warn!("{err}; using defaults");
    }

    let loading = dom.is_loading();
    let env = Env {
        dom: Rc::new(dom),
        http: Rc::new(BrowserHttp),
        timers: Rc::new(BrowserTimers),
        tasks: Rc::new(BrowserSpawner),
        config: Rc::new(config),
    };
    let ready = loading.then(|| {
        env.dom.listen(Target::Document, EventKind::DomContentLoaded, Box::new(|_| bind_widgets()))
    });
    PAGE.with_borrow_mut(|page| *page = Some(Page { env, bindings: None, _ready: ready }));
    if !loading {
        bind_widgets();
    }
}

/// `addToCart(productId, quantity = 1)` for inline page scripts.
#[wasm_bindgen(js_name = addToCart)]
pub fn add_to_cart(product_id: u32, quantity: Option<u32>) {
    let Some(env) = current_env() else {
        log::warn!("addToCart called before start");
        return;
    };
    let task_env = env.clone();
    env.spawn(async move {
        if let Err(err) = cart::add_to_cart(&task_env, u64::from(product_id), quantity.unwrap_or(1)).await {
            log::debug!("add to cart for product {product_id} did not complete: {err}");
        }
    });
}

/// `updateCartCount(count)` for inline page scripts.
#[wasm_bindgen(js_name = updateCartCount)]
pub fn update_cart_count(count: u32) {
    match current_env() {
        Some(env) => cart::update_cart_count(env.dom.as_ref(), count),
        None => log::warn!("updateCartCount called before start"),
    }
}

