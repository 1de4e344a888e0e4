//! Wishlist heart buttons.
//!
//! ERROR HANDLING
//! ==============
//! The button's `active` class flips only after the server confirms. A
//! rejection toasts the server's message; a transport failure is logged and
//! toasts the generic retry text. Neither touches the button.

use super::toast::{ToastKind, show_toast};
use super::{Binding, failure_text};
use crate::dom::{Dom, EventKind, Target};
use crate::env::Env;
use crate::net::api;

#[cfg(test)]
#[path = "wishlist_test.rs"]
mod wishlist_test;

pub const BUTTON_SELECTOR: &str = ".wishlist-btn";
const PRODUCT_ID_ATTR: &str = "data-product-id";
const ACTIVE: &str = "active";

async fn toggle<D: Dom>(env: Env<D>, button: D::Node, product_id: String, listed: bool) {
    let messages = &env.config.messages;
    match api::toggle_wishlist(env.http.as_ref(), env.csrf_token(), &product_id, listed).await {
        Ok(ack) => {
            env.dom.toggle_class(&button, ACTIVE);
            let text = ack.message.unwrap_or_else(|| messages.wishlist_updated.clone());
            show_toast(env.dom.as_ref(), &text, ToastKind::Success);
        }
        Err(err) => {
            let text = failure_text("wishlist toggle", &err, &messages.generic_error);
            show_toast(env.dom.as_ref(), &text, ToastKind::Danger);
        }
    }
}

pub fn bind<D: Dom + 'static>(env: &Env<D>) -> Binding {
    let listeners = env
        .dom
        .query_all(BUTTON_SELECTOR)
        .into_iter()
        .filter_map(|button| {
            let Some(product_id) = env.dom.attribute(&button, PRODUCT_ID_ATTR) else {
                log::warn!("wishlist button without {PRODUCT_ID_ATTR}; skipped");
                return None;
            };
            let env_for_click = env.clone();
            let this = button.clone();
            Some(env.dom.listen(
                Target::Node(&button),
                EventKind::Click,
                Box::new(move |event| {
                    event.prevent_default();
                    let listed = env_for_click.dom.has_class(&this, ACTIVE);
                    let task = toggle(env_for_click.clone(), this.clone(), product_id.clone(), listed);
                    env_for_click.spawn(task);
                }),
            ))
        })
        .collect();
    Binding::new("wishlist", listeners)
}
