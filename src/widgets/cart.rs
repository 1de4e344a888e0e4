//! Header cart badge and the add-to-cart action.

use super::toast::{ToastKind, show_toast};
use super::{Binding, failure_text};
use crate::dom::{Display, Dom};
use crate::env::Env;
use crate::error::ActionError;
use crate::net::api;

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

pub const COUNT_SELECTOR: &str = ".cart-count";

/// Show `count` in every cart badge; zero hides them.
pub fn update_cart_count<D: Dom>(dom: &D, count: u32) {
    for badge in dom.query_all(COUNT_SELECTOR) {
        if count > 0 {
            dom.set_text(&badge, &count.to_string());
            dom.set_display(&badge, Display::InlineBlock);
        } else {
            dom.set_display(&badge, Display::None);
        }
    }
}

/// Add a product to the cart, refresh the badges and toast the outcome.
///
/// Returns the server's new cart count; a response without one leaves the
/// badges as they are.
///
/// # Errors
///
/// `Rejected` when the server refused the item, transport tier when the call
/// failed. The user has already been notified either way.
pub async fn add_to_cart<D: Dom>(env: &Env<D>, product_id: u64, quantity: u32) -> Result<Option<u32>, ActionError> {
    let messages = &env.config.messages;
    match api::add_to_cart(env.http.as_ref(), env.csrf_token(), product_id, quantity).await {
        Ok(response) => {
            if let Some(count) = response.cart_count {
                update_cart_count(env.dom.as_ref(), count);
            }
            show_toast(env.dom.as_ref(), &messages.added_to_cart, ToastKind::Success);
            Ok(response.cart_count)
        }
        Err(err) => {
            let text = failure_text("add to cart", &err, &messages.generic_error);
            show_toast(env.dom.as_ref(), &text, ToastKind::Danger);
            Err(err)
        }
    }
}

/// The cart has no page listeners of its own; add-to-cart is invoked by page
/// scripts. Binding only logs how many badges the page rendered.
pub fn bind<D: Dom + 'static>(env: &Env<D>) -> Binding {
    log::debug!("cart badges on page: {}", env.dom.query_all(COUNT_SELECTOR).len());
    Binding::empty("cart")
}
