//! Page widgets, one binder per behavior.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each `bind` function looks up its server-rendered elements, attaches
//! listeners, and returns a [`Binding`]. A widget whose elements are absent
//! from the current page binds nothing; that is the normal case on pages
//! that do not render it.
//!
//! | Widget | Elements | Network |
//! |--------|----------|---------|
//! | [`carousel`] | `#mainCarousel` | none |
//! | [`gallery`] | `.product-thumbnail`, `.product-image` | none |
//! | [`quantity`] | `.quantity-selector` | none |
//! | [`payment`] | `.payment-method`, `#payment_method` | none |
//! | [`address`] | `#same_as_shipping`, `.billing-address-field` | none |
//! | [`wishlist`] | `.wishlist-btn[data-product-id]` | wishlist toggle |
//! | [`search`] | `#search-input`, `#search-results` | product search |
//! | [`cart`] | `.cart-count` | add to cart |
//! | [`coupon`] | checkout coupon form and order summary | coupon apply/remove |

pub mod address;
pub mod carousel;
pub mod cart;
pub mod coupon;
pub mod gallery;
pub mod payment;
pub mod quantity;
pub mod search;
pub mod toast;
pub mod totals;
pub mod wishlist;

use crate::dom::Listener;
use crate::error::ActionError;

/// Listeners (and timers) owned by one bound widget. Dropping detaches them.
#[derive(Debug)]
pub struct Binding {
    name: &'static str,
    listeners: Vec<Listener>,
}

impl Binding {
    #[must_use]
    pub fn new(name: &'static str, listeners: Vec<Listener>) -> Self {
        Self { name, listeners }
    }

    #[must_use]
    pub fn empty(name: &'static str) -> Self {
        Self::new(name, Vec::new())
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Text to show for a failed action, logging transport-tier failures.
///
/// Rejections show the server's message when it sent one. Transport failures,
/// and rejections without a message, show `retry_text`.
fn failure_text(context: &str, err: &ActionError, retry_text: &str) -> String {
    if err.is_transport() {
        log::error!("{context}: {err}");
        return retry_text.to_owned();
    }
    log::debug!("{context}: {err}");
    err.server_message().unwrap_or(retry_text).to_owned()
}
