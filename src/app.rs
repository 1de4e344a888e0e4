//! Page initialization: bind every widget once the document is parsed.

use crate::dom::Dom;
use crate::env::Env;
use crate::widgets::{self, Binding};

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

/// Every widget binding made for the current page. Dropping it detaches all
/// listeners.
#[derive(Debug, Default)]
pub struct Bindings {
    widgets: Vec<Binding>,
}

impl Bindings {
    /// Total listeners attached across widgets.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.widgets.iter().map(Binding::len).sum()
    }

    /// Names of widgets that attached at least one listener.
    #[must_use]
    pub fn active(&self) -> Vec<&'static str> {
        self.widgets.iter().filter(|binding| !binding.is_empty()).map(Binding::name).collect()
    }
}

/// Bind all widgets against the current document.
pub fn init<D: Dom + 'static>(env: &Env<D>) -> Bindings {
    let widgets = vec![
        widgets::carousel::bind(env),
        widgets::gallery::bind(env),
        widgets::quantity::bind(env),
        widgets::payment::bind(env),
        widgets::address::bind(env),
        widgets::wishlist::bind(env),
        widgets::search::bind(env),
        widgets::cart::bind(env),
        widgets::coupon::bind(env),
    ];
    let bindings = Bindings { widgets };
    log::info!("storefront ready: {} listeners ({})", bindings.listener_count(), bindings.active().join(", "));
    bindings
}
