//! Checkout payment-method cards.

use std::rc::Rc;

use super::Binding;
use crate::dom::{Dom, EventKind, Target};
use crate::env::Env;

#[cfg(test)]
#[path = "payment_test.rs"]
mod payment_test;

pub const METHOD_SELECTOR: &str = ".payment-method";
pub const FIELD_SELECTOR: &str = "#payment_method";
const SELECTED: &str = "selected";

/// Clicking a card marks it `selected` and copies its `data-method` into the
/// hidden form field.
pub fn bind<D: Dom + 'static>(env: &Env<D>) -> Binding {
    let methods = Rc::new(env.dom.query_all(METHOD_SELECTOR));
    let field = env.dom.query(FIELD_SELECTOR);
    if field.is_none() && !methods.is_empty() {
        log::warn!("payment methods rendered without {FIELD_SELECTOR}");
    }

    let listeners = methods
        .iter()
        .map(|method| {
            let dom = Rc::clone(&env.dom);
            let all = Rc::clone(&methods);
            let field = field.clone();
            let this = method.clone();
            env.dom.listen(
                Target::Node(method),
                EventKind::Click,
                Box::new(move |_| {
                    for other in all.iter() {
                        dom.remove_class(other, SELECTED);
                    }
                    dom.add_class(&this, SELECTED);
                    if let (Some(field), Some(choice)) = (&field, dom.attribute(&this, "data-method")) {
                        dom.set_value(field, &choice);
                    }
                }),
            )
        })
        .collect();
    Binding::new("payment", listeners)
}
