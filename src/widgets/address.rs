//! "Billing same as shipping" checkbox.

use std::rc::Rc;

use super::Binding;
use crate::dom::{Display, Dom, EventKind, Target};
use crate::env::Env;

#[cfg(test)]
#[path = "address_test.rs"]
mod address_test;

pub const CHECKBOX_SELECTOR: &str = "#same_as_shipping";
pub const BILLING_FIELD_SELECTOR: &str = ".billing-address-field";
/// Form-group wrapper hidden along with each billing field.
pub const FIELD_GROUP_SELECTOR: &str = ".mb-3";

fn sync<D: Dom>(dom: &D, same_as_shipping: bool) {
    let display = if same_as_shipping { Display::None } else { Display::Block };
    for field in dom.query_all(BILLING_FIELD_SELECTOR) {
        if let Some(group) = dom.closest(&field, FIELD_GROUP_SELECTOR) {
            dom.set_display(&group, display);
        }
    }
}

pub fn bind<D: Dom + 'static>(env: &Env<D>) -> Binding {
    let Some(checkbox) = env.dom.query(CHECKBOX_SELECTOR) else {
        return Binding::empty("address");
    };
    if env.dom.is_checked(&checkbox) {
        sync(env.dom.as_ref(), true);
    }

    let dom = Rc::clone(&env.dom);
    let this = checkbox.clone();
    let listener = env.dom.listen(
        Target::Node(&checkbox),
        EventKind::Change,
        Box::new(move |_| sync(dom.as_ref(), dom.is_checked(&this))),
    );
    Binding::new("address", vec![listener])
}
