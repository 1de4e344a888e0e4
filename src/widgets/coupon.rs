//! Checkout coupon form: apply, remove, and restore a session coupon.
//!
//! SYSTEM CONTEXT
//! ==============
//! The apply button posts the trimmed code from `#coupon-code`; the remove
//! button clears the session coupon. Both funnel the server's amounts through
//! [`render_totals`], as does restoration of a coupon the server already
//! holds for the session when the page loads.
//!
//! ERROR HANDLING
//! ==============
//! Outcomes are reported in `#coupon-message` as a dismissible alert that
//! clears itself after `coupon_message_ms`. A newer message replaces the
//! older one and cancels its clear timer. Rejections show the server's
//! `error` text; transport failures are logged and show the localized
//! failure text. Neither mutates the banner or the totals.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::toast::ToastKind;
use super::totals::{OrderTotals, SUBTOTAL_SELECTOR, parse_amount, render_totals};
use super::{Binding, failure_text};
use crate::config::StoreConfig;
use crate::dom::{Dom, EventKind, Listener, Target};
use crate::env::Env;
use crate::net::api;
use crate::net::types::{AppliedCoupon, DiscountType};
use crate::runtime::{TimerHandle, Timers};

#[cfg(test)]
#[path = "coupon_test.rs"]
mod coupon_test;

pub const APPLY_SELECTOR: &str = "#apply-coupon";
pub const CODE_SELECTOR: &str = "#coupon-code";
pub const REMOVE_SELECTOR: &str = "#remove-coupon";
pub const BANNER_SELECTOR: &str = "#applied-coupon";
pub const DISCOUNT_TEXT_SELECTOR: &str = "#coupon-discount-text";
pub const MESSAGE_SELECTOR: &str = "#coupon-message";
/// Banner attribute carrying the discount of a coupon already in the session.
pub const SESSION_DISCOUNT_ATTR: &str = "data-coupon-discount";
const SUBTOTAL_ATTR: &str = "data-subtotal";
const HIDDEN: &str = "d-none";

/// Banner label for an applied coupon, e.g. `خصم 10%` or `خصم 25`.
#[must_use]
pub fn discount_text(label: &str, coupon: &AppliedCoupon) -> String {
    match coupon.discount_type {
        DiscountType::Percentage => format!("{label} {}%", coupon.discount_value),
        DiscountType::Fixed => format!("{label} {}", coupon.discount_value),
    }
}

/// The self-clearing alert slot.
struct MessageSlot<D: Dom> {
    dom: Rc<D>,
    timers: Rc<dyn Timers>,
    ttl: Duration,
    clear_timer: RefCell<Option<TimerHandle>>,
}

impl<D: Dom + 'static> MessageSlot<D> {
    fn new(env: &Env<D>) -> Self {
        Self {
            dom: Rc::clone(&env.dom),
            timers: Rc::clone(&env.timers),
            ttl: env.config.coupon_message_ttl(),
            clear_timer: RefCell::new(None),
        }
    }

    fn show(&self, text: &str, kind: ToastKind) {
        let dom = self.dom.as_ref();
        let Some(slot) = dom.query(MESSAGE_SELECTOR) else {
            log::debug!("no {MESSAGE_SELECTOR}; coupon message dropped: {text}");
            return;
        };
        dom.clear_children(&slot);
        if let Some(alert) = build_alert(dom, text, kind) {
            dom.append_child(&slot, &alert);
        }

        let clear_dom = Rc::clone(&self.dom);
        let timer = self.timers.set_timeout(self.ttl, Box::new(move || clear_dom.clear_children(&slot)));
        *self.clear_timer.borrow_mut() = Some(timer);
    }
}

fn build_alert<D: Dom>(dom: &D, text: &str, kind: ToastKind) -> Option<D::Node> {
    let alert = dom.create_with_class("div", &format!("alert alert-{} alert-dismissible fade show", kind.suffix()))?;
    dom.set_attribute(&alert, "role", "alert");
    dom.set_text(&alert, text);
    let close = dom.create_with_class("button", "btn-close")?;
    dom.set_attribute(&close, "type", "button");
    dom.set_attribute(&close, "data-bs-dismiss", "alert");
    dom.set_attribute(&close, "aria-label", "Close");
    dom.append_child(&alert, &close);
    Some(alert)
}

fn show_banner<D: Dom>(dom: &D, text: &str) {
    if let Some(banner) = dom.query(BANNER_SELECTOR) {
        dom.remove_class(&banner, HIDDEN);
    }
    if let Some(label) = dom.query(DISCOUNT_TEXT_SELECTOR) {
        dom.set_text(&label, text);
    }
}

async fn apply<D: Dom + 'static>(env: Env<D>, slot: Rc<MessageSlot<D>>, code: String) {
    let messages = &env.config.messages;
    match api::apply_coupon(env.http.as_ref(), env.csrf_token(), &code).await {
        Ok(applied) => {
            let dom = env.dom.as_ref();
            show_banner(dom, &discount_text(&messages.discount_label, &applied.coupon));
            if let Some(input) = dom.query(CODE_SELECTOR) {
                dom.set_value(&input, "");
            }
            let totals =
                OrderTotals { subtotal: applied.cart_total, shipping: env.config.shipping, discount: applied.coupon.discount };
            totals.check_against(applied.new_total);
            render_totals(dom, &totals);
            slot.show(&messages.coupon_applied, ToastKind::Success);
        }
        Err(err) => slot.show(&failure_text("coupon apply", &err, &messages.coupon_apply_failed), ToastKind::Danger),
    }
}

async fn remove<D: Dom + 'static>(env: Env<D>, slot: Rc<MessageSlot<D>>) {
    let messages = &env.config.messages;
    match api::remove_coupon(env.http.as_ref(), env.csrf_token()).await {
        Ok(removed) => {
            let dom = env.dom.as_ref();
            if let Some(banner) = dom.query(BANNER_SELECTOR) {
                dom.add_class(&banner, HIDDEN);
            }
            let totals = OrderTotals { subtotal: removed.cart_total, shipping: env.config.shipping, discount: 0.0 };
            totals.check_against(removed.new_total);
            render_totals(dom, &totals);
            slot.show(&messages.coupon_removed, ToastKind::Info);
        }
        Err(err) => slot.show(&failure_text("coupon remove", &err, &messages.coupon_remove_failed), ToastKind::Danger),
    }
}

/// Show the coupon the server already applied to this session, if the page
/// says there is one. Returns whether a coupon was restored.
pub fn restore_session_coupon<D: Dom>(dom: &D, config: &StoreConfig) -> bool {
    let Some(banner) = dom.query(BANNER_SELECTOR) else {
        return false;
    };
    let Some(raw_discount) = dom.attribute(&banner, SESSION_DISCOUNT_ATTR) else {
        return false;
    };
    let Some(discount) = parse_amount(&raw_discount) else {
        log::warn!("unreadable session coupon discount {raw_discount:?}");
        return false;
    };
    show_banner(dom, &format!("{} {}", config.messages.discount_label, raw_discount.trim()));

    let subtotal = dom.query(SUBTOTAL_SELECTOR).and_then(|node| {
        dom.attribute(&node, SUBTOTAL_ATTR).and_then(|raw| parse_amount(&raw)).or_else(|| parse_amount(&dom.text(&node)))
    });
    match subtotal {
        Some(subtotal) => render_totals(dom, &OrderTotals { subtotal, shipping: config.shipping, discount }),
        None => log::warn!("session coupon restored without a readable subtotal; totals left as rendered"),
    }
    true
}

fn bind_apply<D: Dom + 'static>(env: &Env<D>, slot: &Rc<MessageSlot<D>>) -> Option<Listener> {
    let button = env.dom.query(APPLY_SELECTOR)?;
    let input = env.dom.query(CODE_SELECTOR)?;
    let env_for_click = env.clone();
    let slot = Rc::clone(slot);
    Some(env.dom.listen(
        Target::Node(&button),
        EventKind::Click,
        Box::new(move |_| {
            let code = env_for_click.dom.value(&input).trim().to_owned();
            if code.is_empty() {
                slot.show(&env_for_click.config.messages.coupon_code_required, ToastKind::Danger);
                return;
            }
            env_for_click.spawn(apply(env_for_click.clone(), Rc::clone(&slot), code));
        }),
    ))
}

fn bind_remove<D: Dom + 'static>(env: &Env<D>, slot: &Rc<MessageSlot<D>>) -> Option<Listener> {
    let button = env.dom.query(REMOVE_SELECTOR)?;
    let env_for_click = env.clone();
    let slot = Rc::clone(slot);
    Some(env.dom.listen(
        Target::Node(&button),
        EventKind::Click,
        Box::new(move |_| env_for_click.spawn(remove(env_for_click.clone(), Rc::clone(&slot)))),
    ))
}

pub fn bind<D: Dom + 'static>(env: &Env<D>) -> Binding {
    if restore_session_coupon(env.dom.as_ref(), &env.config) {
        log::debug!("session coupon restored");
    }
    let slot = Rc::new(MessageSlot::new(env));
    let listeners = [bind_apply(env, &slot), bind_remove(env, &slot)].into_iter().flatten().collect();
    Binding::new("coupon", listeners)
}
