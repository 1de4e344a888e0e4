//! Checkout order summary: subtotal, discount row and total.
//!
//! INVARIANTS
//! ==========
//! The displayed total is always `subtotal + shipping - discount` computed
//! here, whichever path (coupon response or page-load restoration) supplied
//! the inputs. The discount row is visible exactly when `discount > 0`.

use crate::dom::Dom;

#[cfg(test)]
#[path = "totals_test.rs"]
mod totals_test;

pub const SUBTOTAL_SELECTOR: &str = "#subtotal";
pub const TOTAL_SELECTOR: &str = "#total";
pub const DISCOUNT_ROW_SELECTOR: &str = "#coupon-discount-row";
pub const DISCOUNT_VALUE_SELECTOR: &str = "#coupon-discount-value";
const HIDDEN: &str = "d-none";
/// Server and local totals closer than this are the same amount.
const TOTAL_TOLERANCE: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub shipping: f64,
    pub discount: f64,
}

impl OrderTotals {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.subtotal + self.shipping - self.discount
    }

    /// Compare against a server-computed total, logging a mismatch.
    pub fn check_against(&self, server_total: f64) {
        let local = self.total();
        if (local - server_total).abs() > TOTAL_TOLERANCE {
            log::warn!("server total {server_total:.2} differs from computed {local:.2}; showing computed");
        }
    }
}

/// `true` when `amount` sits exactly halfway between two cents. Only
/// multiples of 1/8 can, so both scalings below are exact.
#[allow(clippy::float_cmp)]
fn is_half_cent_tie(amount: f64) -> bool {
    (amount * 8.0).fract() == 0.0 && (amount * 100.0).fract().abs() == 0.5
}

/// Two-decimal rendering. Exact half-cent ties round away from zero, as
/// browser `toFixed(2)` does; negative zero prints as `0.00`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let amount = if is_half_cent_tie(amount) { (amount * 100.0).round() / 100.0 } else { amount };
    let text = format!("{amount:.2}");
    if text == "-0.00" { "0.00".to_owned() } else { text }
}

/// Parse an amount rendered by the server, tolerating surrounding text such
/// as a currency suffix or thousands separators.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-')).collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Write all order-summary fields the page rendered.
pub fn render_totals<D: Dom>(dom: &D, totals: &OrderTotals) {
    if let Some(subtotal) = dom.query(SUBTOTAL_SELECTOR) {
        dom.set_text(&subtotal, &format_amount(totals.subtotal));
    }
    if let Some(row) = dom.query(DISCOUNT_ROW_SELECTOR) {
        if totals.discount > 0.0 {
            dom.remove_class(&row, HIDDEN);
            if let Some(value) = dom.query(DISCOUNT_VALUE_SELECTOR) {
                dom.set_text(&value, &format!("-{}", format_amount(totals.discount)));
            }
        } else {
            dom.add_class(&row, HIDDEN);
        }
    }
    if let Some(total) = dom.query(TOTAL_SELECTOR) {
        dom.set_text(&total, &format_amount(totals.total()));
    }
}
