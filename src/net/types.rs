//! Response shapes of the store's JSON endpoints.
//!
//! Every struct defaults missing fields so a partial body still parses; the
//! action layer decides what absence means.

use serde::Deserialize;

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

/// `{success, message}` acknowledgement (wishlist toggle).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Ack {
    pub success: bool,
    pub message: Option<String>,
}

/// Add-to-cart response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CartAddResponse {
    pub success: bool,
    pub cart_count: Option<u32>,
    pub message: Option<String>,
}

/// One product in a search response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub name: String,
    /// Number or decimal string depending on the serializer.
    pub price: serde_json::Value,
    #[serde(alias = "image_url")]
    pub image: Option<String>,
    pub slug: Option<String>,
}

impl SearchResult {
    /// Price as displayed: numbers verbatim, strings as sent, absent as empty.
    #[must_use]
    pub fn price_label(&self) -> String {
        match &self.price {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Search responses come paginated (`{results: [...]}`) or as a bare list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Page {
        #[serde(default)]
        results: Vec<SearchResult>,
    },
    List(Vec<SearchResult>),
}

impl SearchResponse {
    #[must_use]
    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            Self::Page { results } | Self::List(results) => results,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    #[default]
    #[serde(other)]
    Fixed,
}

/// Coupon details echoed by the apply endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppliedCoupon {
    pub code: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    /// Currency amount taken off the subtotal.
    pub discount: f64,
}

/// Raw apply-coupon body: either `error` or the coupon plus totals.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CouponApplyResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub coupon: Option<AppliedCoupon>,
    pub cart_total: f64,
    pub new_total: f64,
}

/// Successful coupon application.
#[derive(Clone, Debug, PartialEq)]
pub struct CouponApplied {
    pub coupon: AppliedCoupon,
    pub cart_total: f64,
    pub new_total: f64,
}

/// Remove-coupon body.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CouponRemoved {
    pub cart_total: f64,
    pub new_total: f64,
}
