//! Typed calls to the store's JSON endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Each call returns `Result<_, ActionError>`. A body that reports failure
//! (`success: false` or an `error` field) becomes `ActionError::Rejected`; a
//! body that does not parse becomes `ActionError::Decode`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::http::{ApiRequest, Body, HttpClient};
use super::types::{Ack, CartAddResponse, CouponApplied, CouponApplyResponse, CouponRemoved, SearchResponse, SearchResult};
use crate::error::ActionError;

pub const SEARCH_ENDPOINT: &str = "/api/products/search/";
pub const CART_ADD_ENDPOINT: &str = "/api/cart/add/";
pub const COUPON_APPLY_ENDPOINT: &str = "/api/coupons/api/apply/";
pub const COUPON_REMOVE_ENDPOINT: &str = "/api/coupons/api/remove/";

fn wishlist_endpoint(product_id: &str) -> String {
    format!("/api/wishlist/{}/", urlencoding::encode(product_id))
}

fn search_endpoint(query: &str) -> String {
    format!("{SEARCH_ENDPOINT}?q={}", urlencoding::encode(query))
}

fn coupon_form(code: &str) -> String {
    format!("code={}", urlencoding::encode(code))
}

async fn fetch_json<T: DeserializeOwned>(http: &dyn HttpClient, request: ApiRequest) -> Result<T, ActionError> {
    let body = http.send(request).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Add (`POST`) or remove (`DELETE`) a product from the wishlist.
///
/// # Errors
///
/// `Rejected` when the server answers `success: false`; transport tier otherwise.
pub async fn toggle_wishlist(
    http: &dyn HttpClient,
    csrf_token: Option<String>,
    product_id: &str,
    currently_listed: bool,
) -> Result<Ack, ActionError> {
    let path = wishlist_endpoint(product_id);
    let request = if currently_listed { ApiRequest::delete(path) } else { ApiRequest::post(path) };
    let ack: Ack = fetch_json(http, request.with_csrf(csrf_token)).await?;
    if !ack.success {
        return Err(ActionError::rejected(ack.message));
    }
    Ok(ack)
}

/// Search products by free text.
///
/// # Errors
///
/// Transport tier only; the endpoint has no logical failure the widget shows.
pub async fn search_products(http: &dyn HttpClient, query: &str) -> Result<Vec<SearchResult>, ActionError> {
    let response: SearchResponse = fetch_json(http, ApiRequest::get(search_endpoint(query))).await?;
    Ok(response.into_results())
}

/// Add `quantity` units of a product to the session cart.
///
/// # Errors
///
/// `Rejected` when the server answers `success: false`; transport tier otherwise.
pub async fn add_to_cart(
    http: &dyn HttpClient,
    csrf_token: Option<String>,
    product_id: u64,
    quantity: u32,
) -> Result<CartAddResponse, ActionError> {
    let payload = serde_json::json!({ "product_id": product_id, "quantity": quantity });
    let request = ApiRequest::post(CART_ADD_ENDPOINT).with_csrf(csrf_token).with_body(Body::Json(payload));
    let response: CartAddResponse = fetch_json(http, request).await?;
    if !response.success {
        return Err(ActionError::rejected(response.message));
    }
    Ok(response)
}

/// Apply a coupon code to the session cart.
///
/// # Errors
///
/// `Rejected` carrying the server's `error` text (or `message` when it
/// answers `success: false`); `Decode` when the body has
/// neither an error nor a coupon; transport tier otherwise.
pub async fn apply_coupon(
    http: &dyn HttpClient,
    csrf_token: Option<String>,
    code: &str,
) -> Result<CouponApplied, ActionError> {
    let request = ApiRequest::post(COUPON_APPLY_ENDPOINT).with_csrf(csrf_token).with_body(Body::Form(coupon_form(code)));
    let response: CouponApplyResponse = fetch_json(http, request).await?;
    if let Some(error) = response.error {
        return Err(ActionError::rejected(Some(error)));
    }
    if response.success == Some(false) {
        return Err(ActionError::rejected(response.message));
    }
    let coupon = response.coupon.ok_or_else(|| ActionError::Decode("apply response has no coupon".to_owned()))?;
    Ok(CouponApplied { coupon, cart_total: response.cart_total, new_total: response.new_total })
}

/// Remove the session coupon.
///
/// # Errors
///
/// Transport tier only.
pub async fn remove_coupon(http: &dyn HttpClient, csrf_token: Option<String>) -> Result<CouponRemoved, ActionError> {
    let request = ApiRequest::post(COUPON_REMOVE_ENDPOINT)
        .with_csrf(csrf_token)
        .with_body(Body::Form(String::new()));
    fetch_json(http, request).await
}
