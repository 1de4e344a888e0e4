//! Store configuration embedded in the server-rendered page.
//!
//! The template may render
//! `<script type="application/json" id="storefront-config">{...}</script>`.
//! Every key is optional; absent keys keep the defaults below.
//!
//! Optional keys:
//! - `search_debounce_ms`: default 300
//! - `search_min_chars`: default 2
//! - `max_quantity`: default 999 (used when an input has no `max`)
//! - `shipping`: default 10.00
//! - `carousel_interval_ms` / `carousel_wrap`: default 5000 / true
//! - `coupon_message_ms`: default 5000
//! - `csrf_cookie`: default `csrftoken`
//! - `product_url_prefix`: default `/products/product/`
//! - `log_level`: default `info`
//! - `messages`: localized UI strings

use std::time::Duration;

use serde::Deserialize;

use crate::dom::Dom;
use crate::error::ConfigError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const CONFIG_SELECTOR: &str = "#storefront-config";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_SEARCH_MIN_CHARS: usize = 2;
pub const DEFAULT_MAX_QUANTITY: u32 = 999;
pub const DEFAULT_SHIPPING: f64 = 10.0;
pub const DEFAULT_CAROUSEL_INTERVAL_MS: u32 = 5000;
pub const DEFAULT_COUPON_MESSAGE_MS: u64 = 5000;
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";
pub const DEFAULT_PRODUCT_URL_PREFIX: &str = "/products/product/";

/// Localized strings shown to shoppers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub no_results: String,
    pub currency: String,
    pub generic_error: String,
    pub added_to_cart: String,
    pub wishlist_updated: String,
    pub coupon_code_required: String,
    pub coupon_applied: String,
    pub coupon_removed: String,
    pub coupon_apply_failed: String,
    pub coupon_remove_failed: String,
    pub discount_label: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            no_results: "لا توجد نتائج".to_owned(),
            currency: "ريال".to_owned(),
            generic_error: "حدث خطأ ما. يرجى المحاولة مرة أخرى.".to_owned(),
            added_to_cart: "تمت إضافة المنتج إلى السلة".to_owned(),
            wishlist_updated: "تم تحديث قائمة الرغبات".to_owned(),
            coupon_code_required: "يرجى إدخال كود الكوبون".to_owned(),
            coupon_applied: "تم تطبيق الكوبون بنجاح".to_owned(),
            coupon_removed: "تم إزالة الكوبون".to_owned(),
            coupon_apply_failed: "حدث خطأ أثناء تطبيق الكوبون".to_owned(),
            coupon_remove_failed: "حدث خطأ أثناء إزالة الكوبون".to_owned(),
            discount_label: "خصم".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub search_debounce_ms: u64,
    pub search_min_chars: usize,
    pub max_quantity: u32,
    pub shipping: f64,
    pub carousel_interval_ms: u32,
    pub carousel_wrap: bool,
    pub coupon_message_ms: u64,
    pub csrf_cookie: String,
    pub product_url_prefix: String,
    pub log_level: String,
    pub messages: Messages,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            search_min_chars: DEFAULT_SEARCH_MIN_CHARS,
            max_quantity: DEFAULT_MAX_QUANTITY,
            shipping: DEFAULT_SHIPPING,
            carousel_interval_ms: DEFAULT_CAROUSEL_INTERVAL_MS,
            carousel_wrap: true,
            coupon_message_ms: DEFAULT_COUPON_MESSAGE_MS,
            csrf_cookie: DEFAULT_CSRF_COOKIE.to_owned(),
            product_url_prefix: DEFAULT_PRODUCT_URL_PREFIX.to_owned(),
            log_level: "info".to_owned(),
            messages: Messages::default(),
        }
    }
}

impl StoreConfig {
    /// Parse a configuration block.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or `log_level` is unknown.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.log_filter()?;
        Ok(config)
    }

    /// Read the page's configuration block; defaults when the page has none.
    ///
    /// # Errors
    ///
    /// Returns an error when the block exists but cannot be parsed.
    pub fn load<D: Dom>(dom: &D) -> Result<Self, ConfigError> {
        let Some(node) = dom.query(CONFIG_SELECTOR) else {
            return Ok(Self::default());
        };
        let raw = dom.text(&node);
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(&raw)
    }

    /// Configured log level.
    ///
    /// # Errors
    ///
    /// Returns an error when `log_level` names no known level.
    pub fn log_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level.parse().map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    #[must_use]
    pub fn coupon_message_ttl(&self) -> Duration {
        Duration::from_millis(self.coupon_message_ms)
    }
}
