//! Live product search under the header search box.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every keystroke cancels the pending query. Input that trims to fewer than
//! `search_min_chars` characters hides the panel and never reaches the
//! network; longer input queries once the user has been idle for
//! `search_debounce_ms`. Results replace the panel's children wholesale.
//!
//! TRADE-OFFS
//! ==========
//! Responses are applied in arrival order. A slow response for an older
//! query can overwrite a newer one; the debounce makes that rare enough that
//! no sequencing is kept.
//!
//! ERROR HANDLING
//! ==============
//! Failed searches are logged and leave the panel as it was.

use std::cell::RefCell;
use std::rc::Rc;

use super::Binding;
use crate::config::StoreConfig;
use crate::dom::{Display, Dom, EventKind, Target};
use crate::env::Env;
use crate::net::api;
use crate::net::types::SearchResult;
use crate::runtime::Debouncer;

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

pub const INPUT_SELECTOR: &str = "#search-input";
pub const PANEL_SELECTOR: &str = "#search-results";
const THUMBNAIL_SIZE: &str = "50";

/// Trimmed query when it is long enough to send.
#[must_use]
pub fn normalize_query(raw: &str, min_chars: usize) -> Option<&str> {
    let query = raw.trim();
    (query.chars().count() >= min_chars).then_some(query)
}

fn result_row<D: Dom>(dom: &D, config: &StoreConfig, result: &SearchResult) -> Option<D::Node> {
    let row = dom.create_with_class("div", "search-result p-2 border-bottom")?;
    let content = dom.create_with_class("div", "d-flex")?;

    if let Some(src) = &result.image {
        let image = dom.create_with_class("img", "me-3")?;
        dom.set_attribute(&image, "src", src);
        dom.set_attribute(&image, "alt", &result.name);
        dom.set_attribute(&image, "width", THUMBNAIL_SIZE);
        dom.set_attribute(&image, "height", THUMBNAIL_SIZE);
        dom.append_child(&content, &image);
    }

    let details = dom.create_element("div")?;
    let name = dom.create_with_class("h6", "mb-0")?;
    dom.set_text(&name, &result.name);
    let price = dom.create_with_class("small", "text-muted")?;
    dom.set_text(&price, &format!("{} {}", result.price_label(), config.messages.currency));
    dom.append_child(&details, &name);
    dom.append_child(&details, &price);
    dom.append_child(&content, &details);

    match &result.slug {
        Some(slug) => {
            let link = dom.create_with_class("a", "text-reset text-decoration-none")?;
            dom.set_attribute(&link, "href", &format!("{}{slug}/", config.product_url_prefix));
            dom.append_child(&link, &content);
            dom.append_child(&row, &link);
        }
        None => dom.append_child(&row, &content),
    }
    Some(row)
}

/// Replace the panel's contents with `results` and show it.
pub fn render_results<D: Dom>(dom: &D, config: &StoreConfig, panel: &D::Node, results: &[SearchResult]) {
    dom.clear_children(panel);
    if results.is_empty() {
        if let Some(empty) = dom.create_with_class("div", "p-2 text-center") {
            dom.set_text(&empty, &config.messages.no_results);
            dom.append_child(panel, &empty);
        }
    } else {
        for result in results {
            if let Some(row) = result_row(dom, config, result) {
                dom.append_child(panel, &row);
            }
        }
    }
    dom.set_display(panel, Display::Block);
}

async fn run_query<D: Dom>(env: Env<D>, panel: D::Node, query: String) {
    match api::search_products(env.http.as_ref(), &query).await {
        Ok(results) => render_results(env.dom.as_ref(), &env.config, &panel, &results),
        Err(err) => log::error!("search for {query:?} failed: {err}"),
    }
}

pub fn bind<D: Dom + 'static>(env: &Env<D>) -> Binding {
    let (Some(input), Some(panel)) = (env.dom.query(INPUT_SELECTOR), env.dom.query(PANEL_SELECTOR)) else {
        return Binding::empty("search");
    };
    let debouncer = Rc::new(RefCell::new(Debouncer::new(env.config.search_debounce())));

    let on_input = {
        let env_in = env.clone();
        let input_in = input.clone();
        let panel_in = panel.clone();
        env.dom.listen(
            Target::Node(&input),
            EventKind::Input,
            Box::new(move |_| {
                let mut pending = debouncer.borrow_mut();
                pending.cancel();
                let raw = env_in.dom.value(&input_in);
                let Some(query) = normalize_query(&raw, env_in.config.search_min_chars) else {
                    env_in.dom.set_display(&panel_in, Display::None);
                    return;
                };
                let task_env = env_in.clone();
                let task_panel = panel_in.clone();
                let query = query.to_owned();
                pending.schedule(env_in.timers.as_ref(), move || {
                    let task = run_query(task_env.clone(), task_panel, query);
                    task_env.spawn(task);
                });
            }),
        )
    };

    let on_outside_click = {
        let dom = Rc::clone(&env.dom);
        env.dom.listen(
            Target::Document,
            EventKind::Click,
            Box::new(move |event| {
                let inside = event.target().is_some_and(|target| dom.contains(&input, target) || dom.contains(&panel, target));
                if !inside {
                    dom.set_display(&panel, Display::None);
                }
            }),
        )
    };

    Binding::new("search", vec![on_input, on_outside_click])
}
