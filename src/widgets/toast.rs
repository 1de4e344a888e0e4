//! Transient notifications in the top-right corner.
//!
//! SYSTEM CONTEXT
//! ==============
//! Toasts are built here and handed to the UI framework's toast widget,
//! which shows them and removes the element once hidden. The container is
//! created lazily on first use when the page does not render one.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::dom::{Dom, FrameworkWidget};

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

pub const CONTAINER_ID: &str = "toast-container";
const CONTAINER_CLASS: &str = "position-fixed top-0 end-0 p-3";
const CONTAINER_STYLE: &str = "z-index: 11";

static NEXT_TOAST: AtomicU64 = AtomicU64::new(1);

/// Color scheme of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Danger,
    Info,
}

impl ToastKind {
    /// Contextual color suffix (`bg-{suffix}`).
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }
}

fn container<D: Dom>(dom: &D) -> Option<D::Node> {
    if let Some(existing) = dom.query(&format!("#{CONTAINER_ID}")) {
        return Some(existing);
    }
    let body = dom.body()?;
    let node = dom.create_with_class("div", CONTAINER_CLASS)?;
    dom.set_attribute(&node, "id", CONTAINER_ID);
    dom.set_attribute(&node, "style", CONTAINER_STYLE);
    dom.append_child(&body, &node);
    Some(node)
}

fn build<D: Dom>(dom: &D, message: &str, kind: ToastKind) -> Option<D::Node> {
    let class = format!("toast align-items-center text-white bg-{} border-0", kind.suffix());
    let toast = dom.create_with_class("div", &class)?;
    dom.set_attribute(&toast, "id", &format!("toast-{}", NEXT_TOAST.fetch_add(1, Ordering::Relaxed)));
    dom.set_attribute(&toast, "role", "alert");
    dom.set_attribute(&toast, "aria-live", "assertive");
    dom.set_attribute(&toast, "aria-atomic", "true");

    let row = dom.create_with_class("div", "d-flex")?;
    let text = dom.create_with_class("div", "toast-body")?;
    dom.set_text(&text, message);
    let close = dom.create_with_class("button", "btn-close btn-close-white me-2 m-auto")?;
    dom.set_attribute(&close, "type", "button");
    dom.set_attribute(&close, "data-bs-dismiss", "toast");
    dom.set_attribute(&close, "aria-label", "Close");

    dom.append_child(&row, &text);
    dom.append_child(&row, &close);
    dom.append_child(&toast, &row);
    Some(toast)
}

/// Show `message` as a toast. Returns the toast element, or `None` when the
/// document could not build one.
pub fn show_toast<D: Dom>(dom: &D, message: &str, kind: ToastKind) -> Option<D::Node> {
    let Some(container) = container(dom) else {
        log::warn!("toast container unavailable; dropped: {message}");
        return None;
    };
    let toast = build(dom, message, kind)?;
    dom.append_child(&container, &toast);
    dom.mount_widget(&toast, FrameworkWidget::Toast);
    Some(toast)
}
