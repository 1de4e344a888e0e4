//! Document capability that every widget is written against.
//!
//! SYSTEM CONTEXT
//! ==============
//! Widgets never touch `web_sys` directly. They receive a [`Dom`] and use it
//! to find server-rendered elements, mutate classes/values/text, attach
//! listeners, and hand elements to the page's UI framework. The browser build
//! implements it over `web_sys` (`browser`); tests use an in-memory tree
//! (`fake`).
//!
//! TRADE-OFFS
//! ==========
//! The surface is deliberately narrow: only the operations the store widgets
//! need. Browser failures (bad selectors, missing elements) are logged by the
//! implementation and surface as `None`/no-ops, never as panics.

#[cfg(feature = "hydrate")]
pub mod browser;
#[cfg(test)]
pub mod fake;

use std::cell::Cell;

/// Event kinds the widgets listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Input,
    Change,
    DomContentLoaded,
}

impl EventKind {
    /// DOM event name passed to `addEventListener`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::Change => "change",
            Self::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

/// Where a listener is attached.
#[derive(Debug)]
pub enum Target<'a, N> {
    Node(&'a N),
    Document,
}

/// CSS `display` values the widgets write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    InlineBlock,
}

impl Display {
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Block => "block",
            Self::InlineBlock => "inline-block",
        }
    }
}

/// Widgets owned by the page's UI framework that this crate only mounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameworkWidget {
    /// Auto-advancing slide carousel.
    Carousel { interval_ms: u32, wrap: bool },
    /// Transient notification; shown immediately and removed once hidden.
    Toast,
}

/// Event delivered to a listener.
#[derive(Debug)]
pub struct DomEvent<N> {
    target: Option<N>,
    prevented: Cell<bool>,
}

impl<N> DomEvent<N> {
    #[must_use]
    pub fn new(target: Option<N>) -> Self {
        Self { target, prevented: Cell::new(false) }
    }

    /// Element the event originated from.
    #[must_use]
    pub fn target(&self) -> Option<&N> {
        self.target.as_ref()
    }

    /// Ask the host to cancel the browser's default action.
    pub fn prevent_default(&self) {
        self.prevented.set(true);
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

/// Boxed listener callback.
pub type Handler<N> = Box<dyn FnMut(&DomEvent<N>)>;

/// Attached listener. Dropping it detaches the callback.
#[must_use = "dropping a Listener detaches it"]
pub struct Listener {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Listener {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self { detach: Some(Box::new(detach)) }
    }

    /// A listener that was never attached (attachment failed or nothing to bind).
    pub fn inert() -> Self {
        Self { detach: None }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener").field("attached", &self.detach.is_some()).finish()
    }
}

/// Query/mutation surface over the page document.
pub trait Dom {
    /// Element handle. Cheap to clone; equality is element identity.
    type Node: Clone + PartialEq + 'static;

    // --- Lookup ---

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn query_in(&self, root: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// Nearest inclusive ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// `true` when `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
    fn body(&self) -> Option<Self::Node>;

    // --- Structure ---

    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    fn clear_children(&self, node: &Self::Node);

    // --- Attributes, classes, form state ---

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Flip `class` and return whether it is now present.
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool;
    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);
    fn is_checked(&self, node: &Self::Node) -> bool;
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn set_display(&self, node: &Self::Node, display: Display);

    // --- Page services ---

    /// Raw `document.cookie` string.
    fn cookies(&self) -> String;
    fn listen(&self, target: Target<'_, Self::Node>, kind: EventKind, handler: Handler<Self::Node>) -> Listener;
    fn mount_widget(&self, node: &Self::Node, widget: FrameworkWidget);

    /// Create `tag` with a `class` attribute already set.
    fn create_with_class(&self, tag: &str, class: &str) -> Option<Self::Node> {
        let node = self.create_element(tag)?;
        if !class.is_empty() {
            self.set_attribute(&node, "class", class);
        }
        Some(node)
    }
}
