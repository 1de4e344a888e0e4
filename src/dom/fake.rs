//! In-memory document used by widget tests.
//!
//! Supports compound selectors made of an optional tag, `#id`, `.class` and
//! `[attr]`/`[attr=value]` parts; descendant combinators are not needed by the
//! widgets and are not parsed. Events bubble from the target through its
//! ancestors to document-level listeners.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{Display, Dom, DomEvent, EventKind, FrameworkWidget, Handler, Listener, Target};

#[cfg(test)]
#[path = "fake_test.rs"]
mod fake_test;

/// Element handle inside a [`FakeDom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

#[derive(Debug, Default)]
struct FakeElement {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    value: String,
    checked: bool,
    text: String,
    display: Option<Display>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

struct Registration {
    id: u64,
    target: Option<NodeId>,
    kind: EventKind,
    handler: Rc<RefCell<Handler<NodeId>>>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

fn parse_selector(selector: &str) -> SimpleSelector {
    const MARKERS: [char; 3] = ['#', '.', '['];
    let mut parsed = SimpleSelector::default();
    let selector = selector.trim();
    let tag_end = selector.find(MARKERS).unwrap_or(selector.len());
    if tag_end > 0 {
        parsed.tag = Some(selector[..tag_end].to_ascii_lowercase());
    }
    let mut rest = &selector[tag_end..];
    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        if marker == '[' {
            let end = body.find(']').unwrap_or(body.len());
            let (name, value) = match body[..end].split_once('=') {
                Some((name, value)) => (name, Some(value.trim_matches(['"', '\'']).to_owned())),
                None => (&body[..end], None),
            };
            parsed.attrs.push((name.to_owned(), value));
            rest = body.get(end + 1..).unwrap_or("");
        } else {
            let end = body.find(MARKERS).unwrap_or(body.len());
            let name = body[..end].to_owned();
            if marker == '#' {
                parsed.id = Some(name);
            } else {
                parsed.classes.push(name);
            }
            rest = &body[end..];
        }
    }
    parsed
}

/// In-memory [`Dom`] with `<html>` and `<body>` pre-created.
pub struct FakeDom {
    tree: RefCell<Vec<FakeElement>>,
    listeners: Rc<RefCell<Vec<Registration>>>,
    next_listener: Cell<u64>,
    cookies: RefCell<String>,
    widgets: RefCell<Vec<(NodeId, FrameworkWidget)>>,
}

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDom {
    #[must_use]
    pub fn new() -> Self {
        let html = FakeElement { tag: "html".to_owned(), children: vec![BODY], ..FakeElement::default() };
        let body = FakeElement { tag: "body".to_owned(), parent: Some(ROOT), ..FakeElement::default() };
        Self {
            tree: RefCell::new(vec![html, body]),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener: Cell::new(1),
            cookies: RefCell::new(String::new()),
            widgets: RefCell::new(Vec::new()),
        }
    }

    /// Append an element described by a selector-like string, e.g.
    /// `button.wishlist-btn[data-product-id=7]` or `#search-input`.
    pub fn add(&self, parent: NodeId, shape: &str) -> NodeId {
        let parsed = parse_selector(shape);
        let node = self.alloc(parsed.tag.as_deref().unwrap_or("div"));
        {
            let mut tree = self.tree.borrow_mut();
            let el = &mut tree[node.0];
            if let Some(id) = parsed.id {
                el.attrs.insert("id".to_owned(), id);
            }
            el.classes = parsed.classes;
            for (name, value) in parsed.attrs {
                el.attrs.insert(name, value.unwrap_or_default());
            }
        }
        self.append_child(&parent, &node);
        node
    }

    /// Append to `<body>`.
    pub fn add_to_body(&self, shape: &str) -> NodeId {
        self.add(BODY, shape)
    }

    #[must_use]
    pub fn body_node(&self) -> NodeId {
        BODY
    }

    pub fn set_cookies(&self, raw: &str) {
        raw.clone_into(&mut self.cookies.borrow_mut());
    }

    pub fn set_checked(&self, node: NodeId, checked: bool) {
        self.tree.borrow_mut()[node.0].checked = checked;
    }

    #[must_use]
    pub fn display(&self, node: NodeId) -> Option<Display> {
        self.tree.borrow()[node.0].display
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow()[node.0].children.clone()
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> String {
        self.tree.borrow()[node.0].tag.clone()
    }

    /// `true` while the node is reachable from the document root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.ancestry(node).last() == Some(&ROOT)
    }

    /// Concatenated text of `node` and its descendants, in document order.
    #[must_use]
    pub fn subtree_text(&self, node: NodeId) -> String {
        let tree = self.tree.borrow();
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let el = &tree[current.0];
            out.push_str(&el.text);
            stack.extend(el.children.iter().rev());
        }
        out
    }

    #[must_use]
    pub fn mounted_widgets(&self) -> Vec<(NodeId, FrameworkWidget)> {
        self.widgets.borrow().clone()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver an event to `target`, bubbling to ancestors and the document.
    /// Returns whether a listener prevented the default action.
    pub fn dispatch(&self, target: NodeId, kind: EventKind) -> bool {
        let path = self.ancestry(target);
        let mut handlers = Vec::new();
        {
            let listeners = self.listeners.borrow();
            let targets = path.iter().map(|node| Some(*node)).chain(std::iter::once(None));
            for target in targets {
                for registration in listeners.iter().filter(|r| r.kind == kind && r.target == target) {
                    handlers.push(Rc::clone(&registration.handler));
                }
            }
        }
        let event = DomEvent::new(Some(target));
        for handler in handlers {
            (handler.borrow_mut())(&event);
        }
        event.default_prevented()
    }

    pub fn click(&self, target: NodeId) -> bool {
        self.dispatch(target, EventKind::Click)
    }

    /// Set an input's value and fire `input`, like a keystroke.
    pub fn type_into(&self, input: NodeId, value: &str) {
        self.set_value(&input, value);
        self.dispatch(input, EventKind::Input);
    }

    /// Set a checkbox and fire `change`.
    pub fn check(&self, input: NodeId, checked: bool) {
        self.set_checked(input, checked);
        self.dispatch(input, EventKind::Change);
    }

    /// Fire `DOMContentLoaded` on the document.
    pub fn fire_ready(&self) {
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|r| r.kind == EventKind::DomContentLoaded && r.target.is_none())
            .map(|r| Rc::clone(&r.handler))
            .collect();
        let event = DomEvent::new(None);
        for handler in handlers {
            (handler.borrow_mut())(&event);
        }
    }

    fn alloc(&self, tag: &str) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        tree.push(FakeElement { tag: tag.to_ascii_lowercase(), ..FakeElement::default() });
        NodeId(tree.len() - 1)
    }

    /// `node` followed by its ancestors up to the topmost one.
    fn ancestry(&self, node: NodeId) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = tree[current.0].parent {
            path.push(parent);
            current = parent;
        }
        path
    }

    fn matches(&self, node: NodeId, selector: &SimpleSelector) -> bool {
        let tree = self.tree.borrow();
        let el = &tree[node.0];
        selector.tag.as_ref().is_none_or(|tag| *tag == el.tag)
            && selector.id.as_ref().is_none_or(|id| el.attrs.get("id") == Some(id))
            && selector.classes.iter().all(|c| el.classes.contains(c))
            && selector.attrs.iter().all(|(name, value)| match (el.attrs.get(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            })
    }

    /// Descendants of `root` (exclusive) in document order.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = tree[root.0].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(tree[current.0].children.iter().rev());
        }
        out
    }

    fn detach(&self, node: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if let Some(parent) = tree[node.0].parent.take() {
            tree[parent.0].children.retain(|child| *child != node);
        }
    }
}

impl Dom for FakeDom {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_in(&ROOT, selector)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let parsed = parse_selector(selector);
        self.descendants(ROOT).into_iter().filter(|node| self.matches(*node, &parsed)).collect()
    }

    fn query_in(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        let parsed = parse_selector(selector);
        self.descendants(*root).into_iter().find(|node| self.matches(*node, &parsed))
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let parsed = parse_selector(selector);
        self.ancestry(*node).into_iter().find(|candidate| self.matches(*candidate, &parsed))
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.ancestry(*node).contains(ancestor)
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.alloc(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.detach(*child);
        let mut tree = self.tree.borrow_mut();
        tree[child.0].parent = Some(*parent);
        tree[parent.0].children.push(*child);
    }

    fn clear_children(&self, node: &NodeId) {
        for child in self.children(*node) {
            self.detach(child);
        }
        self.tree.borrow_mut()[node.0].text.clear();
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let tree = self.tree.borrow();
        let el = &tree[node.0];
        if name == "class" {
            return (!el.classes.is_empty()).then(|| el.classes.join(" "));
        }
        el.attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        let mut tree = self.tree.borrow_mut();
        let el = &mut tree[node.0];
        if name == "class" {
            el.classes = value.split_whitespace().map(str::to_owned).collect();
        } else {
            el.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree.borrow()[node.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.tree.borrow_mut()[node.0].classes.push(class.to_owned());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.tree.borrow_mut()[node.0].classes.retain(|c| c != class);
    }

    fn toggle_class(&self, node: &NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn value(&self, node: &NodeId) -> String {
        self.tree.borrow()[node.0].value.clone()
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        value.clone_into(&mut self.tree.borrow_mut()[node.0].value);
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        self.tree.borrow()[node.0].checked
    }

    fn text(&self, node: &NodeId) -> String {
        self.tree.borrow()[node.0].text.clone()
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        text.clone_into(&mut self.tree.borrow_mut()[node.0].text);
    }

    fn set_display(&self, node: &NodeId, display: Display) {
        self.tree.borrow_mut()[node.0].display = Some(display);
    }

    fn cookies(&self) -> String {
        self.cookies.borrow().clone()
    }

    fn listen(&self, target: Target<'_, NodeId>, kind: EventKind, handler: Handler<NodeId>) -> Listener {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        let target = match target {
            Target::Node(node) => Some(*node),
            Target::Document => None,
        };
        self.listeners.borrow_mut().push(Registration { id, target, kind, handler: Rc::new(RefCell::new(handler)) });
        let listeners = Rc::clone(&self.listeners);
        Listener::new(move || listeners.borrow_mut().retain(|r| r.id != id))
    }

    fn mount_widget(&self, node: &NodeId, widget: FrameworkWidget) {
        self.widgets.borrow_mut().push((*node, widget));
    }
}
