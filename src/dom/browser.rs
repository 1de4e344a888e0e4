//! [`Dom`] over the real browser document via `web_sys`.
//!
//! ERROR HANDLING
//! ==============
//! Every fallible browser call is matched and logged at `warn`; callers see a
//! `None` or a no-op. Nothing here panics, so one broken element cannot stop
//! the remaining widgets from binding.

use js_sys::{Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, Element, EventTarget, HtmlDocument, HtmlElement, HtmlInputElement};

use super::{Display, Dom, DomEvent, EventKind, FrameworkWidget, Handler, Listener, Target};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap, js_name = Carousel)]
    type BootstrapCarousel;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, js_class = "Carousel", catch)]
    fn new(element: &Element, options: &JsValue) -> Result<BootstrapCarousel, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap, js_name = Toast)]
    type BootstrapToast;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, js_class = "Toast", catch)]
    fn new(element: &Element) -> Result<BootstrapToast, JsValue>;

    #[wasm_bindgen(method)]
    fn show(this: &BootstrapToast);
}

const TOAST_HIDDEN_EVENT: &str = "hidden.bs.toast";

/// The page document.
#[derive(Clone, Debug)]
pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    /// Bind to `window.document`, if running in a page.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    /// `true` while the parser is still building the document.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    fn mount_carousel(node: &Element, interval_ms: u32, wrap: bool) {
        let options = Object::new();
        let fields = [("interval", JsValue::from(interval_ms)), ("wrap", JsValue::from(wrap))];
        for (key, value) in fields {
            if let Err(err) = Reflect::set(&options, &JsValue::from_str(key), &value) {
                log::warn!("carousel option {key} rejected: {err:?}");
            }
        }
        if let Err(err) = BootstrapCarousel::new(node, &options) {
            log::warn!("carousel unavailable: {err:?}");
        }
    }

    fn mount_toast(node: &Element) {
        let toast = match BootstrapToast::new(node) {
            Ok(toast) => toast,
            Err(err) => {
                log::warn!("toast unavailable: {err:?}");
                return;
            }
        };
        let owned = node.clone();
        let on_hidden = Closure::once_into_js(move || owned.remove());
        if let Err(err) = node.add_event_listener_with_callback(TOAST_HIDDEN_EVENT, on_hidden.unchecked_ref()) {
            log::warn!("toast cleanup listener failed: {err:?}");
        }
        toast.show();
    }
}

fn as_element(target: Option<EventTarget>) -> Option<Element> {
    target?.dyn_ref::<Element>().cloned()
}

impl Dom for BrowserDom {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("query {selector} failed: {err:?}");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("query_all {selector} failed: {err:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_ref::<Element>().cloned())
            .collect()
    }

    fn query_in(&self, root: &Element, selector: &str) -> Option<Element> {
        match root.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("scoped query {selector} failed: {err:?}");
                None
            }
        }
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        match node.closest(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("closest {selector} failed: {err:?}");
                None
            }
        }
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(element) => Some(element),
            Err(err) => {
                log::warn!("create <{tag}> failed: {err:?}");
                None
            }
        }
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            log::warn!("append_child failed: {err:?}");
        }
    }

    fn clear_children(&self, node: &Element) {
        node.set_inner_html("");
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            log::warn!("set_attribute {name} failed: {err:?}");
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            log::warn!("add class {class} failed: {err:?}");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            log::warn!("remove class {class} failed: {err:?}");
        }
    }

    fn toggle_class(&self, node: &Element, class: &str) -> bool {
        match node.class_list().toggle(class) {
            Ok(present) => present,
            Err(err) => {
                log::warn!("toggle class {class} failed: {err:?}");
                self.has_class(node, class)
            }
        }
    }

    fn value(&self, node: &Element) -> String {
        match node.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.value(),
            None => node.get_attribute("value").unwrap_or_default(),
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        match node.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.set_value(value),
            None => self.set_attribute(node, "value", value),
        }
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>().is_some_and(HtmlInputElement::checked)
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_display(&self, node: &Element, display: Display) {
        let Some(html) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = html.style().set_property("display", display.css()) {
            log::warn!("set display failed: {err:?}");
        }
    }

    fn cookies(&self) -> String {
        let Some(html) = self.document.dyn_ref::<HtmlDocument>() else {
            return String::new();
        };
        match html.cookie() {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("cookie read failed: {err:?}");
                String::new()
            }
        }
    }

    fn listen(&self, target: Target<'_, Element>, kind: EventKind, mut handler: Handler<Element>) -> Listener {
        let event_target: EventTarget = match target {
            Target::Node(node) => node.clone().into(),
            Target::Document => self.document.clone().into(),
        };
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let dom_event = DomEvent::new(as_element(event.target()));
            handler(&dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        let name = kind.name();
        if let Err(err) = event_target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
            log::warn!("listen {name} failed: {err:?}");
            return Listener::inert();
        }
        Listener::new(move || {
            if let Err(err) = event_target.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
                log::warn!("unlisten {name} failed: {err:?}");
            }
        })
    }

    fn mount_widget(&self, node: &Element, widget: FrameworkWidget) {
        match widget {
            FrameworkWidget::Carousel { interval_ms, wrap } => Self::mount_carousel(node, interval_ms, wrap),
            FrameworkWidget::Toast => Self::mount_toast(node),
        }
    }
}
