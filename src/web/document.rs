//! `DocumentContext` over the real DOM.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, FormData, HtmlElement, HtmlFormElement,
    KeyboardEvent, Window,
};

use super::{describe, warn_on_err};
use crate::dom::{DocumentContext, DomEvent, EventKind, Handler, ListenOptions, ScrollMetrics, Target};
use crate::subscription::Subscription;

/// The page this module was loaded into.
#[derive(Clone, Debug)]
pub struct BrowserDocument {
    window: Window,
    document: Document,
}

impl BrowserDocument {
    /// `None` outside a browsing context (workers, SSR).
    #[must_use]
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    fn event_target(&self, target: Target<'_, Element>) -> EventTarget {
        match target {
            Target::Element(element) => element.clone().into(),
            Target::Document => self.document.clone().into(),
            Target::Window => self.window.clone().into(),
        }
    }
}

impl DocumentContext for BrowserDocument {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {}", describe(&err));
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {}", describe(&err));
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .flat_map(|node| node.dyn_into::<Element>())
            .collect()
    }

    fn query_within(&self, root: &Element, selector: &str) -> Option<Element> {
        match root.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {}", describe(&err));
                None
            }
        }
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(element) => Some(element),
            Err(err) => {
                log::warn!("create <{tag}> failed: {}", describe(&err));
                None
            }
        }
    }

    fn append_to_body(&self, element: &Element) {
        if let Some(body) = self.document.body() {
            warn_on_err(body.append_child(element), "append to body");
        }
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_class(&self, element: &Element, class: &str, on: bool) {
        warn_on_err(element.class_list().toggle_with_force(class, on), "set class");
    }

    fn toggle_class(&self, element: &Element, class: &str) -> bool {
        match element.class_list().toggle(class) {
            Ok(present) => present,
            Err(err) => {
                log::warn!("toggle class {class:?} failed: {}", describe(&err));
                self.has_class(element, class)
            }
        }
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        warn_on_err(element.set_attribute(name, value), "set attribute");
    }

    fn text_content(&self, element: &Element) -> Option<String> {
        element.text_content()
    }

    fn set_text_content(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            warn_on_err(html.style().set_property(property, value), "set style");
        }
    }

    fn set_disabled(&self, element: &Element, disabled: bool) {
        if disabled {
            warn_on_err(element.set_attribute("disabled", ""), "disable control");
        } else {
            warn_on_err(element.remove_attribute("disabled"), "enable control");
        }
    }

    fn form_fields(&self, form: &Element) -> Vec<(String, String)> {
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            return Vec::new();
        };
        let data = match FormData::new_with_form(form) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("reading form data failed: {}", describe(&err));
                return Vec::new();
            }
        };
        let entries = match js_sys::try_iter(data.as_ref()) {
            Ok(Some(entries)) => entries,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("iterating form data failed: {}", describe(&err));
                return Vec::new();
            }
        };
        entries
            .filter_map(|entry| match entry {
                Ok(entry) => form_entry(&entry),
                Err(err) => {
                    log::warn!("form entry unreadable: {}", describe(&err));
                    None
                }
            })
            .collect()
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let viewport_height = match self.window.inner_height() {
            Ok(height) => height.as_f64().unwrap_or(0.0),
            Err(err) => {
                log::warn!("innerHeight unavailable: {}", describe(&err));
                0.0
            }
        };
        // `scrollY` keeps the fractional offset that `Element.scrollTop` rounds away.
        let scroll_top = match self.window.scroll_y() {
            Ok(offset) => offset,
            Err(err) => {
                log::warn!("scrollY unavailable: {}", describe(&err));
                0.0
            }
        };
        let scroll_height = self.root().map_or(0.0, |root| f64::from(root.scroll_height()));
        ScrollMetrics { scroll_top, scroll_height, viewport_height }
    }

    fn location_path(&self) -> String {
        match self.window.location().pathname() {
            Ok(path) => path,
            Err(err) => {
                log::warn!("location.pathname unavailable: {}", describe(&err));
                "/".to_owned()
            }
        }
    }

    fn is_ready(&self) -> bool {
        self.document.ready_state() != "loading"
    }

    fn listen(
        &self,
        target: Target<'_, Element>,
        kind: EventKind,
        options: ListenOptions,
        mut handler: Handler,
    ) -> Subscription {
        let target = self.event_target(target);
        let callback = Closure::wrap(Box::new(move |event: Event| {
            let dom_event = match event.dyn_ref::<KeyboardEvent>() {
                Some(key_event) => DomEvent::key_down(key_event.key()),
                None => DomEvent::new(kind),
            };
            handler(&dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);

        let listener_options = AddEventListenerOptions::new();
        listener_options.set_passive(options.passive);
        if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind.as_str(),
            callback.as_ref().unchecked_ref(),
            &listener_options,
        ) {
            log::warn!("add {} listener failed: {}", kind.as_str(), describe(&err));
            return Subscription::noop();
        }

        Subscription::new(move || {
            warn_on_err(
                target.remove_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref()),
                "remove listener",
            );
        })
    }

    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>) {
        let pending: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(Some(callback)));
        let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        let pending_for_cb = Rc::clone(&pending);
        let holder_for_cb = Rc::clone(&holder);
        let frame = Closure::wrap(Box::new(move |_ts: f64| {
            if let Some(callback) = pending_for_cb.borrow_mut().take() {
                callback();
            }
            holder_for_cb.borrow_mut().take();
        }) as Box<dyn FnMut(f64)>);

        match self.window.request_animation_frame(frame.as_ref().unchecked_ref()) {
            Ok(_) => *holder.borrow_mut() = Some(frame),
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {}", describe(&err));
                if let Some(callback) = pending.borrow_mut().take() {
                    callback();
                }
            }
        }
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// `[name, value]` pair from `FormData` iteration; file entries are skipped.
fn form_entry(entry: &JsValue) -> Option<(String, String)> {
    let pair = entry.dyn_ref::<js_sys::Array>()?;
    let name = pair.get(0).as_string()?;
    let value = pair.get(1).as_string()?;
    Some((name, value))
}
