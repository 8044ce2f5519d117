//! Document capability consumed by every behavior.
//!
//! SYSTEM CONTEXT
//! ==============
//! Behaviors never touch `web_sys` directly. They query and mutate the page
//! through [`DocumentContext`], which the browser adapter implements over the
//! real DOM and the test fixture implements over an in-memory element tree.
//!
//! Mutations are infallible at this boundary: a browser refusing an attribute
//! write is logged by the adapter and has no recovery path the caller could
//! take anyway.

use std::cell::Cell;

use futures::future::LocalBoxFuture;

use crate::subscription::Subscription;

/// Browser events the behaviors subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown,
    Scroll,
    Resize,
    Submit,
    /// Fired once the initial HTML has been parsed.
    Ready,
}

impl EventKind {
    /// DOM event type string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::Submit => "submit",
            Self::Ready => "DOMContentLoaded",
        }
    }
}

/// Where a listener is attached.
#[derive(Debug)]
pub enum Target<'a, E> {
    Element(&'a E),
    Document,
    Window,
}

/// Listener registration flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenOptions {
    /// The handler promises not to cancel the event.
    pub passive: bool,
}

impl ListenOptions {
    #[must_use]
    pub fn passive() -> Self {
        Self { passive: true }
    }
}

/// Event handed to a handler.
///
/// Only the fields the behaviors read are carried over from the browser
/// event. Cancellation is recorded here and forwarded by the adapter.
#[derive(Debug)]
pub struct DomEvent {
    kind: EventKind,
    key: Option<String>,
    default_prevented: Cell<bool>,
}

impl DomEvent {
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self { kind, key: None, default_prevented: Cell::new(false) }
    }

    /// A `keydown` event for `key` (the `KeyboardEvent.key` value).
    #[must_use]
    pub fn key_down(key: impl Into<String>) -> Self {
        Self { kind: EventKind::KeyDown, key: Some(key.into()), default_prevented: Cell::new(false) }
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Boxed event callback.
pub type Handler = Box<dyn FnMut(&DomEvent)>;

/// Vertical scroll geometry of the document.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Vertical scroll offset (`window.scrollY`), fractional on high-DPI screens.
    pub scroll_top: f64,
    /// `documentElement.scrollHeight`.
    pub scroll_height: f64,
    /// `window.innerHeight`.
    pub viewport_height: f64,
}

/// Access to the page, its event loop and its frame scheduler.
pub trait DocumentContext {
    /// Handle to one element of the page.
    type Element: Clone + 'static;

    /// First element in the document matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// Every element in the document matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// First descendant of `root` matching `selector`.
    fn query_within(&self, root: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// The `<html>` element.
    fn root(&self) -> Option<Self::Element>;

    fn body(&self) -> Option<Self::Element>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Option<Self::Element>;

    fn append_to_body(&self, element: &Self::Element);

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Add (`on == true`) or remove a class.
    fn set_class(&self, element: &Self::Element, class: &str, on: bool);

    /// Flip a class and return whether it is now present.
    fn toggle_class(&self, element: &Self::Element, class: &str) -> bool;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    fn text_content(&self, element: &Self::Element) -> Option<String>;

    fn set_text_content(&self, element: &Self::Element, text: &str);

    /// Set one inline style property.
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);

    fn set_disabled(&self, element: &Self::Element, disabled: bool);

    /// Successful controls of a form as `(name, value)` pairs.
    fn form_fields(&self, form: &Self::Element) -> Vec<(String, String)>;

    /// Restore every control of a form to its initial value.
    fn reset_form(&self, form: &Self::Element);

    fn scroll_metrics(&self) -> ScrollMetrics;

    /// `location.pathname` of the current page.
    fn location_path(&self) -> String;

    /// Whether the initial HTML has finished parsing.
    fn is_ready(&self) -> bool;

    /// Attach `handler` to `target` for `kind`. Dropping the returned
    /// subscription detaches it.
    fn listen(
        &self,
        target: Target<'_, Self::Element>,
        kind: EventKind,
        options: ListenOptions,
        handler: Handler,
    ) -> Subscription;

    /// Run `callback` before the next repaint.
    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>);

    /// Drive `task` to completion on the page's event loop.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}
