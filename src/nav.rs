//! Mobile navigation overlay.
//!
//! DESIGN
//! ======
//! [`NavState`] is owned here and mirrored into three places the stylesheet
//! and assistive technology read: the `is-open` class on the nav root, the
//! `nav-open` class on `<body>` (scroll lock), and `aria-expanded` /
//! `aria-hidden` on the trigger and menu. Every transition goes through
//! `set_state` so the mirrors cannot drift apart, including the reset to
//! closed at attach that clears open markers left in the markup.
//!
//! The scrim is looked up by class and created only when missing, so
//! attaching twice never stacks two overlays.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::config::NavigationConfig;
use crate::dom::{DocumentContext, DomEvent, EventKind, ListenOptions, Target};
use crate::subscription::Teardown;

/// Open/closed state of the mobile menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Closed,
    Open,
}

impl NavState {
    #[must_use]
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

/// The page's navigation menu and its scrim.
pub struct NavigationOverlay<D: DocumentContext> {
    doc: Rc<D>,
    config: NavigationConfig,
    nav: D::Element,
    trigger: D::Element,
    menu: D::Element,
    overlay: Option<D::Element>,
    state: Cell<NavState>,
}

impl<D: DocumentContext + 'static> NavigationOverlay<D> {
    /// Find the nav root, trigger and menu, wire the ARIA relationship and
    /// ensure the scrim exists. `None` when any of the three is missing.
    pub fn attach(doc: &Rc<D>, config: &NavigationConfig) -> Option<Rc<Self>> {
        let nav = doc.query(&config.nav_selector)?;
        let trigger = doc.query_within(&nav, &config.trigger_selector)?;
        let menu = doc.query_within(&nav, &config.menu_selector)?;

        let menu_id = match doc.attribute(&menu, "id") {
            Some(id) if !id.is_empty() => id,
            _ => {
                doc.set_attribute(&menu, "id", &config.menu_id);
                config.menu_id.clone()
            }
        };
        doc.set_attribute(&trigger, "aria-controls", &menu_id);

        let overlay = ensure_overlay(doc.as_ref(), config);
        let this = Rc::new(Self {
            doc: Rc::clone(doc),
            config: config.clone(),
            nav,
            trigger,
            menu,
            overlay,
            state: Cell::new(NavState::Closed),
        });
        this.set_state(NavState::Closed);
        Some(this)
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        self.state.get()
    }

    pub fn open(&self) {
        self.set_state(NavState::Open);
    }

    /// Close the menu. Closing an already closed menu changes nothing.
    pub fn close(&self) {
        self.set_state(NavState::Closed);
    }

    pub fn toggle(&self) {
        if self.state().is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Register trigger, scrim and `Escape` listeners.
    pub fn listen(self: &Rc<Self>) -> Teardown {
        let mut teardown = Teardown::inert();

        let this = Rc::clone(self);
        teardown.push(self.doc.listen(
            Target::Element(&self.trigger),
            EventKind::Click,
            ListenOptions::default(),
            Box::new(move |event: &DomEvent| {
                event.prevent_default();
                this.toggle();
            }),
        ));

        if let Some(overlay) = &self.overlay {
            let this = Rc::clone(self);
            teardown.push(self.doc.listen(
                Target::Element(overlay),
                EventKind::Click,
                ListenOptions::default(),
                Box::new(move |_: &DomEvent| this.close()),
            ));
        }

        let this = Rc::clone(self);
        teardown.push(self.doc.listen(
            Target::Document,
            EventKind::KeyDown,
            ListenOptions::default(),
            Box::new(move |event: &DomEvent| {
                if event.key() == Some(this.config.close_key.as_str()) {
                    this.close();
                }
            }),
        ));

        teardown
    }

    fn set_state(&self, state: NavState) {
        self.state.set(state);
        let open = state.is_open();
        self.doc.set_class(&self.nav, &self.config.open_class, open);
        if let Some(body) = self.doc.body() {
            self.doc.set_class(&body, &self.config.body_open_class, open);
        }
        self.write_aria(state);
    }

    fn write_aria(&self, state: NavState) {
        let open = state.is_open();
        self.doc.set_attribute(&self.trigger, "aria-expanded", bool_attr(open));
        self.doc.set_attribute(&self.menu, "aria-hidden", bool_attr(!open));
    }
}

/// Attach and listen in one step. Inert when the markup is incomplete.
pub fn mount_navigation<D: DocumentContext + 'static>(doc: &Rc<D>, config: &NavigationConfig) -> Teardown {
    match NavigationOverlay::attach(doc, config) {
        Some(nav) => nav.listen(),
        None => Teardown::inert(),
    }
}

fn ensure_overlay<D: DocumentContext>(doc: &D, config: &NavigationConfig) -> Option<D::Element> {
    if let Some(existing) = doc.query(&config.overlay_selector()) {
        return Some(existing);
    }
    let overlay = doc.create_element("div")?;
    doc.set_class(&overlay, &config.overlay_class, true);
    doc.append_to_body(&overlay);
    Some(overlay)
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
