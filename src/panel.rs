//! Guides panel show/hide toggle.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::rc::Rc;

use crate::config::PanelConfig;
use crate::dom::{DocumentContext, DomEvent, EventKind, ListenOptions, Target};
use crate::subscription::Teardown;

/// The guides panel and the button that reveals it.
///
/// Visibility lives in the panel's class list; the trigger's `active` class
/// follows it. Nothing is persisted across reloads.
pub struct PanelToggle<D: DocumentContext> {
    doc: Rc<D>,
    config: PanelConfig,
    trigger: D::Element,
    panel: D::Element,
}

impl<D: DocumentContext + 'static> PanelToggle<D> {
    /// `None` unless both trigger and panel are on the page.
    pub fn attach(doc: &Rc<D>, config: &PanelConfig) -> Option<Rc<Self>> {
        let trigger = doc.query(&config.toggle_selector)?;
        let panel = doc.query(&config.panel_selector)?;
        Some(Rc::new(Self { doc: Rc::clone(doc), config: config.clone(), trigger, panel }))
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.doc.has_class(&self.panel, &self.config.visible_class)
    }

    /// Flip the panel and return whether it is now visible.
    pub fn toggle(&self) -> bool {
        let showing = self.doc.toggle_class(&self.panel, &self.config.visible_class);
        self.doc.set_class(&self.trigger, &self.config.active_class, showing);
        showing
    }

    pub fn listen(self: &Rc<Self>) -> Teardown {
        let this = Rc::clone(self);
        let click = self.doc.listen(
            Target::Element(&self.trigger),
            EventKind::Click,
            ListenOptions::default(),
            Box::new(move |event: &DomEvent| {
                event.prevent_default();
                this.toggle();
            }),
        );
        std::iter::once(click).collect()
    }
}

pub fn mount_panel_toggle<D: DocumentContext + 'static>(doc: &Rc<D>, config: &PanelConfig) -> Teardown {
    PanelToggle::attach(doc, config).map_or_else(Teardown::inert, |panel| panel.listen())
}
