//! Page-ready wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`bootstrap`] runs every behavior in a fixed order. The behaviors touch
//! disjoint elements, so the order only matters for readability: the theme
//! is applied first to keep the flash of the wrong palette as short as
//! possible. Each initializer is infallible and degrades to an inert
//! [`Teardown`] when its markup is missing, so one absent element never
//! prevents the others from starting.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::SiteConfig;
use crate::dom::{DocumentContext, DomEvent, EventKind, ListenOptions, Target};
use crate::form::mount_contact_form;
use crate::nav::mount_navigation;
use crate::panel::mount_panel_toggle;
use crate::scroll::mount_scroll_progress;
use crate::storage::Storage;
use crate::subscription::{Subscription, Teardown};
use crate::theme::{init_theme, mount_theme_toggle};
use crate::transport::Transport;

/// Listeners of every behavior on the page.
#[derive(Debug, Default)]
pub struct SiteBehaviors {
    pub theme_toggle: Teardown,
    pub panel_toggle: Teardown,
    pub navigation: Teardown,
    pub scroll_progress: Teardown,
    pub contact_form: Teardown,
}

impl SiteBehaviors {
    /// Names of the behaviors that found their markup.
    #[must_use]
    pub fn active(&self) -> Vec<&'static str> {
        [
            ("theme_toggle", &self.theme_toggle),
            ("panel_toggle", &self.panel_toggle),
            ("navigation", &self.navigation),
            ("scroll_progress", &self.scroll_progress),
            ("contact_form", &self.contact_form),
        ]
        .into_iter()
        .filter(|(_, teardown)| teardown.is_active())
        .map(|(name, _)| name)
        .collect()
    }

    /// Detach every listener.
    pub fn dispose(self) {
        drop(self);
    }
}

/// Apply the stored theme and start every behavior.
pub fn bootstrap<D, S, T>(doc: &Rc<D>, storage: &Rc<S>, transport: &Rc<T>, config: &SiteConfig) -> SiteBehaviors
where
    D: DocumentContext + 'static,
    S: Storage + ?Sized + 'static,
    T: Transport + ?Sized + 'static,
{
    init_theme(doc.as_ref(), storage.as_ref(), &config.theme);
    let behaviors = SiteBehaviors {
        theme_toggle: mount_theme_toggle(doc, storage, &config.theme),
        panel_toggle: mount_panel_toggle(doc, &config.panel),
        navigation: mount_navigation(doc, &config.navigation),
        scroll_progress: mount_scroll_progress(doc, &config.scroll_progress),
        contact_form: mount_contact_form(doc, transport, &config.contact_form),
    };
    log::info!("site behaviors active: {:?}", behaviors.active());
    behaviors
}

/// Behaviors started by [`install`], or waiting for the page to be ready.
#[derive(Debug)]
pub struct Installation {
    behaviors: Rc<RefCell<Option<SiteBehaviors>>>,
    _ready: Subscription,
}

impl Installation {
    /// Whether bootstrap has run.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.behaviors.borrow().is_some()
    }

    /// Names of the active behaviors; empty before bootstrap has run.
    #[must_use]
    pub fn active(&self) -> Vec<&'static str> {
        self.behaviors.borrow().as_ref().map_or_else(Vec::new, SiteBehaviors::active)
    }
}

/// Run [`bootstrap`] once the document is ready: immediately when parsing has
/// already finished, otherwise on `DOMContentLoaded`.
pub fn install<D, S, T>(doc: &Rc<D>, storage: &Rc<S>, transport: &Rc<T>, config: SiteConfig) -> Installation
where
    D: DocumentContext + 'static,
    S: Storage + ?Sized + 'static,
    T: Transport + ?Sized + 'static,
{
    let behaviors = Rc::new(RefCell::new(None));

    if doc.is_ready() {
        *behaviors.borrow_mut() = Some(bootstrap(doc, storage, transport, &config));
        return Installation { behaviors, _ready: Subscription::noop() };
    }

    let slot = Rc::clone(&behaviors);
    let mut pending = Some((Rc::clone(doc), Rc::clone(storage), Rc::clone(transport), config));
    let ready = doc.listen(
        Target::Document,
        EventKind::Ready,
        ListenOptions::default(),
        Box::new(move |_: &DomEvent| {
            if let Some((doc, storage, transport, config)) = pending.take() {
                *slot.borrow_mut() = Some(bootstrap(&doc, &storage, &transport, &config));
            }
        }),
    );
    Installation { behaviors, _ready: ready }
}
