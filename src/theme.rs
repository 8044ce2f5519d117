//! Light/dark theme preference.
//!
//! Reads the user's preference from storage and applies it as the
//! `data-theme` attribute on the `<html>` element. The toggle flips whatever
//! theme is currently applied (the attribute, not storage) and writes the new
//! value back.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort: storage that throws (private browsing,
//! sandboxed frames) reads as "no preference" and silently skips writes, while
//! the visual theme still changes for the current page.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::rc::Rc;

use crate::config::ThemeConfig;
use crate::dom::{DocumentContext, DomEvent, EventKind, ListenOptions, Target};
use crate::storage::Storage;
use crate::subscription::Teardown;

/// The two supported palettes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored or applied value. Only an exact `"dark"` selects the
    /// dark palette.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == Self::Dark.as_str() {
            Self::Dark
        } else {
            Self::Light
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// The persisted preference, or [`Theme::Light`] when nothing usable is
/// stored or storage cannot be read.
pub fn stored_theme<S: Storage + ?Sized>(storage: &S, config: &ThemeConfig) -> Theme {
    match storage.get(&config.storage_key) {
        Ok(Some(raw)) => Theme::parse(&raw),
        Ok(None) => Theme::Light,
        Err(err) => {
            log::debug!("theme preference unreadable: {err}");
            Theme::Light
        }
    }
}

/// The theme currently applied to the document root.
pub fn current_theme<D: DocumentContext>(doc: &D, config: &ThemeConfig) -> Theme {
    doc.root()
        .and_then(|root| doc.attribute(&root, &config.attribute))
        .map_or(Theme::Light, |raw| Theme::parse(&raw))
}

/// Mark the document root with `theme` and try to persist it.
pub fn apply_theme<D, S>(doc: &D, storage: &S, config: &ThemeConfig, theme: Theme)
where
    D: DocumentContext,
    S: Storage + ?Sized,
{
    if let Some(root) = doc.root() {
        doc.set_attribute(&root, &config.attribute, theme.as_str());
    }
    if let Err(err) = storage.set(&config.storage_key, theme.as_str()) {
        log::debug!("theme preference not persisted: {err}");
    }
}

/// Apply the stored preference.
pub fn init_theme<D, S>(doc: &D, storage: &S, config: &ThemeConfig)
where
    D: DocumentContext,
    S: Storage + ?Sized,
{
    apply_theme(doc, storage, config, stored_theme(storage, config));
}

/// Wire the theme toggle control. Inert when the page has no toggle.
pub fn mount_theme_toggle<D, S>(doc: &Rc<D>, storage: &Rc<S>, config: &ThemeConfig) -> Teardown
where
    D: DocumentContext + 'static,
    S: Storage + ?Sized + 'static,
{
    let Some(toggle) = doc.query(&config.toggle_selector) else {
        return Teardown::inert();
    };

    let doc_cb = Rc::clone(doc);
    let storage_cb = Rc::clone(storage);
    let config_cb = config.clone();
    let click = doc.listen(
        Target::Element(&toggle),
        EventKind::Click,
        ListenOptions::default(),
        Box::new(move |event: &DomEvent| {
            event.prevent_default();
            let next = current_theme(doc_cb.as_ref(), &config_cb).toggled();
            apply_theme(doc_cb.as_ref(), storage_cb.as_ref(), &config_cb, next);
        }),
    );
    std::iter::once(click).collect()
}
