//! Browser adapters and the WASM entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything in this module requires a browser and is compiled only with the
//! `hydrate` feature. Each adapter implements one capability trait over
//! `web-sys`; the rest of the crate never sees a `JsValue`.
//!
//! ERROR HANDLING
//! ==============
//! DOM calls that can throw are logged at warn level and otherwise ignored.
//! Storage and network failures are returned as typed errors and handled by
//! the behaviors.

mod document;
mod storage;
mod transport;

pub use document::BrowserDocument;
pub use storage::BrowserStorage;
pub use transport::FetchTransport;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::bootstrap::{Installation, install};
use crate::config::SiteConfig;

thread_local! {
    static INSTALLATION: RefCell<Option<Installation>> = const { RefCell::new(None) };
}

/// Module start: install logging, then wire every behavior once the page is
/// ready. The installation is kept for the lifetime of the page.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already installed");
    }

    let Some(doc) = BrowserDocument::from_window() else {
        log::warn!("no window/document; site behaviors disabled");
        return;
    };
    let doc = Rc::new(doc);
    let storage = Rc::new(BrowserStorage::new(doc.window().clone()));
    let transport = Rc::new(FetchTransport);
    let config = SiteConfig::from_document(doc.as_ref());

    let installation = install(&doc, &storage, &transport, config);
    INSTALLATION.with(|slot| *slot.borrow_mut() = Some(installation));
}

/// Readable text for a thrown JS value.
pub(crate) fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Log a failed DOM call.
pub(crate) fn warn_on_err<T>(result: Result<T, JsValue>, action: &str) {
    if let Err(err) = result {
        log::warn!("{action} failed: {}", describe(&err));
    }
}
