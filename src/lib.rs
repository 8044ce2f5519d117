//! Client-side behavior layer for the marketing site.
//!
//! This crate is compiled to WebAssembly and runs in the browser once the page
//! has been parsed. Each behavior owns a small slice of the page (theme marker,
//! mobile navigation, guides panel, scroll progress bars, contact form) and
//! talks to the browser only through the capabilities in [`dom`], [`storage`]
//! and [`transport`], so everything except the [`web`] adapters runs natively
//! under `cargo test`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`bootstrap`] | Page-ready wiring of every behavior |
//! | [`theme`] | Persisted light/dark preference and its toggle |
//! | [`nav`] | Mobile navigation overlay state machine |
//! | [`panel`] | Guides panel show/hide toggle |
//! | [`scroll`] | Frame-coalesced scroll progress indicator |
//! | [`form`] | Contact form submission state machine |
//! | [`config`] | Selectors, class names and messages (JSON-overridable) |
//! | [`dom`] | `DocumentContext` capability and event types |
//! | [`subscription`] | Listener handles that detach on drop |
//! | [`storage`] | Key-value storage capability |
//! | [`transport`] | Form POST capability |
//! | [`consts`] | Markup conventions shared with the styling layer |
//! | `web` | Browser adapters and the WASM entry point (`hydrate` only) |

pub mod bootstrap;
pub mod config;
pub mod consts;
pub mod dom;
pub mod form;
pub mod nav;
pub mod panel;
pub mod scroll;
pub mod storage;
pub mod subscription;
pub mod theme;
pub mod transport;

#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(test)]
mod fixture;
