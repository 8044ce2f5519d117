//! Markup conventions shared with the site's HTML and stylesheet.
//!
//! These are the defaults baked into [`crate::config::SiteConfig`]; a page can
//! override any of them through its inline configuration block.

// ── Configuration ───────────────────────────────────────────────

/// Inline JSON block that may override the defaults below.
pub const CONFIG_SELECTOR: &str = "script#site-behaviors-config";

// ── Theme ───────────────────────────────────────────────────────

/// Storage key holding the persisted theme.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Attribute on the document root read by the stylesheet.
pub const THEME_ATTRIBUTE: &str = "data-theme";

pub const THEME_TOGGLE_SELECTOR: &str = ".js-theme-toggle";

// ── Guides panel ────────────────────────────────────────────────

pub const PANEL_TOGGLE_SELECTOR: &str = ".js-guides-toggle";
pub const PANEL_SELECTOR: &str = ".guides";
pub const PANEL_VISIBLE_CLASS: &str = "is-visible";
pub const PANEL_TRIGGER_ACTIVE_CLASS: &str = "active";

// ── Navigation ──────────────────────────────────────────────────

pub const NAV_SELECTOR: &str = ".navbar-white_ok.w-nav";
pub const NAV_TRIGGER_SELECTOR: &str = ".w-nav-button";
pub const NAV_MENU_SELECTOR: &str = ".w-nav-menu";

/// Id assigned to the menu when the markup does not provide one.
pub const NAV_MENU_ID: &str = "primary-nav-menu";

pub const NAV_OPEN_CLASS: &str = "is-open";

/// Body class used by the stylesheet to lock page scrolling.
pub const BODY_NAV_OPEN_CLASS: &str = "nav-open";

pub const NAV_OVERLAY_CLASS: &str = "nav-overlay";

/// `KeyboardEvent.key` value that dismisses the menu.
pub const ESCAPE_KEY: &str = "Escape";

// ── Scroll progress ─────────────────────────────────────────────

pub const PROGRESS_BAR_SELECTOR: &str = ".progress-bar, .progress-bar-ds";

// ── Contact form ────────────────────────────────────────────────

pub const CONTACT_FORM_SELECTOR: &str = "form[name=\"contact\"]";
pub const FORM_STATUS_SELECTOR: &str = ".form-status";
pub const FORM_SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";

/// Attribute on the form mirroring its submission state.
pub const FORM_STATE_ATTRIBUTE: &str = "data-form-state";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const FORM_SENDING_MESSAGE: &str = "Sending…";
pub const FORM_SUCCESS_MESSAGE: &str = "Message sent. Thank you!";
pub const FORM_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";
