//! Behavior configuration.
//!
//! Every selector, class name, attribute and message the behaviors use lives
//! here, defaulting to the conventions in [`crate::consts`]. A page can
//! override any subset by embedding JSON in
//! `<script type="application/json" id="site-behaviors-config">`; fields the
//! JSON omits keep their defaults.
//!
//! ERROR HANDLING
//! ==============
//! A malformed override never disables the behaviors: [`SiteConfig::from_document`]
//! logs the parse error and continues with the defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts;
use crate::dom::DocumentContext;

/// Error returned by [`SiteConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid behavior config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for every behavior on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub theme: ThemeConfig,
    pub panel: PanelConfig,
    pub navigation: NavigationConfig,
    pub scroll_progress: ScrollProgressConfig,
    pub contact_form: ContactFormConfig,
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `raw` is not a valid config object.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read the inline override block, falling back to defaults when it is
    /// absent, empty or malformed.
    pub fn from_document<D: DocumentContext>(doc: &D) -> Self {
        let Some(element) = doc.query(consts::CONFIG_SELECTOR) else {
            return Self::default();
        };
        let raw = doc.text_content(&element).unwrap_or_default();
        if raw.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using default behavior config");
                Self::default()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    pub storage_key: String,
    pub attribute: String,
    pub toggle_selector: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: consts::THEME_STORAGE_KEY.to_owned(),
            attribute: consts::THEME_ATTRIBUTE.to_owned(),
            toggle_selector: consts::THEME_TOGGLE_SELECTOR.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    pub toggle_selector: String,
    pub panel_selector: String,
    pub visible_class: String,
    pub active_class: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            toggle_selector: consts::PANEL_TOGGLE_SELECTOR.to_owned(),
            panel_selector: consts::PANEL_SELECTOR.to_owned(),
            visible_class: consts::PANEL_VISIBLE_CLASS.to_owned(),
            active_class: consts::PANEL_TRIGGER_ACTIVE_CLASS.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationConfig {
    pub nav_selector: String,
    pub trigger_selector: String,
    pub menu_selector: String,
    pub menu_id: String,
    pub open_class: String,
    pub body_open_class: String,
    pub overlay_class: String,
    pub close_key: String,
}

impl NavigationConfig {
    /// Selector matching an existing scrim.
    #[must_use]
    pub fn overlay_selector(&self) -> String {
        format!(".{}", self.overlay_class)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            nav_selector: consts::NAV_SELECTOR.to_owned(),
            trigger_selector: consts::NAV_TRIGGER_SELECTOR.to_owned(),
            menu_selector: consts::NAV_MENU_SELECTOR.to_owned(),
            menu_id: consts::NAV_MENU_ID.to_owned(),
            open_class: consts::NAV_OPEN_CLASS.to_owned(),
            body_open_class: consts::BODY_NAV_OPEN_CLASS.to_owned(),
            overlay_class: consts::NAV_OVERLAY_CLASS.to_owned(),
            close_key: consts::ESCAPE_KEY.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollProgressConfig {
    pub bar_selector: String,
}

impl Default for ScrollProgressConfig {
    fn default() -> Self {
        Self { bar_selector: consts::PROGRESS_BAR_SELECTOR.to_owned() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFormConfig {
    pub form_selector: String,
    pub status_selector: String,
    pub submit_selector: String,
    pub state_attribute: String,
    pub sending_message: String,
    pub success_message: String,
    pub error_message: String,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            form_selector: consts::CONTACT_FORM_SELECTOR.to_owned(),
            status_selector: consts::FORM_STATUS_SELECTOR.to_owned(),
            submit_selector: consts::FORM_SUBMIT_SELECTOR.to_owned(),
            state_attribute: consts::FORM_STATE_ATTRIBUTE.to_owned(),
            sending_message: consts::FORM_SENDING_MESSAGE.to_owned(),
            success_message: consts::FORM_SUCCESS_MESSAGE.to_owned(),
            error_message: consts::FORM_ERROR_MESSAGE.to_owned(),
        }
    }
}
