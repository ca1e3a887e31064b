//! Portal configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HR templates may embed a JSON block
//! (`<script type="application/json" id="hr-portal-config">`) to override
//! endpoints, storage keys, defaults or the form list. Every field is
//! defaulted, so a page with no block, an empty block, or a partial block all
//! behave like the stock HR module.
//!
//! ERROR HANDLING
//! ==============
//! A malformed block is logged and replaced by defaults; the page keeps
//! working with the stock behavior.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::state::preferences::Preferences;
use crate::state::submission::{FormDescriptor, default_create_forms};

/// Id of the optional embedded configuration block.
pub const CONFIG_ELEMENT_ID: &str = "hr-portal-config";

/// Error returned by [`PortalConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid portal config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Backend routes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Target of every form post and delete.
    pub submit: String,
    /// Employee lookup filtered by duty station.
    pub employees_by_duty_station: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            submit: "/hr/".to_owned(),
            employees_by_duty_station: "/hr/employees_by_duty_station".to_owned(),
        }
    }
}

/// Local storage keys, one per preference.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub primary_color: String,
    pub text_color: String,
    pub font_size: String,
    pub theme_mode: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            primary_color: "themeColor".to_owned(),
            text_color: "fontColor".to_owned(),
            font_size: "fontSize".to_owned(),
            theme_mode: "themeMode".to_owned(),
        }
    }
}

/// Element ids of the settings controls.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControlIds {
    pub primary_color: String,
    pub text_color: String,
    pub font_size: String,
    pub mode_toggle: String,
    pub mode_icon: String,
}

impl Default for ControlIds {
    fn default() -> Self {
        Self {
            primary_color: "themeColor".to_owned(),
            text_color: "fontColor".to_owned(),
            font_size: "fontSize".to_owned(),
            mode_toggle: "toggleMode".to_owned(),
            mode_icon: "modeIcon".to_owned(),
        }
    }
}

/// How the view catches up with the server after a successful mutation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum RefreshStrategy {
    /// Reload the whole page.
    Reload,
    /// Refetch the current URL and swap the element matching `container`,
    /// falling back to a reload when that fails.
    Refetch { container: String },
}

impl Default for RefreshStrategy {
    fn default() -> Self {
        Self::Refetch { container: "main".to_owned() }
    }
}

/// User-visible strings that are not supplied by the server.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub delete_confirm: String,
    pub update_failed: String,
    pub delete_failed: String,
    pub employee_placeholder: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            delete_confirm: "Are you sure you want to delete this employee?".to_owned(),
            update_failed: "An error occurred while updating the employee.".to_owned(),
            delete_failed: "An error occurred while deleting the employee.".to_owned(),
            employee_placeholder: "Select Employee".to_owned(),
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub endpoints: Endpoints,
    pub storage_keys: StorageKeys,
    pub controls: ControlIds,
    /// Values used when storage holds nothing usable.
    pub defaults: Preferences,
    pub create_forms: Vec<FormDescriptor>,
    /// Id prefix shared by the per-row edit forms.
    pub update_form_prefix: String,
    /// Selector of the element carrying the dark-mode class.
    pub mode_target: String,
    /// Selector of the hidden anti-forgery input.
    pub csrf_selector: String,
    pub messages: Messages,
    pub refresh: RefreshStrategy,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            storage_keys: StorageKeys::default(),
            controls: ControlIds::default(),
            defaults: Preferences::default(),
            create_forms: default_create_forms(),
            update_form_prefix: "modifyEmployeeForm".to_owned(),
            mode_target: "body".to_owned(),
            csrf_selector: r#"input[name="csrf_token"]"#.to_owned(),
            messages: Messages::default(),
            refresh: RefreshStrategy::default(),
        }
    }
}

impl PortalConfig {
    /// Parse a configuration block.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `raw` is not a JSON object matching
    /// the configuration shape.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Resolve the effective configuration from the optional embedded block.
    pub fn from_embedded(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using default portal config");
                Self::default()
            }
        }
    }
}
