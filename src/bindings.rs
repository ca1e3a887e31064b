//! Declarative event binding table.
//!
//! DESIGN
//! ======
//! Every control the portal reacts to is listed here as
//! `(trigger, selector) → handler`. The browser glue installs one delegated
//! listener per trigger on the document and routes each event through
//! [`BindingTable::route`], so forms inserted after start-up (per-row edit
//! forms, refreshed content) are covered without rebinding.

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use std::collections::HashSet;

use crate::config::PortalConfig;
use crate::state::submission::FormDescriptor;

/// DOM event that fires a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    Input,
    Click,
    Submit,
}

impl Trigger {
    pub const ALL: [Trigger; 3] = [Trigger::Input, Trigger::Click, Trigger::Submit];

    /// DOM event name.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Click => "click",
            Self::Submit => "submit",
        }
    }
}

/// Which element ids a binding matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    Id(String),
    IdPrefix(String),
}

impl Selector {
    pub fn matches(&self, element_id: &str) -> bool {
        match self {
            Self::Id(id) => id == element_id,
            Self::IdPrefix(prefix) => !element_id.is_empty() && element_id.starts_with(prefix.as_str()),
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Id(text) | Self::IdPrefix(text) => text,
        }
    }
}

/// What a matched event does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Handler {
    PrimaryColor,
    TextColor,
    FontSize,
    ToggleDarkMode,
    CreateForm(FormDescriptor),
    UpdateForm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub trigger: Trigger,
    pub selector: Selector,
    pub handler: Handler,
}

impl Binding {
    pub fn new(trigger: Trigger, selector: Selector, handler: Handler) -> Self {
        Self { trigger, selector, handler }
    }
}

/// Error returned when a binding table is inconsistent.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("{trigger:?} binding has an empty selector")]
    EmptySelector { trigger: Trigger },
    #[error("duplicate {trigger:?} binding for `{selector}`")]
    Duplicate { trigger: Trigger, selector: String },
}

/// Which fixed-id bindings have an element in the current document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingReport {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

/// Validated binding table.
#[derive(Clone, Debug)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    /// Build a table, rejecting empty selectors and duplicate
    /// `(trigger, selector)` pairs.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindingError`] found.
    pub fn new(bindings: Vec<Binding>) -> Result<Self, BindingError> {
        let mut seen = HashSet::new();
        for binding in &bindings {
            if binding.selector.text().trim().is_empty() {
                return Err(BindingError::EmptySelector { trigger: binding.trigger });
            }
            if !seen.insert((binding.trigger, binding.selector.clone())) {
                return Err(BindingError::Duplicate {
                    trigger: binding.trigger,
                    selector: binding.selector.text().to_owned(),
                });
            }
        }
        Ok(Self { bindings })
    }

    /// The portal's bindings for `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`BindingError`] if the configured ids collide or are empty.
    pub fn from_config(config: &PortalConfig) -> Result<Self, BindingError> {
        let controls = &config.controls;
        let mut bindings = vec![
            Binding::new(Trigger::Input, Selector::Id(controls.primary_color.clone()), Handler::PrimaryColor),
            Binding::new(Trigger::Input, Selector::Id(controls.text_color.clone()), Handler::TextColor),
            Binding::new(Trigger::Input, Selector::Id(controls.font_size.clone()), Handler::FontSize),
            Binding::new(Trigger::Click, Selector::Id(controls.mode_toggle.clone()), Handler::ToggleDarkMode),
        ];
        bindings.extend(config.create_forms.iter().map(|form| {
            Binding::new(Trigger::Submit, Selector::Id(form.id.clone()), Handler::CreateForm(form.clone()))
        }));
        bindings.push(Binding::new(
            Trigger::Submit,
            Selector::IdPrefix(config.update_form_prefix.clone()),
            Handler::UpdateForm,
        ));
        Self::new(bindings)
    }

    /// Handler for an event of `trigger` on the element with `element_id`.
    /// Exact ids win over prefixes.
    pub fn route(&self, trigger: Trigger, element_id: &str) -> Option<&Handler> {
        let candidates = || self.bindings.iter().filter(move |b| b.trigger == trigger);
        candidates()
            .find(|b| matches!(&b.selector, Selector::Id(id) if id == element_id))
            .or_else(|| candidates().find(|b| b.selector.matches(element_id)))
            .map(|b| &b.handler)
    }

    /// Check fixed-id bindings against the document. Prefix bindings are
    /// skipped since their elements may not exist yet.
    pub fn resolve(&self, exists: impl Fn(&str) -> bool) -> BindingReport {
        let mut report = BindingReport::default();
        for binding in &self.bindings {
            let Selector::Id(id) = &binding.selector else {
                continue;
            };
            if exists(id) {
                report.present.push(id.clone());
            } else {
                report.missing.push(id.clone());
            }
        }
        report
    }
}
