//! Browser entry points.
//!
//! SYSTEM CONTEXT
//! ==============
//! `start` runs when the WASM module is instantiated. It resolves the
//! configuration, restores preferences, and installs one delegated document
//! listener per [`Trigger`]. Events are routed through the [`BindingTable`]
//! by walking up from the event target, so content swapped in by a refresh
//! is live without rebinding.
//!
//! `deleteEmployee` and `updateEmployeeDropdown` are exported for the
//! inline handlers in the HR templates.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use crate::bindings::{BindingTable, Handler, Trigger};
use crate::components::forms::{FormOrchestrator, OptionList};
use crate::components::preferences::PreferenceController;
use crate::config::{CONFIG_ELEMENT_ID, PortalConfig};
use crate::net::api::GlooTransport;
use crate::state::preferences::parse_font_size;
use crate::util::dom::{BrowserDocument, BrowserFeedback, HtmlFormSource, SelectOptions};
use crate::util::storage::BrowserStore;

type Preferences = PreferenceController<BrowserStore, BrowserDocument>;
type Forms = FormOrchestrator<GlooTransport, BrowserFeedback>;

thread_local! {
    static PORTAL: RefCell<Option<Rc<Portal>>> = const { RefCell::new(None) };
}

struct Portal {
    document: Document,
    table: BindingTable,
    preferences: Rc<Preferences>,
    forms: Rc<Forms>,
    csrf_selector: String,
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("no document; portal not started");
        return;
    };
    let raw = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content());
    let config = PortalConfig::from_embedded(raw.as_deref());

    let table = match BindingTable::from_config(&config) {
        Ok(table) => table,
        Err(err) => {
            log::error!("{err}; portal not started");
            return;
        }
    };
    let report = table.resolve(|id| document.get_element_by_id(id).is_some());
    log::debug!("{} bound controls on this page", report.present.len());
    if !report.missing.is_empty() {
        log::debug!("not on this page: {}", report.missing.join(", "));
    }

    let preferences = Rc::new(PreferenceController::new(
        &config,
        BrowserStore::open(),
        BrowserDocument::new(document.clone()),
    ));
    preferences.restore_preferences();

    let reapply: Rc<dyn Fn()> = {
        let preferences = Rc::clone(&preferences);
        Rc::new(move || preferences.reapply())
    };
    let feedback = BrowserFeedback::new(config.refresh.clone(), reapply);
    let forms = Rc::new(FormOrchestrator::new(&config, GlooTransport, feedback));

    let portal = Rc::new(Portal {
        document: document.clone(),
        table,
        preferences,
        forms,
        csrf_selector: config.csrf_selector.clone(),
    });
    for trigger in Trigger::ALL {
        listen(&document, trigger, Rc::clone(&portal));
    }
    PORTAL.with(|slot| *slot.borrow_mut() = Some(portal));
    log::debug!("portal started");
}

fn listen(document: &Document, trigger: Trigger, portal: Rc<Portal>) {
    let callback = Closure::wrap(Box::new(move |event: Event| {
        portal.dispatch(trigger, &event);
    }) as Box<dyn FnMut(Event)>);
    match document.add_event_listener_with_callback(trigger.event_name(), callback.as_ref().unchecked_ref()) {
        // Listeners live for the page's lifetime.
        Ok(()) => callback.forget(),
        Err(err) => log::error!("could not listen for {}: {err:?}", trigger.event_name()),
    }
}

fn current_portal() -> Option<Rc<Portal>> {
    let portal = PORTAL.with(|slot| slot.borrow().clone());
    if portal.is_none() {
        log::warn!("portal not started");
    }
    portal
}

fn input_value(element: &Element) -> Option<String> {
    element.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
}

/// Ids arrive from templates as strings or numbers.
fn id_text(value: &JsValue) -> Option<String> {
    value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))
        .map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
}

impl Portal {
    /// Nearest element on the target's ancestor chain with a binding.
    fn route(&self, trigger: Trigger, event: &Event) -> Option<(Element, &Handler)> {
        let mut current = event.target().and_then(|t| t.dyn_into::<Element>().ok());
        while let Some(element) = current {
            if let Some(handler) = self.table.route(trigger, &element.id()) {
                return Some((element, handler));
            }
            current = element.parent_element();
        }
        None
    }

    fn dispatch(&self, trigger: Trigger, event: &Event) {
        let Some((element, handler)) = self.route(trigger, event) else {
            return;
        };
        log::debug!("{} on `{}` → {handler:?}", trigger.event_name(), element.id());
        match handler {
            Handler::PrimaryColor => {
                if let Some(value) = input_value(&element) {
                    self.preferences.set_primary_color(&value);
                }
            }
            Handler::TextColor => {
                if let Some(value) = input_value(&element) {
                    self.preferences.set_text_color(&value);
                }
            }
            Handler::FontSize => match input_value(&element).as_deref().and_then(parse_font_size) {
                Some(px) => self.preferences.set_font_size(px),
                None => log::debug!("ignoring unusable font size input"),
            },
            Handler::ToggleDarkMode => {
                self.preferences.toggle_dark_mode();
            }
            Handler::CreateForm(descriptor) => {
                event.prevent_default();
                let Some(form) = as_form(element) else {
                    return;
                };
                let forms = Rc::clone(&self.forms);
                let descriptor = descriptor.clone();
                spawn_local(async move {
                    let outcome = forms.submit_create(&descriptor, &HtmlFormSource::new(form)).await;
                    log::debug!("{} settled: {outcome:?}", descriptor.id);
                });
            }
            Handler::UpdateForm => {
                event.prevent_default();
                let Some(form) = as_form(element) else {
                    return;
                };
                let forms = Rc::clone(&self.forms);
                spawn_local(async move {
                    let source = HtmlFormSource::new(form);
                    let outcome = forms.submit_update(&source).await;
                    log::debug!("update settled: {outcome:?}");
                });
            }
        }
    }

    fn csrf_token(&self) -> Option<String> {
        let element = match self.document.query_selector(&self.csrf_selector) {
            Ok(element) => element?,
            Err(err) => {
                log::warn!("bad csrf selector `{}`: {err:?}", self.csrf_selector);
                return None;
            }
        };
        input_value(&element)
    }
}

fn as_form(element: Element) -> Option<HtmlFormElement> {
    match element.dyn_into::<HtmlFormElement>() {
        Ok(form) => Some(form),
        Err(element) => {
            log::warn!("`{}` is bound to submit but is not a form", element.id());
            None
        }
    }
}

/// Confirm, then ask the backend to delete the employee.
#[wasm_bindgen(js_name = deleteEmployee)]
pub fn delete_employee(employee_id: JsValue) {
    let Some(portal) = current_portal() else {
        return;
    };
    let Some(id) = id_text(&employee_id) else {
        log::warn!("deleteEmployee called without an id");
        return;
    };
    // Confirm before returning to the page so the dialog blocks the click.
    let guard = match portal.forms.confirm_delete(&id) {
        Ok(guard) => guard,
        Err(outcome) => {
            log::debug!("delete of {id} not sent: {outcome:?}");
            return;
        }
    };
    let token = portal.csrf_token();
    let forms = Rc::clone(&portal.forms);
    spawn_local(async move {
        let outcome = forms.send_delete(guard, &id, token.as_deref()).await;
        log::debug!("delete of {id} settled: {outcome:?}");
    });
}

/// Repopulate the `<select id=select_id>` with the duty station's employees.
#[wasm_bindgen(js_name = updateEmployeeDropdown)]
pub fn update_employee_dropdown(duty_station_id: JsValue, select_id: &str) {
    let Some(portal) = current_portal() else {
        return;
    };
    let Some(select) = portal
        .document
        .get_element_by_id(select_id)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    else {
        log::warn!("no select `{select_id}` to populate");
        return;
    };
    let target = SelectOptions::new(select);
    let generation = portal.forms.reset_dependent_dropdown(&target);
    let Some(parent) = id_text(&duty_station_id) else {
        return;
    };
    let forms = Rc::clone(&portal.forms);
    spawn_local(async move {
        if let Ok(count) = forms.fill_dependent_dropdown(generation, &parent, &target).await {
            log::debug!("loaded {count} employees into `{}`", target.id());
        }
    });
}
