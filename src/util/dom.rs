//! `web-sys` implementations of the component seams.
//!
//! Each adapter is a thin translation: controllers decide what changes,
//! these types carry it out on the live document. A failed DOM call is
//! logged and skipped; it never aborts the rest of a mutation batch.

use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, DomParser, Element, FormData, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlOptionElement, HtmlSelectElement, SupportedType,
};

use crate::components::forms::{Feedback, FormSource, OptionList};
use crate::config::RefreshStrategy;
use crate::net::api::encode_pairs;
use crate::net::transport::SubmitError;
use crate::state::presentation::{StyleMutation, StyleTarget};

fn js_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// [`StyleTarget`] over the page document.
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn root_style_property(&self, name: &str, value: &str) -> Result<(), JsValue> {
        let Some(root) = self.document.document_element() else {
            return Ok(());
        };
        match root.dyn_ref::<HtmlElement>() {
            Some(root) => root.style().set_property(name, value),
            None => Ok(()),
        }
    }

    fn inline_color(&self, selector: &str, color: &str) -> Result<(), JsValue> {
        let nodes = self.document.query_selector_all(selector)?;
        for index in 0..nodes.length() {
            if let Some(element) = nodes.item(index).and_then(|node| node.dyn_into::<HtmlElement>().ok()) {
                element.style().set_property("color", color)?;
            }
        }
        Ok(())
    }

    fn repaint(&self) -> Result<(), JsValue> {
        let Some(body) = self.document.body() else {
            return Ok(());
        };
        let style = body.style();
        style.set_property("display", "none")?;
        // Reading layout forces the recalculation.
        log::trace!("repaint at body height {}", body.offset_height());
        style.set_property("display", "block")
    }

    fn try_apply(&self, mutation: &StyleMutation) -> Result<(), JsValue> {
        match mutation {
            StyleMutation::SetVariable { name, value } => self.root_style_property(name, value),
            StyleMutation::SetInlineColor { selector, color } => self.inline_color(selector, color),
            StyleMutation::SetClass { selector, class, enabled } => {
                if let Some(element) = self.document.query_selector(selector)? {
                    element.class_list().toggle_with_force(class, *enabled)?;
                }
                Ok(())
            }
            StyleMutation::SetInnerHtml { element_id, html } => {
                if let Some(element) = self.document.get_element_by_id(element_id) {
                    element.set_inner_html(html);
                }
                Ok(())
            }
            StyleMutation::SetControlValue { control_id, value } => {
                if let Some(input) = self
                    .document
                    .get_element_by_id(control_id)
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                {
                    input.set_value(value);
                }
                Ok(())
            }
            StyleMutation::Repaint => self.repaint(),
        }
    }
}

impl StyleTarget for BrowserDocument {
    fn apply(&self, mutation: &StyleMutation) {
        if let Err(err) = self.try_apply(mutation) {
            log::warn!("style update {mutation:?} failed: {}", js_text(&err));
        }
    }
}

fn form_error(err: JsValue) -> SubmitError {
    SubmitError::Form(js_text(&err))
}

/// A live `<form>` element.
pub struct HtmlFormSource {
    form: HtmlFormElement,
}

impl HtmlFormSource {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }
}

impl FormSource<FormData> for HtmlFormSource {
    fn id(&self) -> String {
        self.form.id()
    }

    fn url_encoded(&self) -> Result<String, SubmitError> {
        let data = self.multipart()?;
        let entries = js_sys::try_iter(&data)
            .map_err(form_error)?
            .ok_or_else(|| SubmitError::Form("form data is not iterable".to_owned()))?;
        let mut pairs = Vec::new();
        for entry in entries {
            let entry = js_sys::Array::from(&entry.map_err(form_error)?);
            // File entries have no string value.
            if let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
                pairs.push((name, value));
            }
        }
        Ok(encode_pairs(pairs.iter().map(|(name, value)| (name.as_str(), value.as_str()))))
    }

    fn multipart(&self) -> Result<FormData, SubmitError> {
        FormData::new_with_form(&self.form).map_err(form_error)
    }
}

/// A live `<select>` element.
pub struct SelectOptions {
    select: HtmlSelectElement,
}

impl SelectOptions {
    pub fn new(select: HtmlSelectElement) -> Self {
        Self { select }
    }
}

impl OptionList for SelectOptions {
    fn id(&self) -> String {
        self.select.id()
    }

    fn reset(&self, placeholder: &str) {
        self.select.set_length(0);
        self.append("", placeholder);
    }

    fn append(&self, value: &str, label: &str) {
        let added = HtmlOptionElement::new_with_text_and_value(label, value)
            .and_then(|option| self.select.add_with_html_option_element(&option));
        if let Err(err) = added {
            log::warn!("could not add option {value:?} to `{}`: {}", self.select.id(), js_text(&err));
        }
    }
}

/// Why an in-place refresh could not complete.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("no window or document")]
    NoDocument,
    #[error("refetch failed: {0}")]
    Fetch(String),
    #[error("refetch returned status {0}")]
    Status(u16),
    #[error("no `{0}` element to swap")]
    MissingContainer(String),
    #[error("{0}")]
    Script(String),
}

fn script_error(err: JsValue) -> RefreshError {
    RefreshError::Script(js_text(&err))
}

/// Window dialogs plus the configured refresh strategy.
pub struct BrowserFeedback {
    strategy: RefreshStrategy,
    after_refresh: Rc<dyn Fn()>,
}

impl BrowserFeedback {
    /// `after_refresh` runs once new content is in place.
    pub fn new(strategy: RefreshStrategy, after_refresh: Rc<dyn Fn()>) -> Self {
        Self { strategy, after_refresh }
    }
}

impl Feedback for BrowserFeedback {
    fn alert(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.alert_with_message(message) {
            log::warn!("alert failed: {}", js_text(&err));
        }
    }

    fn confirm(&self, message: &str) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        window.confirm_with_message(message).unwrap_or_else(|err| {
            log::warn!("confirm failed: {}", js_text(&err));
            false
        })
    }

    fn refresh(&self) {
        match &self.strategy {
            RefreshStrategy::Reload => reload(),
            RefreshStrategy::Refetch { container } => {
                let container = container.clone();
                let after_refresh = Rc::clone(&self.after_refresh);
                wasm_bindgen_futures::spawn_local(async move {
                    match swap_container(&container).await {
                        Ok(()) => {
                            log::debug!("refreshed `{container}` in place");
                            after_refresh();
                        }
                        Err(err) => {
                            log::warn!("{err}; reloading page");
                            reload();
                        }
                    }
                });
            }
        }
    }
}

fn reload() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.location().reload() {
        log::error!("page reload failed: {}", js_text(&err));
    }
}

/// Refetch the current page and replace `container`'s content with the
/// fresh copy.
async fn swap_container(container: &str) -> Result<(), RefreshError> {
    let window = web_sys::window().ok_or(RefreshError::NoDocument)?;
    let document = window.document().ok_or(RefreshError::NoDocument)?;
    let href = window.location().href().map_err(script_error)?;

    let resp = gloo_net::http::Request::get(&href)
        .header("Accept", "text/html")
        .send()
        .await
        .map_err(|err| RefreshError::Fetch(err.to_string()))?;
    if !resp.ok() {
        return Err(RefreshError::Status(resp.status()));
    }
    let html = resp.text().await.map_err(|err| RefreshError::Fetch(err.to_string()))?;

    let fresh = DomParser::new()
        .and_then(|parser| parser.parse_from_string(&html, SupportedType::TextHtml))
        .map_err(script_error)?;
    let incoming = find(&fresh, container)?;
    let current = find(&document, container)?;
    current.set_inner_html(&incoming.inner_html());
    Ok(())
}

fn find(document: &Document, selector: &str) -> Result<Element, RefreshError> {
    document
        .query_selector(selector)
        .map_err(script_error)?
        .ok_or_else(|| RefreshError::MissingContainer(selector.to_owned()))
}
