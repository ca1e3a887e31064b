//! In-memory fakes for the browser seams, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use futures::FutureExt;
use futures::channel::oneshot;

use crate::components::forms::{Feedback, FormSource, OptionList};
use crate::net::api::encode_pairs;
use crate::net::transport::{HttpReply, RequestBody, SubmitError, Transport, TransportFuture};
use crate::state::presentation::{StyleMutation, StyleTarget};
use crate::util::storage::{KeyValueStore, StoreError};

pub type Fields = Vec<(String, String)>;

// =============================================================
// Storage
// =============================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    pub read_only: Cell<bool>,
}

impl MemoryStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (key, value) in entries {
            store.entries.borrow_mut().insert((*key).to_owned(), (*value).to_owned());
        }
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only.get() {
            return Err(StoreError::Rejected {
                key: key.to_owned(),
                reason: "QuotaExceededError".to_owned(),
            });
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// =============================================================
// Document
// =============================================================

/// Records mutations and keeps a projection of the resulting document.
#[derive(Debug, Default)]
pub struct RecordingDocument {
    pub log: RefCell<Vec<StyleMutation>>,
    pub variables: RefCell<HashMap<String, String>>,
    pub classes: RefCell<HashMap<(String, String), bool>>,
    pub inner_html: RefCell<HashMap<String, String>>,
    pub controls: RefCell<HashMap<String, String>>,
    pub inline_color: RefCell<Option<String>>,
    pub repaints: Cell<usize>,
}

impl RecordingDocument {
    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables.borrow().get(name).cloned()
    }

    pub fn has_class(&self, selector: &str, class: &str) -> bool {
        self.classes
            .borrow()
            .get(&(selector.to_owned(), class.to_owned()))
            .copied()
            .unwrap_or(false)
    }

    pub fn html(&self, id: &str) -> Option<String> {
        self.inner_html.borrow().get(id).cloned()
    }

    pub fn control(&self, id: &str) -> Option<String> {
        self.controls.borrow().get(id).cloned()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

impl StyleTarget for RecordingDocument {
    fn apply(&self, mutation: &StyleMutation) {
        self.log.borrow_mut().push(mutation.clone());
        match mutation {
            StyleMutation::SetVariable { name, value } => {
                self.variables.borrow_mut().insert((*name).to_owned(), value.clone());
            }
            StyleMutation::SetInlineColor { color, .. } => {
                *self.inline_color.borrow_mut() = Some(color.clone());
            }
            StyleMutation::SetClass { selector, class, enabled } => {
                self.classes
                    .borrow_mut()
                    .insert((selector.clone(), (*class).to_owned()), *enabled);
            }
            StyleMutation::SetInnerHtml { element_id, html } => {
                self.inner_html.borrow_mut().insert(element_id.clone(), (*html).to_owned());
            }
            StyleMutation::SetControlValue { control_id, value } => {
                self.controls.borrow_mut().insert(control_id.clone(), value.clone());
            }
            StyleMutation::Repaint => self.repaints.set(self.repaints.get() + 1),
        }
    }
}

// =============================================================
// Transport
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Post { url: String, body: RequestBody<Fields> },
    Get { url: String },
}

pub enum MockReply {
    Ready(Result<HttpReply, SubmitError>),
    Deferred(oneshot::Receiver<Result<HttpReply, SubmitError>>),
}

#[derive(Default)]
pub struct MockTransport {
    pub sent: RefCell<Vec<Sent>>,
    replies: RefCell<VecDeque<MockReply>>,
}

impl MockTransport {
    pub fn reply_json(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(MockReply::Ready(Ok(HttpReply {
            status,
            body: body.to_owned(),
        })));
    }

    pub fn reply_error(&self, err: SubmitError) {
        self.replies.borrow_mut().push_back(MockReply::Ready(Err(err)));
    }

    /// Queue a reply that resolves only when the returned sender fires.
    pub fn reply_later(&self) -> oneshot::Sender<Result<HttpReply, SubmitError>> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(MockReply::Deferred(rx));
        tx
    }

    pub fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }

    fn next_reply(&self) -> TransportFuture {
        match self.replies.borrow_mut().pop_front() {
            Some(MockReply::Ready(reply)) => futures::future::ready(reply).boxed_local(),
            Some(MockReply::Deferred(rx)) => async move {
                rx.await
                    .unwrap_or_else(|_| Err(SubmitError::Network("reply dropped".to_owned())))
            }
            .boxed_local(),
            None => futures::future::ready(Err(SubmitError::Network("no reply queued".to_owned()))).boxed_local(),
        }
    }
}

impl Transport for MockTransport {
    type Multipart = Fields;

    fn post(&self, url: &str, body: RequestBody<Fields>) -> TransportFuture {
        self.sent.borrow_mut().push(Sent::Post { url: url.to_owned(), body });
        self.next_reply()
    }

    fn get(&self, url: &str) -> TransportFuture {
        self.sent.borrow_mut().push(Sent::Get { url: url.to_owned() });
        self.next_reply()
    }
}

// =============================================================
// Forms and feedback
// =============================================================

pub struct FakeForm {
    pub id: String,
    pub fields: Fields,
}

impl FakeForm {
    pub fn new(id: &str, fields: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_owned(),
            fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }
}

impl FormSource<Fields> for FakeForm {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn url_encoded(&self) -> Result<String, SubmitError> {
        Ok(encode_pairs(self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))))
    }

    fn multipart(&self) -> Result<Fields, SubmitError> {
        Ok(self.fields.clone())
    }
}

#[derive(Debug)]
pub struct RecordingFeedback {
    pub alerts: RefCell<Vec<String>>,
    pub confirms: RefCell<Vec<String>>,
    pub refreshes: Cell<usize>,
    pub confirm_answer: Cell<bool>,
}

impl Default for RecordingFeedback {
    fn default() -> Self {
        Self {
            alerts: RefCell::default(),
            confirms: RefCell::default(),
            refreshes: Cell::new(0),
            confirm_answer: Cell::new(true),
        }
    }
}

impl RecordingFeedback {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Feedback for RecordingFeedback {
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_owned());
        self.confirm_answer.get()
    }

    fn refresh(&self) {
        self.refreshes.set(self.refreshes.get() + 1);
    }
}

/// `<select>` stand-in holding `(value, label)` options.
pub struct FakeSelect {
    pub id: String,
    pub options: RefCell<Vec<(String, String)>>,
}

impl FakeSelect {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            options: RefCell::new(vec![("stale".to_owned(), "Stale".to_owned())]),
        }
    }

    pub fn options(&self) -> Vec<(String, String)> {
        self.options.borrow().clone()
    }
}

impl OptionList for FakeSelect {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn reset(&self, placeholder: &str) {
        *self.options.borrow_mut() = vec![(String::new(), placeholder.to_owned())];
    }

    fn append(&self, value: &str, label: &str) {
        self.options.borrow_mut().push((value.to_owned(), label.to_owned()));
    }
}
