//! Form descriptors and in-flight request bookkeeping.
//!
//! DESIGN
//! ======
//! Each submission runs `Idle → Submitting → {Succeeded, Failed}` and is
//! terminal either way. A key (form id, or `delete:<id>`) may only have one
//! request in flight; the [`InFlightGuard`] releases it when the request
//! settles, whichever way it settles.

#[cfg(test)]
#[path = "submission_test.rs"]
mod submission_test;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::Deserialize;

use crate::net::transport::SubmitError;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Request body encoding for a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    UrlEncoded,
    Multipart,
}

/// A create form bound by id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct FormDescriptor {
    pub id: String,
    /// File uploads need multipart; everything else posts url-encoded.
    #[serde(default)]
    pub multipart: bool,
}

impl FormDescriptor {
    pub fn new(id: &str, multipart: bool) -> Self {
        Self { id: id.to_owned(), multipart }
    }

    pub fn encoding(&self) -> Encoding {
        if self.multipart { Encoding::Multipart } else { Encoding::UrlEncoded }
    }

    /// Human-facing name used in the generic failure alert (`addLeaveForm` → `addLeave`).
    pub fn label(&self) -> String {
        self.id.replacen("Form", "", 1)
    }
}

/// Create forms served by the HR module.
pub fn default_create_forms() -> Vec<FormDescriptor> {
    vec![
        FormDescriptor::new("addEmployeeForm", true),
        FormDescriptor::new("addOvertimeForm", false),
        FormDescriptor::new("addAttendanceForm", false),
        FormDescriptor::new("addLeaveForm", false),
        FormDescriptor::new("addLetterForm", false),
        FormDescriptor::new("addContractForm", false),
        FormDescriptor::new("addPositionForm", false),
    ]
}

/// How a submission ended.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The server accepted the request; the view was refreshed.
    Succeeded,
    /// Transport or business failure; the user was alerted.
    Failed(SubmitError),
    /// The user declined the confirmation; nothing was sent.
    Declined,
    /// The same key already had a request in flight; nothing was sent.
    Busy,
}

/// Keys with a request currently in flight.
#[derive(Clone, Debug, Default)]
pub struct InFlight {
    keys: Rc<RefCell<HashSet<String>>>,
}

impl InFlight {
    /// Claim `key`, or `None` if it is already claimed.
    pub fn try_begin(&self, key: &str) -> Option<InFlightGuard> {
        if !self.keys.borrow_mut().insert(key.to_owned()) {
            return None;
        }
        Some(InFlightGuard {
            keys: Rc::clone(&self.keys),
            key: key.to_owned(),
        })
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.keys.borrow().contains(key)
    }
}

/// Releases its key on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Rc<RefCell<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys.borrow_mut().remove(&self.key);
    }
}

/// Per-target request counters; only the latest request for a target may
/// write into it.
#[derive(Debug, Default)]
pub struct Generations {
    latest: RefCell<HashMap<String, u64>>,
}

impl Generations {
    /// Start a new generation for `target`, superseding earlier ones.
    pub fn advance(&self, target: &str) -> u64 {
        let mut latest = self.latest.borrow_mut();
        let counter = latest.entry(target.to_owned()).or_insert(0);
        *counter += 1;
        *counter
    }

    pub fn is_current(&self, target: &str, generation: u64) -> bool {
        self.latest.borrow().get(target) == Some(&generation)
    }
}
