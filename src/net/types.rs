//! JSON reply schema of the HR backend.
//!
//! DESIGN
//! ======
//! Replies are decoded leniently: unknown fields are ignored and ids are
//! accepted as either JSON numbers or strings, since the backend echoes
//! whatever it received in the form post.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer};

use crate::net::transport::SubmitError;

/// `status` discriminator of a submission reply.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SubmissionStatus {
    Success,
    /// Any other value, kept verbatim for logging.
    Other(String),
}

impl From<String> for SubmissionStatus {
    fn from(value: String) -> Self {
        if value == "success" { Self::Success } else { Self::Other(value) }
    }
}

/// Reply to a form post or delete on the submit endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SubmissionResult {
    pub status: SubmissionStatus,
    #[serde(default)]
    pub message: String,
    /// Structured validation detail on failure.
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        self.status == SubmissionStatus::Success
    }

    /// Split into the success value or a [`SubmitError::Business`].
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Business`] carrying the message and validation
    /// detail when the status is not `"success"`.
    pub fn into_result(self) -> Result<Self, SubmitError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SubmitError::Business {
                message: self.message,
                errors: self.errors,
            })
        }
    }
}

/// One entry of the duty-station employee lookup.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EmployeeOption {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
}

/// Reply of the duty-station employee lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EmployeesByDutyStation {
    #[serde(default)]
    pub employees: Vec<EmployeeOption>,
}

fn id_from_value<E: serde::de::Error>(value: serde_json::Value) -> Result<String, E> {
    match value {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        _ => Err(E::custom("expected string or number id")),
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(serde_json::Value::deserialize(deserializer)?)
}
