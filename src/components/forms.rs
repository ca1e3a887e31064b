//! Form submission orchestrator for the HR module.
//!
//! One endpoint serves every create, update and delete. Replies are JSON
//! `{status, message, errors?}`; the user always sees exactly one alert per
//! settled request, and a successful mutation refreshes the view so it shows
//! the latest server state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Request methods are `async` and borrow `self`; the browser glue wraps the
//! orchestrator in an `Rc` and spawns each call onto the local executor.
//! Steps the user must see before the calling handler returns (delete
//! confirmation, dropdown reset) are plain methods, so the glue runs them
//! synchronously and spawns only the request that follows.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::config::{Endpoints, Messages, PortalConfig};
use crate::net::api::{delete_employee_body, employees_lookup_url};
use crate::net::transport::{RequestBody, SubmitError, Transport, decode_reply};
use crate::net::types::{EmployeesByDutyStation, SubmissionResult};
use crate::state::submission::{Encoding, FormDescriptor, Generations, InFlight, InFlightGuard, Outcome};

/// User-facing side effects of a settled request.
pub trait Feedback {
    /// Show a blocking message.
    fn alert(&self, message: &str);
    /// Ask a blocking yes/no question.
    fn confirm(&self, message: &str) -> bool;
    /// Bring the view up to date with the server.
    fn refresh(&self);
}

impl<F: Feedback + ?Sized> Feedback for &F {
    fn alert(&self, message: &str) {
        (**self).alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn refresh(&self) {
        (**self).refresh();
    }
}

/// A form element that can be serialized either way.
pub trait FormSource<M> {
    fn id(&self) -> String;

    /// Successful text controls as `application/x-www-form-urlencoded`.
    /// File inputs are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Form`] if the platform cannot read the form.
    fn url_encoded(&self) -> Result<String, SubmitError>;

    /// All successful controls, files included.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Form`] if the platform cannot read the form.
    fn multipart(&self) -> Result<M, SubmitError>;
}

/// A `<select>` whose options are replaced from a lookup.
pub trait OptionList {
    fn id(&self) -> String;
    /// Drop every option and leave only an empty-valued placeholder.
    fn reset(&self, placeholder: &str);
    fn append(&self, value: &str, label: &str);
}

pub struct FormOrchestrator<T, F> {
    transport: T,
    feedback: F,
    endpoints: Endpoints,
    messages: Messages,
    create_forms: Vec<FormDescriptor>,
    update_prefix: String,
    in_flight: InFlight,
    generations: Generations,
}

impl<T: Transport, F: Feedback> FormOrchestrator<T, F> {
    pub fn new(config: &PortalConfig, transport: T, feedback: F) -> Self {
        Self {
            transport,
            feedback,
            endpoints: config.endpoints.clone(),
            messages: config.messages.clone(),
            create_forms: config.create_forms.clone(),
            update_prefix: config.update_form_prefix.clone(),
            in_flight: InFlight::default(),
            generations: Generations::default(),
        }
    }

    pub fn create_forms(&self) -> &[FormDescriptor] {
        &self.create_forms
    }

    /// Whether a request for `key` (a form id, or `delete:<id>`) is pending.
    pub fn is_pending(&self, key: &str) -> bool {
        self.in_flight.is_pending(key)
    }

    /// Submit a create form, encoded per its descriptor.
    pub async fn submit_create(&self, descriptor: &FormDescriptor, form: &impl FormSource<T::Multipart>) -> Outcome {
        let failure = format!("An error occurred while submitting {}.", descriptor.label());
        self.submit_form(&descriptor.id, descriptor.encoding(), form, &failure).await
    }

    /// Submit a per-row edit form; always url-encoded.
    pub async fn submit_update(&self, form: &impl FormSource<T::Multipart>) -> Outcome {
        let id = form.id();
        if !id.starts_with(&self.update_prefix) {
            log::warn!("form `{id}` is not an update form");
        }
        let failure = self.messages.update_failed.clone();
        self.submit_form(&id, Encoding::UrlEncoded, form, &failure).await
    }

    /// Ask the user to confirm deleting `entity_id` and claim its in-flight
    /// slot. Runs synchronously so the dialog blocks the calling interaction.
    ///
    /// # Errors
    ///
    /// Returns [`Outcome::Busy`] when a delete of the same entity is pending
    /// (without asking again) and [`Outcome::Declined`] when the user says no.
    pub fn confirm_delete(&self, entity_id: &str) -> Result<InFlightGuard, Outcome> {
        let key = format!("delete:{entity_id}");
        if self.in_flight.is_pending(&key) {
            log::warn!("delete of {entity_id} already in flight");
            return Err(Outcome::Busy);
        }
        if !self.feedback.confirm(&self.messages.delete_confirm) {
            log::debug!("delete of {entity_id} declined");
            return Err(Outcome::Declined);
        }
        self.in_flight.try_begin(&key).ok_or(Outcome::Busy)
    }

    /// Post a confirmed delete. `guard` is released when the reply settles.
    pub async fn send_delete(&self, guard: InFlightGuard, entity_id: &str, csrf_token: Option<&str>) -> Outcome {
        log::debug!("deleting employee {entity_id}");
        let body = RequestBody::UrlEncoded(delete_employee_body(entity_id, csrf_token));
        let result = self.post(body).await;
        drop(guard);
        self.report(result, &self.messages.delete_failed)
    }

    /// Confirm, then delete. Confirmation happens before this returns;
    /// declining sends nothing.
    pub fn delete_entity<'a>(
        &'a self,
        entity_id: &'a str,
        csrf_token: Option<&'a str>,
    ) -> impl Future<Output = Outcome> + 'a {
        let claimed = self.confirm_delete(entity_id);
        async move {
            match claimed {
                Ok(guard) => self.send_delete(guard, entity_id, csrf_token).await,
                Err(outcome) => outcome,
            }
        }
    }

    /// Reset `target` to its placeholder and start a new lookup generation
    /// for it. Any lookup still in flight for the target becomes stale.
    pub fn reset_dependent_dropdown(&self, target: &impl OptionList) -> u64 {
        let generation = self.generations.advance(&target.id());
        target.reset(&self.messages.employee_placeholder);
        generation
    }

    /// Fill `target` with the employees of `parent_id`, unless a newer
    /// generation has started for it meanwhile. A blank parent sends nothing.
    ///
    /// # Errors
    ///
    /// Returns the lookup's [`SubmitError`]; it is also logged. The user is
    /// not alerted.
    pub async fn fill_dependent_dropdown(
        &self,
        generation: u64,
        parent_id: &str,
        target: &impl OptionList,
    ) -> Result<usize, SubmitError> {
        let parent_id = parent_id.trim();
        if parent_id.is_empty() {
            return Ok(0);
        }
        let url = employees_lookup_url(&self.endpoints.employees_by_duty_station, parent_id);
        let lookup = match self.transport.get(&url).await {
            Ok(reply) => decode_reply::<EmployeesByDutyStation>(&reply),
            Err(err) => Err(err),
        };
        let employees = match lookup {
            Ok(body) => body.employees,
            Err(err) => {
                log::error!("Error fetching employees for duty station {parent_id}: {err}");
                return Err(err);
            }
        };

        let target_id = target.id();
        if !self.generations.is_current(&target_id, generation) {
            log::debug!("dropping stale employee list for `{target_id}`");
            return Ok(0);
        }
        for employee in &employees {
            target.append(&employee.id, &employee.name);
        }
        Ok(employees.len())
    }

    /// Replace `target`'s options with the employees of `parent_id`.
    ///
    /// The reset to the placeholder happens before this returns. An empty
    /// parent stops there without a request. Only the latest lookup per
    /// target fills it; an older reply arriving late is dropped.
    pub fn refresh_dependent_dropdown<'a, L: OptionList>(
        &'a self,
        parent_id: Option<&'a str>,
        target: &'a L,
    ) -> impl Future<Output = Result<usize, SubmitError>> + 'a {
        let generation = self.reset_dependent_dropdown(target);
        async move {
            match parent_id {
                Some(parent_id) => self.fill_dependent_dropdown(generation, parent_id, target).await,
                None => Ok(0),
            }
        }
    }

    async fn submit_form(
        &self,
        key: &str,
        encoding: Encoding,
        form: &impl FormSource<T::Multipart>,
        failure: &str,
    ) -> Outcome {
        let Some(_guard) = self.in_flight.try_begin(key) else {
            log::warn!("{key} is already submitting; ignoring resubmit");
            return Outcome::Busy;
        };
        let body = match encoding {
            Encoding::UrlEncoded => form.url_encoded().map(RequestBody::UrlEncoded),
            Encoding::Multipart => form.multipart().map(RequestBody::Multipart),
        };
        let result = match body {
            Ok(body) => {
                log::debug!("submitting {key} ({:?})", body.encoding());
                self.post(body).await
            }
            Err(err) => Err(err),
        };
        self.report(result, failure)
    }

    async fn post(&self, body: RequestBody<T::Multipart>) -> Result<SubmissionResult, SubmitError> {
        let reply = self.transport.post(&self.endpoints.submit, body).await?;
        decode_reply::<SubmissionResult>(&reply)?.into_result()
    }

    fn report(&self, result: Result<SubmissionResult, SubmitError>, failure: &str) -> Outcome {
        match result {
            Ok(reply) => {
                self.feedback.alert(&reply.message);
                self.feedback.refresh();
                Outcome::Succeeded
            }
            Err(SubmitError::Business { message, errors }) => {
                self.feedback.alert(&message);
                if let Some(detail) = &errors {
                    log::error!("Errors: {detail}");
                }
                Outcome::Failed(SubmitError::Business { message, errors })
            }
            Err(err) => {
                log::error!("{failure} ({err})");
                self.feedback.alert(failure);
                Outcome::Failed(err)
            }
        }
    }
}
