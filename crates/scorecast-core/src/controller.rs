//! Submission controller: owns the form, the in-flight request, and the result.
//!
//! Lifecycle:
//!
//! ```text
//! Idle --begin_submit--> Pending --complete(Ok)--> Idle (result shown)
//!                        Pending --complete(Err)-> Idle (notice shown, no result)
//! ```
//!
//! Submitting is split in two so an event loop can keep applying edits while
//! the request is outstanding. [`SubmissionController::submit`] runs both
//! halves back to back for callers that do not need that.

use std::fmt;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::SubmissionFailure;
use crate::model::{FieldName, FieldValue, FormState, PredictionResult};
use crate::stepper::{FieldControl, StepButton};
use crate::traits::PredictionClient;

/// Identifies one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(Uuid);

impl fmt::Display for SubmissionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A submission that has been started but not yet completed.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    /// Snapshot of the form at the moment of submit.
    pub payload: FormState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Pending,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    form: FormState,
    result: Option<PredictionResult>,
    notice: Option<String>,
    pending: Option<SubmissionTicket>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    /// The failure notice from the last submission, if it failed.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if self.pending.is_some() {
            Lifecycle::Pending
        } else {
            Lifecycle::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Text of the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self.lifecycle() {
            Lifecycle::Idle => "Predict Score",
            Lifecycle::Pending => "Predicting...",
        }
    }

    /// Merge one edit into the form. Other keys are kept as they are.
    pub fn update_value(&mut self, name: FieldName, value: FieldValue) {
        debug!(field = %name, %value, "field updated");
        self.form.set(name, value);
    }

    /// Return a field to its unedited state.
    pub fn clear_value(&mut self, name: FieldName) {
        if self.form.remove(name).is_some() {
            debug!(field = %name, "field cleared");
        }
    }

    /// Press a stepper button for `name`, starting from its effective value.
    ///
    /// Returns the new value, or `None` if the field is not numeric.
    pub fn step(&mut self, name: FieldName, button: StepButton) -> Option<i64> {
        let control = FieldControl::for_field(name)?;
        let current = self.form.effective_value(name)?.as_number()?;
        let mut stepped = None;
        control.press(button, current, |name, value| {
            stepped = value.as_number();
            self.update_value(name, value);
        });
        stepped
    }

    /// Start a submission.
    ///
    /// Returns `None` without touching any state if one is already in flight.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if let Some(ticket) = self.pending {
            debug!(%ticket, "submit ignored, request already in flight");
            return None;
        }
        let ticket = SubmissionTicket(Uuid::new_v4());
        self.pending = Some(ticket);
        self.result = None;
        self.notice = None;
        info!(%ticket, edits = self.form.len(), "submitting prediction request");
        Some(PendingSubmission {
            ticket,
            payload: self.form.clone(),
        })
    }

    /// Settle the in-flight submission.
    ///
    /// Returns `false` and changes nothing if `ticket` is not the one in flight.
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<PredictionResult, SubmissionFailure>,
    ) -> bool {
        if self.pending != Some(ticket) {
            debug!(%ticket, "discarding outcome of stale submission");
            return false;
        }
        self.pending = None;
        match outcome {
            Ok(result) => {
                info!(
                    %ticket,
                    score = %result.score_text(),
                    class = %result.performance_text(),
                    "prediction received"
                );
                self.result = Some(result);
                self.notice = None;
            }
            Err(failure) => {
                warn!(%ticket, error = %failure, "prediction failed");
                self.result = None;
                self.notice = Some(failure.notice().to_string());
            }
        }
        true
    }

    /// Submit the current form through `client` and wait for the outcome.
    ///
    /// A failure is recorded as the notice, never returned.
    pub async fn submit(&mut self, client: &dyn PredictionClient) {
        let Some(pending) = self.begin_submit() else {
            return;
        };
        let outcome = client.predict(&pending.payload).await;
        self.complete(pending.ticket, outcome);
    }
}
