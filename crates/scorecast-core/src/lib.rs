//! scorecast-core — Form state, field controls, and the submission lifecycle.
//!
//! This crate defines the data model, the prediction client trait, and the
//! controller that the client and CLI crates build on.

pub mod controller;
pub mod error;
pub mod model;
pub mod render;
pub mod stepper;
pub mod traits;

pub use controller::{Lifecycle, PendingSubmission, SubmissionController, SubmissionTicket};
pub use error::{FieldInputError, SubmissionFailure};
pub use model::{
    resolve_effective_value, FieldKind, FieldName, FieldSpec, FieldValue, FormState,
    LearningStyle, PredictionResult, StudyEnvironment,
};
pub use stepper::{FieldControl, StepButton};
pub use traits::PredictionClient;
