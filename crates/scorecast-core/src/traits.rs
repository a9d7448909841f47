//! Core trait definition for prediction backends.
//!
//! Implemented by the `scorecast-client` crate (HTTP and mock clients).

use async_trait::async_trait;

use crate::error::SubmissionFailure;
use crate::model::{FormState, PredictionResult};

/// Something that turns a filled-in form into a prediction.
#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Where requests go, for logs and messages.
    fn endpoint(&self) -> &str;

    /// Send `form` as the JSON request body and parse the answer.
    async fn predict(&self, form: &FormState) -> Result<PredictionResult, SubmissionFailure>;
}
