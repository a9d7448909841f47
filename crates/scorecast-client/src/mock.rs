//! Mock client for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use scorecast_core::error::SubmissionFailure;
use scorecast_core::model::{FormState, PredictionResult};
use scorecast_core::traits::PredictionClient;

/// A prediction client that answers without touching the network.
///
/// Always returns the same outcome and remembers what it was sent.
pub struct MockPredictionClient {
    outcome: Result<PredictionResult, SubmissionFailure>,
    /// Optional delay before answering, to observe the pending state.
    delay: Option<Duration>,
    call_count: AtomicU32,
    last_payload: Mutex<Option<FormState>>,
}

impl MockPredictionClient {
    /// A mock that always succeeds with `result`.
    pub fn with_result(result: PredictionResult) -> Self {
        Self::with_outcome(Ok(result))
    }

    /// A mock that always fails with `failure`.
    pub fn failing(failure: SubmissionFailure) -> Self {
        Self::with_outcome(Err(failure))
    }

    fn with_outcome(outcome: Result<PredictionResult, SubmissionFailure>) -> Self {
        Self {
            outcome,
            delay: None,
            call_count: AtomicU32::new(0),
            last_payload: Mutex::new(None),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The form sent with the most recent call.
    pub fn last_payload(&self) -> Option<FormState> {
        self.last_payload
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PredictionClient for MockPredictionClient {
    fn endpoint(&self) -> &str {
        "mock://predict"
    }

    async fn predict(&self, form: &FormState) -> Result<PredictionResult, SubmissionFailure> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_payload
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(form.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}
