//! HTTP client for the prediction endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

use scorecast_core::error::SubmissionFailure;
use scorecast_core::model::{FormState, PredictionResult};
use scorecast_core::traits::PredictionClient;

use crate::config::ScorecastConfig;

/// Longest slice of an error body kept in a `SubmissionFailure::Status`.
const MAX_ERROR_BODY: usize = 512;

/// Posts the form as JSON to a fixed URL.
///
/// Any response whose body is JSON is a success, whatever the status code.
/// No retries are attempted.
pub struct HttpPredictionClient {
    endpoint: String,
    timeout_secs: Option<u64>,
    client: reqwest::Client,
}

impl HttpPredictionClient {
    /// Client with no request timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, None)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout_secs: Option<u64>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            endpoint: endpoint.into(),
            timeout_secs,
            client,
        })
    }

    pub fn from_config(config: &ScorecastConfig) -> Result<Self> {
        Self::with_timeout(config.endpoint.clone(), config.timeout_secs)
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, form), fields(endpoint = %self.endpoint, edits = form.len()))]
    async fn predict(&self, form: &FormState) -> Result<PredictionResult, SubmissionFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(form)
            .send()
            .await
            .map_err(|e| match self.timeout_secs {
                Some(secs) if e.is_timeout() => SubmissionFailure::Timeout(secs),
                _ => SubmissionFailure::Transport(e.to_string()),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmissionFailure::Transport(e.to_string()))?;

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => {
                if !status.is_success() {
                    debug!(status = status.as_u16(), "non-2xx response carried a JSON body");
                }
                if !value.is_object() {
                    debug!("JSON body is not an object, result left empty");
                }
                Ok(PredictionResult::from_json(value))
            }
            Err(_) if !status.is_success() => Err(SubmissionFailure::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            }),
            Err(e) => Err(SubmissionFailure::MalformedBody(e.to_string())),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecast_core::model::{FieldName, FieldValue};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpPredictionClient {
        HttpPredictionClient::new(format!("{}/predict", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn successful_prediction() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"sleep_hours": 8})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predicted_exam_score": 81.2,
                "predicted_performance_class": "Excellent"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut form = FormState::new();
        form.set(FieldName::SleepHours, FieldValue::Number(8));

        let result = client_for(&server).predict(&form).await.unwrap();
        assert_eq!(result.score(), Some(81.2));
        assert_eq!(result.performance_class(), Some("Excellent"));
    }

    #[tokio::test]
    async fn json_error_status_is_still_a_result() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(serde_json::json!({"detail": "bad"})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).predict(&FormState::new()).await.unwrap();
        assert_eq!(result.score_text(), "");
        assert_eq!(result.performance_text(), "");
    }

    #[tokio::test]
    async fn non_object_json_is_an_empty_result() {
        for body in [
            serde_json::json!(null),
            serde_json::json!(78),
            serde_json::json!([1, "Good"]),
        ] {
            let server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/predict"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
                .mount(&server)
                .await;

            let result = client_for(&server)
                .predict(&FormState::new())
                .await
                .unwrap_or_else(|e| panic!("body {body} should not fail: {e}"));
            assert_eq!(result.score(), None, "body {body}");
            assert_eq!(result.score_text(), "", "body {body}");
            assert_eq!(result.performance_text(), "", "body {body}");
        }
    }

    #[tokio::test]
    async fn non_json_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .predict(&FormState::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SubmissionFailure::Status {
                status: 503,
                body: "service unavailable".into()
            }
        );
    }

    #[tokio::test]
    async fn non_json_success_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .predict(&FormState::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionFailure::MalformedBody(_)));
    }

    #[tokio::test]
    async fn configured_timeout_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client =
            HttpPredictionClient::with_timeout(format!("{}/predict", server.uri()), Some(1))
                .unwrap();
        let err = client.predict(&FormState::new()).await.unwrap_err();
        assert_eq!(err, SubmissionFailure::Timeout(1));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééé", 3), "é...");
    }
}
