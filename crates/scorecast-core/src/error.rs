//! Submission error types.
//!
//! Every way a prediction request can fail is a `SubmissionFailure`. The
//! variants keep the cause for logging, but the user only ever sees
//! [`SubmissionFailure::NOTICE`].

use thiserror::Error;

/// Errors that can occur while submitting the form to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionFailure {
    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// A configured request timeout elapsed.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The endpoint answered with a non-2xx status and a body that is not JSON.
    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be parsed as a JSON prediction.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

impl SubmissionFailure {
    /// The fixed message shown to the user for any failure.
    pub const NOTICE: &'static str = "Prediction failed";

    /// User-facing text. Identical for every cause.
    pub fn notice(&self) -> &'static str {
        Self::NOTICE
    }
}

/// Errors from turning user-typed text into a field or field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldInputError {
    /// No field has this key.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The text is not a valid value for the field.
    #[error("invalid value for {field}: '{value}' (expected {expected})")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cause_shares_one_notice() {
        let failures = [
            SubmissionFailure::Transport("connection refused".into()),
            SubmissionFailure::Timeout(30),
            SubmissionFailure::Status {
                status: 502,
                body: "bad gateway".into(),
            },
            SubmissionFailure::MalformedBody("expected value".into()),
        ];
        for failure in &failures {
            assert_eq!(failure.notice(), "Prediction failed");
        }
    }

    #[test]
    fn display_keeps_the_cause() {
        let err = SubmissionFailure::Status {
            status: 500,
            body: "oops".into(),
        };
        assert_eq!(err.to_string(), "endpoint returned HTTP 500: oops");
    }
}
