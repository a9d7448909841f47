//! scorecast-client — Prediction endpoint clients.
//!
//! Implements the `PredictionClient` trait over HTTP, plus a mock for tests,
//! and loads the client configuration.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{load_config_from, ScorecastConfig, DEFAULT_ENDPOINT};
pub use http::HttpPredictionClient;
pub use mock::MockPredictionClient;
