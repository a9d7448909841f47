pub mod fields;
pub mod init;
pub mod interactive;
pub mod predict;

use std::path::PathBuf;

use anyhow::Result;

use scorecast_client::config::load_config_from;
use scorecast_client::HttpPredictionClient;

/// Build the HTTP client from config, with `--endpoint` taking precedence.
fn build_client(
    endpoint: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<HttpPredictionClient> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    tracing::debug!(endpoint = %config.endpoint, timeout_secs = ?config.timeout_secs, "using endpoint");
    HttpPredictionClient::from_config(&config)
}
