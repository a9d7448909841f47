//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://vishaka.onrender.com/predict";

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "SCORECAST_ENDPOINT";

/// Top-level scorecast configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecastConfig {
    /// URL the form is posted to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds. Unset means wait for the transport.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for ScorecastConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    resolve_vars_with(s, |name| std::env::var(name).ok())
}

/// Replace each `${NAME}` with `lookup(NAME)`, or nothing when it is unset.
fn resolve_vars_with(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let value = lookup(&result[start + 2..start + len]).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + len + 1..]);
        from = start + value.len();
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `scorecast.toml` in the current directory
/// 2. `~/.config/scorecast/config.toml`
///
/// `SCORECAST_ENDPOINT` overrides the endpoint from either file.
pub fn load_config_from(path: Option<&Path>) -> Result<ScorecastConfig> {
    let config = read_config_file(path)?;
    apply_overrides(config, std::env::var(ENDPOINT_ENV).ok())
}

fn read_config_file(path: Option<&Path>) -> Result<ScorecastConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("scorecast.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ScorecastConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(ScorecastConfig::default()),
    }
}

/// Apply the endpoint override and resolve `${VAR}` references.
fn apply_overrides(
    mut config: ScorecastConfig,
    env_endpoint: Option<String>,
) -> Result<ScorecastConfig> {
    if let Some(endpoint) = env_endpoint.filter(|e| !e.is_empty()) {
        config.endpoint = endpoint;
    }
    config.endpoint = resolve_env_vars(&config.endpoint);

    anyhow::ensure!(
        !config.endpoint.trim().is_empty(),
        "endpoint must not be empty"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("scorecast"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_vars_basic() {
        let lookup = |name: &str| (name == "HOST").then(|| "localhost:8000".to_string());
        assert_eq!(
            resolve_vars_with("http://${HOST}/predict", lookup),
            "http://localhost:8000/predict"
        );
        assert_eq!(resolve_vars_with("http://${MISSING}/p", lookup), "http:///p");
        assert_eq!(resolve_vars_with("no vars", lookup), "no vars");
        assert_eq!(resolve_vars_with("${unterminated", lookup), "${unterminated");
    }

    #[test]
    fn default_config() {
        let config = ScorecastConfig::default();
        assert_eq!(config.endpoint, "https://vishaka.onrender.com/predict");
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorecast.toml");
        std::fs::write(
            &path,
            "endpoint = \"http://127.0.0.1:9000/predict\"\ntimeout_secs = 15\n",
        )
        .unwrap();

        let config = read_config_file(Some(&path)).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/predict");
        assert_eq!(config.timeout_secs, Some(15));
    }

    #[test]
    fn env_endpoint_overrides_file() {
        let file = ScorecastConfig {
            endpoint: "http://127.0.0.1:9000/predict".into(),
            timeout_secs: Some(15),
        };

        let config =
            apply_overrides(file.clone(), Some("http://env.example/predict".into())).unwrap();
        assert_eq!(config.endpoint, "http://env.example/predict");
        assert_eq!(config.timeout_secs, Some(15));

        let config = apply_overrides(file.clone(), Some(String::new())).unwrap();
        assert_eq!(config.endpoint, file.endpoint);

        let config = apply_overrides(file.clone(), None).unwrap();
        assert_eq!(config.endpoint, file.endpoint);
    }

    #[test]
    fn blank_endpoint_is_rejected() {
        let config = ScorecastConfig {
            endpoint: "   ".into(),
            timeout_secs: None,
        };
        let err = apply_overrides(config, None).unwrap_err();
        assert!(err.to_string().contains("endpoint must not be empty"));
    }

    #[test]
    fn partial_file_uses_defaults() {
        let config: ScorecastConfig = toml::from_str("timeout_secs = 5").unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = read_config_file(Some(Path::new("/nonexistent/scorecast.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
