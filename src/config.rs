//! Application-level configuration loading, including the language model connection settings.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "API_SCAFFOLD_CONFIG_PATH";

/// Chat-completion API used when nothing else is configured.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
/// Chat model used when nothing else is configured.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o";
/// Upper bound on a single completion round trip.
const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(120);

const API_KEY_ENV: &str = "OPENAI_API_KEY";
const BASE_URL_ENV: &str = "OPENAI_URL";
const MODEL_ENV: &str = "OPENAI_API_MODEL";
const TIMEOUT_ENV: &str = "OPENAI_TIMEOUT_SECS";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    pub llm: LlmSettings,
}

#[derive(Clone)]
/// Connection settings for the chat-completion API.
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    /// Secret key; AI features are disabled when absent.
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl LlmSettings {
    /// Whether a non-blank API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            request_timeout: DEFAULT_LLM_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Load the configuration file (if any), then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_file();
        config.apply_overrides(|key| env::var(key).ok());
        info!(
            base_url = %config.llm.base_url,
            model = %config.llm.model,
            api_key_configured = config.llm.has_api_key(),
            "language model settings resolved"
        );
        config
    }

    fn from_file() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration file");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Apply `OPENAI_*` overrides resolved through `lookup`.
    ///
    /// Blank values are ignored so an empty variable does not erase a file setting.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = get(API_KEY_ENV) {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = get(BASE_URL_ENV) {
            self.llm.base_url = url;
        }
        if let Some(model) = get(MODEL_ENV) {
            self.llm.model = model;
        }
        if let Some(raw) = get(TIMEOUT_ENV) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => self.llm.request_timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid {TIMEOUT_ENV}"),
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    llm: RawLlm,
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the `llm` section. The API key is only read from the environment.
struct RawLlm {
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = LlmSettings::default();
        let llm = LlmSettings {
            base_url: value.llm.base_url.unwrap_or(defaults.base_url),
            model: value.llm.model.unwrap_or(defaults.model),
            api_key: None,
            request_timeout: value
                .llm
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        };
        Self { llm }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_openai() {
        let config = AppConfig::default();
        assert_eq!(config.llm.base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(config.llm.model, DEFAULT_LLM_MODEL);
        assert!(!config.llm.has_api_key());
    }

    #[test]
    fn environment_overrides_file_values() {
        let raw: RawConfig = serde_json::from_str(
            r#"{"llm": {"base_url": "http://file", "model": "file-model", "timeout_secs": 5}}"#,
        )
        .unwrap();
        let mut config = AppConfig::from(raw);
        assert_eq!(config.llm.request_timeout, Duration::from_secs(5));

        config.apply_overrides(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_API_MODEL", "gpt-4o-mini"),
        ]));

        assert_eq!(config.llm.base_url, "http://file");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(config.llm.has_api_key());
    }

    #[test]
    fn blank_and_invalid_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup(&[
            ("OPENAI_API_KEY", "   "),
            ("OPENAI_URL", ""),
            ("OPENAI_TIMEOUT_SECS", "soon"),
        ]));

        assert!(!config.llm.has_api_key());
        assert_eq!(config.llm.base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(config.llm.request_timeout, DEFAULT_LLM_TIMEOUT);
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("sk-secret".into());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
