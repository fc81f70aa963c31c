use std::time::Duration;
use crate::error::SystemError;
use crate::view_model::FailurePolicy;

/// Profile served when no fixture file is configured.
pub const DEFAULT_PROFILE_JSON: &str = r#"{"id":"1","name":"Ana","avatarURL":"http://x/a.png"}"#;

/// Application settings. Every field has a default; `from_env` overrides
/// them from `PROFILE_*` variables.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    pub buffer_size: usize,
    pub latency: Duration,
    pub failure_policy: FailurePolicy,
    pub payload: Option<String>,
    pub simulate_failure: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            latency: Duration::ZERO,
            failure_policy: FailurePolicy::Reset,
            payload: Some(DEFAULT_PROFILE_JSON.to_string()),
            simulate_failure: false,
        }
    }
}

impl ProfileConfig {
    pub fn from_env() -> Result<Self, SystemError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SystemError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("PROFILE_BUFFER_SIZE") {
            config.buffer_size = match raw.parse() {
                Ok(0) | Err(_) => {
                    return Err(SystemError::Config(format!("PROFILE_BUFFER_SIZE must be a positive integer, got {raw:?}")))
                }
                Ok(size) => size,
            };
        }

        if let Some(raw) = lookup("PROFILE_LATENCY_MS") {
            let millis: u64 = raw
                .parse()
                .map_err(|_| SystemError::Config(format!("PROFILE_LATENCY_MS must be milliseconds, got {raw:?}")))?;
            config.latency = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup("PROFILE_FAILURE_POLICY") {
            config.failure_policy = match raw.to_ascii_lowercase().as_str() {
                "reset" => FailurePolicy::Reset,
                "keep" => FailurePolicy::KeepPrevious,
                _ => {
                    return Err(SystemError::Config(format!(
                        "PROFILE_FAILURE_POLICY must be \"reset\" or \"keep\", got {raw:?}"
                    )))
                }
            };
        }

        if let Some(path) = lookup("PROFILE_JSON_PATH") {
            let payload = std::fs::read_to_string(&path).map_err(|source| SystemError::Fixture { path, source })?;
            config.payload = Some(payload);
        }

        if let Some(raw) = lookup("PROFILE_SIMULATE_FAILURE") {
            config.simulate_failure = matches!(raw.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}
