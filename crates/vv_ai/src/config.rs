use std::time::Duration;

use vv_core::error::AppError;

use crate::gemini::DEFAULT_API_BASE;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Process configuration for the production wiring.
///
/// `GEMINI_API_KEY` is required; its absence is a startup failure rather than a
/// per-request one.
#[derive(Clone, PartialEq, Eq)]
pub struct VeritasConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub http_timeout: Duration,
}

impl std::fmt::Debug for VeritasConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VeritasConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl VeritasConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("GEMINI_API_KEY").ok_or_else(|| {
            AppError::new(
                "CONFIG_MISSING_API_KEY",
                "Missing GEMINI_API_KEY environment variable",
            )
        })?;

        let http_timeout = match get("VERITAS_HTTP_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::new(
                        "CONFIG_TIMEOUT_INVALID",
                        "VERITAS_HTTP_TIMEOUT_SECS must be a positive integer",
                    )
                    .with_details(format!("value={raw}")))
                }
            },
        };

        Ok(Self {
            api_key,
            model: get("VERITAS_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: get("VERITAS_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            http_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = VeritasConfig::from_lookup(lookup(&[])).expect_err("must fail");
        assert_eq!(err.code, "CONFIG_MISSING_API_KEY");
        let err = VeritasConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")]))
            .expect_err("blank key must fail");
        assert_eq!(err.code, "CONFIG_MISSING_API_KEY");
    }

    #[test]
    fn defaults_apply() {
        let cfg = VeritasConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.http_timeout, Duration::from_secs(60));
        assert!(!format!("{cfg:?}").contains("\"k\""));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = VeritasConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("VERITAS_HTTP_TIMEOUT_SECS", "0"),
        ]))
        .expect_err("zero timeout");
        assert_eq!(err.code, "CONFIG_TIMEOUT_INVALID");
    }
}
