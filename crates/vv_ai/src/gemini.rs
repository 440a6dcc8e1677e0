use std::time::Duration;

use url::Url;
use vv_core::error::AppError;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

// The API key must never reach logs.
impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client for the Gemini API.
    ///
    /// The base URL must be `https://<host>[:port]`, or `http://127.0.0.1[:port]` for a
    /// local stub. Paths, credentials and query strings are rejected.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let reject = |why: &str| {
            AppError::new("CONFIG_API_BASE_INVALID", "Gemini base URL is not allowed")
                .with_details(format!("{why}; base_url={base_url}"))
        };

        let parsed = Url::parse(&base_url).map_err(|e| reject(&e.to_string()))?;
        let host = parsed.host_str().unwrap_or_default();
        match parsed.scheme() {
            "https" if !host.is_empty() => {}
            "http" if host == "127.0.0.1" => {}
            _ => return Err(reject("scheme must be https (or http to 127.0.0.1)")),
        }
        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(reject("credentials are not allowed in the base URL"));
        }
        if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(reject("base URL must not carry a path or query"));
        }
        if parsed.port() == Some(0) {
            return Err(reject("port 0 is not allowed"));
        }

        if api_key.trim().is_empty() {
            return Err(AppError::new(
                "CONFIG_MISSING_API_KEY",
                "A Gemini API key is required",
            ));
        }

        Ok(Self {
            base_url,
            api_key: api_key.trim().to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn generate_content_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}
