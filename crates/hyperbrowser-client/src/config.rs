use std::time::Duration;

use hyperbrowser_core::{HyperbrowserError, PollConfig};

pub const DEFAULT_BASE_URL: &str = "https://app.hyperbrowser.ai";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`Hyperbrowser`](crate::Hyperbrowser) client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Polling policy used by every start-and-wait operation.
    pub poll: PollConfig,
    /// Log a one-time warning when a legacy call shape is used.
    pub legacy_call_warnings: bool,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, HyperbrowserError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(HyperbrowserError::ConfigError(
                "API key is required - either pass it in config or set HYPERBROWSER_API_KEY"
                    .into(),
            ));
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            poll: PollConfig::default(),
            legacy_call_warnings: true,
        })
    }

    /// Read configuration from environment variables.
    ///
    /// - `HYPERBROWSER_API_KEY` (required)
    /// - `HYPERBROWSER_BASE_URL` (optional, defaults to `https://app.hyperbrowser.ai`)
    /// - `HYPERBROWSER_TIMEOUT_MS` (optional, defaults to 30000)
    pub fn from_env() -> Result<Self, HyperbrowserError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, HyperbrowserError> {
        let api_key = var("HYPERBROWSER_API_KEY").ok_or_else(|| {
            HyperbrowserError::ConfigError(
                "HYPERBROWSER_API_KEY not set. Required to authenticate API calls.".into(),
            )
        })?;
        let mut config = Self::new(api_key)?;

        if let Some(base_url) = var("HYPERBROWSER_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = var("HYPERBROWSER_TIMEOUT_MS") {
            let parsed: u64 = raw.parse().map_err(|_| {
                HyperbrowserError::ConfigError(format!(
                    "Invalid HYPERBROWSER_TIMEOUT_MS '{raw}': must be a positive integer"
                ))
            })?;
            if parsed == 0 {
                return Err(HyperbrowserError::ConfigError(
                    "HYPERBROWSER_TIMEOUT_MS must be at least 1".into(),
                ));
            }
            config = config.with_timeout(Duration::from_millis(parsed));
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_legacy_call_warnings(mut self, enabled: bool) -> Self {
        self.legacy_call_warnings = enabled;
        self
    }
}
