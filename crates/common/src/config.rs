use serde::Deserialize;

/// Global application configuration loaded from environment variables.
///
/// Loan policy (LTV ceiling, rates, risk bands) is not configurable here; see
/// [`crate::policy::LoanPolicy`].
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Interface the API server binds to
    pub api_host: String,

    /// Port the API server listens on (default: 3000)
    pub api_port: u16,

    /// Webhook receiving approved loans; delivery is disabled when unset
    pub loan_webhook_url: Option<String>,

    /// Retries after the first failed webhook attempt (default: 3)
    pub webhook_max_retries: u32,

    /// Per-request webhook timeout in milliseconds (default: 5000)
    pub webhook_timeout_ms: u64,

    /// Initial retry delay in milliseconds, doubled per attempt (default: 500)
    pub webhook_backoff_ms: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_port: lookup("API_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("API_PORT must be a valid u16"))?,
            loan_webhook_url: lookup("LOAN_WEBHOOK_URL").filter(|url| !url.trim().is_empty()),
            webhook_max_retries: lookup("WEBHOOK_MAX_RETRIES")
                .unwrap_or_else(|| "3".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("WEBHOOK_MAX_RETRIES must be a valid u32"))?,
            webhook_timeout_ms: lookup("WEBHOOK_TIMEOUT_MS")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("WEBHOOK_TIMEOUT_MS must be a valid u64"))?,
            webhook_backoff_ms: lookup("WEBHOOK_BACKOFF_MS")
                .unwrap_or_else(|| "500".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("WEBHOOK_BACKOFF_MS must be a valid u64"))?,
        })
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}
