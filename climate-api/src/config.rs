//! API client configuration.

use std::time::Duration;

/// Flask's default development address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// How often KPI tiles refresh on their own.
pub const DEFAULT_KPI_REFRESH: Duration = Duration::from_secs(300);

/// Per-request timeout for native builds; the browser applies its own.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme, host and port, without a trailing path.
    pub base_url: String,
    pub kpi_refresh: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            kpi_refresh: DEFAULT_KPI_REFRESH,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_kpi_refresh(mut self, every: Duration) -> Self {
        self.kpi_refresh = every;
        self
    }
}
