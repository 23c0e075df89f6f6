//! Typed HTTP calls, one per backend endpoint.

use crate::config::ApiConfig;
use climate_core::endpoint::Endpoint;
use climate_core::error::ApiError;
use climate_core::filter::Query;
use climate_core::payload::{
    Correlations, DashboardData, DescriptiveTrend, DrilldownPayload, Histogram, KpiSnapshot,
    PlotlyFigure, Prescriptive,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Longest slice of a non-JSON error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// Cheaply cloneable handle to the backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let client = Client::builder()
            .timeout(crate::config::REQUEST_TIMEOUT)
            .build()?;
        #[cfg(target_arch = "wasm32")]
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` and decode the JSON body.
    ///
    /// Any non-2xx status is an error, carrying the backend's
    /// `{"error": "..."}` text when it sent one.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: &Query,
    ) -> Result<T, ApiError> {
        let url = endpoint.url(&self.base_url, query);
        let path = endpoint.path();
        log::debug!("GET {}", url);

        let transport = |e: reqwest::Error| ApiError::Transport {
            path: path.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            log::warn!("{} answered {}", path, status);
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        decode(path, &body)
    }

    pub async fn drilldown(&self, query: &Query) -> Result<DrilldownPayload, ApiError> {
        self.get_json(Endpoint::DashboardDrilldown, query).await
    }

    pub async fn dashboard_data(&self, query: &Query) -> Result<DashboardData, ApiError> {
        self.get_json(Endpoint::DashboardData, query).await
    }

    pub async fn kpi(&self) -> Result<KpiSnapshot, ApiError> {
        self.get_json(Endpoint::Kpi, &Query::new()).await
    }

    /// One of the server-built figures listed in [`Endpoint::FIGURES`].
    pub async fn figure(&self, endpoint: Endpoint) -> Result<PlotlyFigure, ApiError> {
        self.get_json(endpoint, &Query::new()).await
    }

    pub async fn descriptive_trend(&self) -> Result<DescriptiveTrend, ApiError> {
        self.get_json(Endpoint::DescriptiveTrend, &Query::new()).await
    }

    pub async fn histogram(&self) -> Result<Histogram, ApiError> {
        self.get_json(Endpoint::DescriptiveHistogram, &Query::new()).await
    }

    pub async fn correlations(&self) -> Result<Correlations, ApiError> {
        self.get_json(Endpoint::DiagnosticCorrelations, &Query::new()).await
    }

    pub async fn prescriptive(&self) -> Result<Prescriptive, ApiError> {
        self.get_json(Endpoint::Prescriptive, &Query::new()).await
    }
}

/// Decodes a response body, naming the endpoint on failure.
pub fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Pulls `error` out of a JSON error body, or keeps a short slice of the raw text.
pub fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(|e| e.as_str()) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_error_field() {
        assert_eq!(error_message(r#"{"error": "No data available"}"#), "No data available");
        assert_eq!(error_message("  "), "empty response");
        assert_eq!(error_message("<html>Bad Gateway</html>"), "<html>Bad Gateway</html>");
        assert_eq!(error_message(&"x".repeat(500)).len(), MAX_ERROR_BODY);
    }

    #[test]
    fn test_decode_names_the_endpoint() {
        let err = decode::<KpiSnapshot>("/api/kpi", "not json").unwrap_err();
        match err {
            ApiError::Decode { path, .. } => assert_eq!(path, "/api/kpi"),
            other => panic!("unexpected error: {other:?}"),
        }
        let kpi: KpiSnapshot = decode("/api/kpi", r#"{"avg_temp": 14.5}"#).unwrap();
        assert_eq!(kpi.avg_temp, Some(14.5));
    }

    #[test]
    fn test_client_keeps_base_url() {
        let client = ApiClient::new(&ApiConfig::new("http://127.0.0.1:9/")).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
    }
}
