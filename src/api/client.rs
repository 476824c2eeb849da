//! Dashboard REST API Client
//!
//! HTTP client for the VA analytics dashboard endpoint.

use super::dto::DashboardPayload;
use super::error::{ClientError, ClientResult};
use super::DashboardSource;
use crate::filters::DashboardQuery;
use crate::geo::Boundaries;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};

/// Header the backend checks for cross-site request forgery
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Configuration for the dashboard client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the dashboard endpoint
    pub endpoint: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// CSRF token forwarded from the hosting page, if any
    pub csrf_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/va_analytics/api/dashboard".to_string(),
            request_timeout_ms: 30_000,
            csrf_token: None,
        }
    }
}

/// Dashboard API client
pub struct DashboardClient {
    client: Client,
    config: ClientConfig,
}

impl DashboardClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check that the endpoint answers
    pub async fn health_check(&self) -> ClientResult<()> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        ensure_success(response).await.map(|_| ())
    }

    /// Fetch dashboard statistics for the given filters.
    ///
    /// Relative date selections are resolved against `today`.
    pub async fn fetch(
        &self,
        query: &DashboardQuery,
        today: NaiveDate,
    ) -> ClientResult<DashboardPayload> {
        let params = query.to_params(today);
        tracing::debug!(endpoint = %self.config.endpoint, ?params, "Fetching dashboard data");

        let mut request = self
            .client
            .get(&self.config.endpoint)
            .query(&params)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = &self.config.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let response = request.send().await.map_err(ClientError::from_transport)?;
        let response = ensure_success(response).await?;

        let payload: DashboardPayload = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        tracing::info!(
            coded = payload.coded_vas(),
            uncoded = payload.uncoded_vas,
            causes = payload.cod_grouping.len(),
            "Dashboard data received"
        );

        Ok(payload)
    }

    /// Fetch the GeoJSON boundary file from a static URL
    pub async fn fetch_boundaries(&self, url: &str) -> ClientResult<Boundaries> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;
        let response = ensure_success(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Turn a non-2xx response into [`ClientError::ApiError`] carrying its body
async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %message, "Dashboard API returned an error");
    Err(ClientError::ApiError {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl DashboardSource for DashboardClient {
    async fn fetch(
        &self,
        query: &DashboardQuery,
        today: NaiveDate,
    ) -> ClientResult<DashboardPayload> {
        DashboardClient::fetch(self, query, today).await
    }
}
