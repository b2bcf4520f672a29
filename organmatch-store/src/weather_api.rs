use async_trait::async_trait;
use organmatch_core::weather::{WeatherProvider, WeatherSnapshot};
use organmatch_core::ProviderError;
use std::time::Duration;
use tracing::error;

const PROVIDER_NAME: &str = "WeatherAPI";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the current-conditions endpoint, `GET {base}/current.json`.
pub struct WeatherApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl WeatherApiClient {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn current_conditions(&self, api_key: &str, query: &str) -> Result<WeatherSnapshot, ProviderError> {
        let response = self
            .http_client
            .get(format!("{}/current.json", self.base_url))
            .query(&[("key", api_key), ("q", query), ("aqi", "no")])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} returned {} for '{}'", PROVIDER_NAME, status, query);
            return Err(ProviderError::Status {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<WeatherSnapshot>()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url().to_string()))
    }
}
