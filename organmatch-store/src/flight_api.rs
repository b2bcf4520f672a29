use async_trait::async_trait;
use organmatch_core::{FlightCandidate, FlightProvider, ProviderError, Route};
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

const PROVIDER_NAME: &str = "FlightAPI";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct TrackByRouteResponse {
    #[serde(default)]
    flights: Vec<FlightCandidate>,
}

/// Client for the route-tracking endpoint, `GET {base}/trackbyroute/{key}`.
pub struct FlightApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl FlightApiClient {
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
impl FlightProvider for FlightApiClient {
    async fn fetch_flights(
        &self,
        api_key: &str,
        route: &Route,
    ) -> Result<Vec<FlightCandidate>, ProviderError> {
        let url = format!("{}/trackbyroute/{}", self.base_url, api_key);
        let date = route.compact_date();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("date", date.as_str()),
                ("airport1", route.origin.as_str()),
                ("airport2", route.dest.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} returned {} for {}", PROVIDER_NAME, status, route.cache_key());
            return Err(ProviderError::Status {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TrackByRouteResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url().to_string()))?;

        info!("{} returned {} flights for {}", PROVIDER_NAME, parsed.flights.len(), route.cache_key());
        Ok(parsed.flights)
    }
}
