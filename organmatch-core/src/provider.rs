use async_trait::async_trait;

use crate::flight::FlightCandidate;
use crate::route::Route;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache load failed: {0}")]
    Unavailable(String),
    #[error("Cache document is malformed: {0}")]
    Malformed(String),
}

/// Failure talking to an external data provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} error {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("Live API call failed: {0}")]
    Transport(String),
    #[error("Live API call failed: malformed response body: {0}")]
    Decode(String),
}

/// Read-only source of known flights keyed by `"{ORIGIN}-{DEST}"`.
#[async_trait]
pub trait FlightCache: Send + Sync {
    /// Flights stored for the key, or an empty list when the key is unknown.
    async fn lookup(&self, route_key: &str) -> Result<Vec<FlightCandidate>, CacheError>;
}

/// Live route-tracking provider.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    async fn fetch_flights(
        &self,
        api_key: &str,
        route: &Route,
    ) -> Result<Vec<FlightCandidate>, ProviderError>;
}
