//! Cache-first flight resolution.
//!
//! A route is answered from the local cache when it has anything for the key;
//! only a miss reaches the live provider, and only when an API key is
//! configured. Every failure is folded into [`FlightResponse::Failed`] so
//! callers never see a raised error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::flight::{FlightCandidate, ResultSet, Source};
use crate::links::BookingLinks;
use crate::provider::{FlightCache, FlightProvider, ProviderError};
use crate::ranking::{rank, MAX_RESULTS};
use crate::route::{Route, RouteQuery};
use crate::CoreError;

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub api_key: Option<String>,
    pub max_results: usize,
    pub booking_links: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            max_results: MAX_RESULTS,
            booking_links: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Validation(#[from] CoreError),
    #[error("No flight data found in cache and no API key set.")]
    MissingCredential,
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("No flight data found.")]
    NoData,
}

/// Result-shaped answer: `{"top_flights", "source"}` or `{"error"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlightResponse {
    Found(ResultSet),
    Failed { error: String },
}

impl FlightResponse {
    pub fn error(&self) -> Option<&str> {
        match self {
            FlightResponse::Failed { error } => Some(error),
            FlightResponse::Found(_) => None,
        }
    }
}

impl From<Result<ResultSet, ResolveError>> for FlightResponse {
    fn from(result: Result<ResultSet, ResolveError>) -> Self {
        match result {
            Ok(set) => FlightResponse::Found(set),
            Err(e) => FlightResponse::Failed { error: e.to_string() },
        }
    }
}

pub struct FlightResolver {
    cache: Arc<dyn FlightCache>,
    provider: Arc<dyn FlightProvider>,
    config: ResolverConfig,
}

impl FlightResolver {
    pub fn new(
        cache: Arc<dyn FlightCache>,
        provider: Arc<dyn FlightProvider>,
        config: ResolverConfig,
    ) -> Self {
        Self { cache, provider, config }
    }

    pub async fn resolve(&self, query: &RouteQuery) -> FlightResponse {
        let result = self.try_resolve(query).await;
        if let Err(ref e) = result {
            warn!("Flight resolution for {}-{} failed: {}", query.origin, query.dest, e);
        }
        result.into()
    }

    pub async fn try_resolve(&self, query: &RouteQuery) -> Result<ResultSet, ResolveError> {
        let route = query.normalize()?;
        let route_key = route.cache_key();

        let cached = match self.cache.lookup(&route_key).await {
            Ok(flights) => flights,
            Err(e) => {
                warn!("Treating cache failure for {} as a miss: {}", route_key, e);
                Vec::new()
            }
        };

        if !cached.is_empty() {
            info!("Cache hit for {} ({} flights)", route_key, cached.len());
            return self.finish(&route, cached, Source::Cache);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ResolveError::MissingCredential)?;

        info!("Cache miss for {}, querying live provider for {}", route_key, route.compact_date());
        let fetched = self.provider.fetch_flights(api_key, &route).await?;
        if fetched.is_empty() {
            return Err(ResolveError::NoData);
        }

        self.finish(&route, fetched, Source::Api)
    }

    fn finish(
        &self,
        route: &Route,
        candidates: Vec<FlightCandidate>,
        source: Source,
    ) -> Result<ResultSet, ResolveError> {
        let enriched = candidates.into_iter().map(FlightCandidate::enrich).collect();
        let mut top_flights = rank(enriched, self.config.max_results);
        if top_flights.is_empty() {
            return Err(ResolveError::NoData);
        }

        if self.config.booking_links {
            for flight in top_flights.iter_mut() {
                flight.booking_links = Some(BookingLinks::for_flight(
                    route,
                    &flight.airline,
                    &flight.flight_number,
                ));
            }
        }

        Ok(ResultSet { top_flights, source })
    }
}
