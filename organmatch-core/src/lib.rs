pub mod route;
pub mod flight;
pub mod duration;
pub mod ranking;
pub mod links;
pub mod provider;
pub mod resolver;
pub mod weather;

pub use flight::{EnrichedFlight, FlightCandidate, ResultSet, Source};
pub use provider::{CacheError, FlightCache, FlightProvider, ProviderError};
pub use resolver::{FlightResolver, FlightResponse, ResolveError, ResolverConfig};
pub use route::{Route, RouteQuery};
pub use weather::{WeatherProvider, WeatherResolver, WeatherResponse};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
