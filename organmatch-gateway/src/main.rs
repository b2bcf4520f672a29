use anyhow::Context;
use organmatch_core::{FlightResolver, WeatherResolver};
use organmatch_gateway::{app, AppState};
use organmatch_store::{app_config::Config, FlightApiClient, JsonFileCache, WeatherApiClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "organmatch_gateway=debug,organmatch_core=debug,organmatch_store=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;

    let cache = Arc::new(JsonFileCache::new(&config.cache.path));
    let flight_api = Arc::new(
        FlightApiClient::new(&config.flight_api.base_url).context("Failed to build flight API client")?,
    );
    let weather_api = Arc::new(
        WeatherApiClient::new(&config.weather_api.base_url).context("Failed to build weather API client")?,
    );

    if config.flight_api.api_key.is_none() {
        tracing::warn!("No flight API key configured, serving from {} only", config.cache.path);
    }

    let app_state = AppState {
        flights: Arc::new(FlightResolver::new(cache, flight_api, config.resolver_config())),
        weather: Arc::new(WeatherResolver::new(weather_api, config.weather_api.api_key.clone())),
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Starting OrganMatch gateway on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(app_state)).await?;
    Ok(())
}
