use organmatch_core::ranking::MAX_RESULTS;
use organmatch_core::ResolverConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub flight_api: FlightApiConfig,
    pub weather_api: WeatherApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FlightApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default)]
    pub booking_links: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in; holds local API keys
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `ORGANMATCH__FLIGHT_API__API_KEY=...`
            .add_source(config::Environment::with_prefix("ORGANMATCH").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            api_key: self.flight_api.api_key.clone(),
            max_results: MAX_RESULTS,
            booking_links: self.flight_api.booking_links,
        }
    }
}
