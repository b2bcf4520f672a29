pub mod app_config;
pub mod flight_cache;
pub mod flight_api;
pub mod weather_api;

pub use flight_api::FlightApiClient;
pub use flight_cache::JsonFileCache;
pub use weather_api::WeatherApiClient;
