use organmatch_core::{FlightResolver, WeatherResolver};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<FlightResolver>,
    pub weather: Arc<WeatherResolver>,
}
