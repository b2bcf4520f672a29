use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use organmatch_core::weather::WeatherRequest;
use organmatch_core::WeatherResponse;

use crate::envelope;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/mcp/get_weather_forecast", post(get_weather_forecast))
}

/// POST /mcp/get_weather_forecast
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WeatherResponse>, AppError> {
    let request: WeatherRequest = envelope::decode(&body)?;
    Ok(Json(state.weather.resolve(&request).await))
}
