use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use organmatch_core::{FlightResponse, RouteQuery};

use crate::envelope;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/mcp/get_flight_info", post(get_flight_info))
        .route("/mcp/track_flights", post(get_flight_info))
}

/// POST /mcp/get_flight_info
/// Ranked flights for a route, cache first. Resolution failures come back as
/// `{"error": ...}` with a 200.
pub async fn get_flight_info(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FlightResponse>, AppError> {
    let query: RouteQuery = envelope::decode(&body)?;
    tracing::info!("Flight lookup {} -> {} on {:?}", query.origin, query.dest, query.date);

    Ok(Json(state.flights.resolve(&query).await))
}
