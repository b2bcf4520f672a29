use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use organmatch_core::weather::{CurrentConditions, WeatherProvider, WeatherSnapshot};
use organmatch_core::{
    CacheError, FlightCache, FlightCandidate, FlightProvider, FlightResolver, ProviderError,
    ResolverConfig, Route, WeatherResolver,
};
use organmatch_gateway::{app, AppState};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

struct FixedCache;

#[async_trait]
impl FlightCache for FixedCache {
    async fn lookup(&self, route_key: &str) -> Result<Vec<FlightCandidate>, CacheError> {
        if route_key != "LAX-JFK" {
            return Ok(Vec::new());
        }
        Ok(vec![
            FlightCandidate::new("JetBlue", "B6408", "16:10, Oct 20", "22:30, Oct 20"),
            FlightCandidate::new("Delta", "DL290", "15:00, Oct 20", "21:05, Oct 20"),
        ])
    }
}

#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl FlightProvider for CountingProvider {
    async fn fetch_flights(&self, _api_key: &str, _route: &Route) -> Result<Vec<FlightCandidate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![FlightCandidate::new("United", "UA12", "23:10, Oct 20", "07:25, Oct 20")])
    }
}

struct CalmWeather;

#[async_trait]
impl WeatherProvider for CalmWeather {
    async fn current_conditions(&self, _api_key: &str, _query: &str) -> Result<WeatherSnapshot, ProviderError> {
        Ok(WeatherSnapshot {
            current: CurrentConditions {
                wind_kph: Some(9.0),
                ..Default::default()
            },
            ..Default::default()
        })
    }
}

fn test_app(api_key: Option<&str>, provider: Arc<CountingProvider>) -> Router {
    let config = ResolverConfig {
        api_key: api_key.map(str::to_string),
        ..Default::default()
    };
    app(AppState {
        flights: Arc::new(FlightResolver::new(Arc::new(FixedCache), provider, config)),
        weather: Arc::new(WeatherResolver::new(Arc::new(CalmWeather), Some("wx-key".to_string()))),
    })
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_flight_info_served_from_cache() {
    let provider = Arc::new(CountingProvider::default());
    let (status, body) = post_json(
        test_app(Some("key"), provider.clone()),
        "/mcp/get_flight_info",
        json!({ "origin": "lax", "dest": "jfk", "date": "2025-10-20" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "cache");
    assert_eq!(body["top_flights"][0]["FlightNumber"], "DL290");
    assert_eq!(body["top_flights"][0]["DurationMinutes"], 365);
    assert_eq!(body["top_flights"][1]["FlightNumber"], "B6408");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_wrapped_body_falls_back_to_live_provider() {
    let provider = Arc::new(CountingProvider::default());
    let (status, body) = post_json(
        test_app(Some("key"), provider.clone()),
        "/mcp/track_flights",
        json!({ "body": { "airport1": "SFO", "airport2": "BOS", "date": "20251020" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "api");
    assert_eq!(body["top_flights"][0]["DurationMinutes"], 495);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_key_is_an_error_body() {
    let provider = Arc::new(CountingProvider::default());
    let (status, body) = post_json(
        test_app(None, provider.clone()),
        "/mcp/get_flight_info",
        json!({ "origin": "SFO", "dest": "BOS", "date": "2025-10-20" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "No flight data found in cache and no API key set." }));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bad_date_is_reported_in_body() {
    let (status, body) = post_json(
        test_app(Some("key"), Arc::new(CountingProvider::default())),
        "/mcp/get_flight_info",
        json!({ "origin": "LAX", "dest": "JFK", "date": "10/20/2025" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].as_str().unwrap().starts_with("Validation failed"));
}

#[tokio::test]
async fn test_undecodable_body_is_bad_request() {
    let (status, body) = post_json(
        test_app(Some("key"), Arc::new(CountingProvider::default())),
        "/mcp/get_flight_info",
        json!({ "dest": "JFK" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_weather_forecast() {
    let (status, body) = post_json(
        test_app(None, Arc::new(CountingProvider::default())),
        "/mcp/get_weather_forecast",
        json!({
            "origin": { "city": "Los Angeles", "state": "CA" },
            "dest": { "lat": 42.36, "lon": -71.06 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"], "Proceed");
    assert_eq!(body["risk_flags"], json!([]));
    assert!(body["expires_at"].is_string());
}

#[tokio::test]
async fn test_home_and_unknown_routes() {
    let app = test_app(None, Arc::new(CountingProvider::default()));

    let home = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(home.status(), StatusCode::OK);

    let (status, body) = post_json(app, "/mcp/unknown", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No route for /mcp/unknown");
}
