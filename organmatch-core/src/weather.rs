//! Current-conditions check for both ends of a transport leg.
//!
//! Each side is queried once. High wind on either side turns the
//! recommendation into a delay, and the whole report goes stale after
//! [`REPORT_VALIDITY_MINUTES`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::provider::ProviderError;
use crate::{CoreError, CoreResult};

pub const HIGH_WIND_KPH: f64 = 40.0;
pub const REPORT_VALIDITY_MINUTES: i64 = 5;

/// Either a coordinate pair or a city with an optional state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationQuery {
    Coordinates {
        lat: f64,
        lon: f64,
    },
    City {
        city: String,
        #[serde(default)]
        state: Option<String>,
    },
}

impl LocationQuery {
    /// Provider query string: `"lat,lon"` or `"City,ST"`.
    pub fn to_query(&self) -> CoreResult<String> {
        match self {
            LocationQuery::Coordinates { lat, lon } => Ok(format!("{},{}", lat, lon)),
            LocationQuery::City { city, state } => {
                let city = city.trim();
                if city.is_empty() {
                    return Err(CoreError::ValidationError(
                        "Invalid location format. Must include 'lat/lon' or 'city/state'.".to_string(),
                    ));
                }
                let state = state.as_deref().unwrap_or("").trim();
                Ok(format!("{},{}", city, state).trim_matches(',').to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub origin: LocationQuery,
    pub dest: LocationQuery,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherLocation {
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub tz_id: Option<String>,
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub text: Option<String>,
    pub icon: Option<String>,
    pub code: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub last_updated: Option<String>,
    pub temp_c: Option<f64>,
    pub temp_f: Option<f64>,
    pub condition: Option<WeatherCondition>,
    pub wind_mph: Option<f64>,
    pub wind_kph: Option<f64>,
    pub wind_degree: Option<f64>,
    pub wind_dir: Option<String>,
    pub pressure_mb: Option<f64>,
    pub precip_mm: Option<f64>,
    pub humidity: Option<f64>,
    pub cloud: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub vis_km: Option<f64>,
    pub gust_kph: Option<f64>,
}

/// The subset of a current-conditions payload the gateway passes on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default)]
    pub location: WeatherLocation,
    #[serde(default)]
    pub current: CurrentConditions,
}

impl WeatherSnapshot {
    fn high_wind(&self) -> bool {
        self.current.wind_kph.is_some_and(|kph| kph > HIGH_WIND_KPH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFlag {
    HighWindOrigin,
    HighWindDest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Proceed,
    #[serde(rename = "Delay or reroute")]
    DelayOrReroute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub origin_weather: WeatherSnapshot,
    pub dest_weather: WeatherSnapshot,
    pub risk_flags: Vec<RiskFlag>,
    pub recommendation: Recommendation,
    pub expires_at: DateTime<Utc>,
}

pub fn assess(origin: WeatherSnapshot, dest: WeatherSnapshot, issued_at: DateTime<Utc>) -> WeatherReport {
    let mut risk_flags = Vec::new();
    if origin.high_wind() {
        risk_flags.push(RiskFlag::HighWindOrigin);
    }
    if dest.high_wind() {
        risk_flags.push(RiskFlag::HighWindDest);
    }

    let recommendation = if risk_flags.is_empty() {
        Recommendation::Proceed
    } else {
        Recommendation::DelayOrReroute
    };

    WeatherReport {
        origin_weather: origin,
        dest_weather: dest,
        risk_flags,
        recommendation,
        expires_at: issued_at + Duration::minutes(REPORT_VALIDITY_MINUTES),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error(transparent)]
    Validation(#[from] CoreError),
    #[error("No weather API key set.")]
    MissingCredential,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherResponse {
    Report(WeatherReport),
    Failed { error: String },
}

impl WeatherResponse {
    pub fn error(&self) -> Option<&str> {
        match self {
            WeatherResponse::Failed { error } => Some(error),
            WeatherResponse::Report(_) => None,
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_conditions(&self, api_key: &str, query: &str) -> Result<WeatherSnapshot, ProviderError>;
}

pub struct WeatherResolver {
    provider: Arc<dyn WeatherProvider>,
    api_key: Option<String>,
}

impl WeatherResolver {
    pub fn new(provider: Arc<dyn WeatherProvider>, api_key: Option<String>) -> Self {
        Self { provider, api_key }
    }

    pub async fn resolve(&self, request: &WeatherRequest) -> WeatherResponse {
        match self.try_resolve(request).await {
            Ok(report) => WeatherResponse::Report(report),
            Err(e) => {
                warn!("Weather check failed: {}", e);
                WeatherResponse::Failed { error: e.to_string() }
            }
        }
    }

    pub async fn try_resolve(&self, request: &WeatherRequest) -> Result<WeatherReport, WeatherError> {
        let origin_query = request.origin.to_query()?;
        let dest_query = request.dest.to_query()?;
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherError::MissingCredential)?;

        let origin = self.provider.current_conditions(api_key, &origin_query).await?;
        let dest = self.provider.current_conditions(api_key, &dest_query).await?;

        let report = assess(origin, dest, Utc::now());
        info!(
            "Weather {} -> {}: {:?} {:?}",
            origin_query, dest_query, report.recommendation, report.risk_flags
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn windy(kph: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                wind_kph: Some(kph),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_location_queries() {
        let coords: LocationQuery = serde_json::from_value(json!({ "lat": 34.05, "lon": -118.25 })).unwrap();
        assert_eq!(coords.to_query().unwrap(), "34.05,-118.25");

        let city: LocationQuery = serde_json::from_value(json!({ "city": "Boston", "state": "MA" })).unwrap();
        assert_eq!(city.to_query().unwrap(), "Boston,MA");

        let bare: LocationQuery = serde_json::from_value(json!({ "city": "Chicago" })).unwrap();
        assert_eq!(bare.to_query().unwrap(), "Chicago");

        let blank = LocationQuery::City { city: " ".to_string(), state: None };
        assert!(blank.to_query().is_err());
    }

    #[test]
    fn test_unknown_location_shape_is_rejected() {
        let parsed = serde_json::from_value::<LocationQuery>(json!({ "zip": "02115" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_calm_weather_proceeds() {
        let issued = Utc::now();
        let report = assess(windy(12.0), windy(40.0), issued);

        assert!(report.risk_flags.is_empty());
        assert_eq!(report.recommendation, Recommendation::Proceed);
        assert_eq!(report.expires_at - issued, Duration::minutes(5));
    }

    #[test]
    fn test_high_wind_flags_each_side() {
        let report = assess(windy(55.0), windy(41.5), Utc::now());

        assert_eq!(report.risk_flags, vec![RiskFlag::HighWindOrigin, RiskFlag::HighWindDest]);
        assert_eq!(report.recommendation, Recommendation::DelayOrReroute);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["recommendation"], "Delay or reroute");
        assert_eq!(value["risk_flags"][0], "HighWindOrigin");
    }

    #[test]
    fn test_missing_wind_reading_is_not_a_risk() {
        let report = assess(WeatherSnapshot::default(), windy(60.0), Utc::now());
        assert_eq!(report.risk_flags, vec![RiskFlag::HighWindDest]);
    }

    struct StubWeather {
        by_query: HashMap<String, f64>,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherProvider for StubWeather {
        async fn current_conditions(&self, _api_key: &str, query: &str) -> Result<WeatherSnapshot, ProviderError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.by_query
                .get(query)
                .map(|kph| windy(*kph))
                .ok_or_else(|| ProviderError::Status {
                    provider: "WeatherAPI",
                    status: 400,
                    body: "No matching location found.".to_string(),
                })
        }
    }

    fn stub() -> Arc<StubWeather> {
        let mut by_query = HashMap::new();
        by_query.insert("Los Angeles,CA".to_string(), 10.0);
        by_query.insert("42.36,-71.06".to_string(), 48.0);
        Arc::new(StubWeather { by_query, queries: Mutex::new(Vec::new()) })
    }

    fn request() -> WeatherRequest {
        serde_json::from_value(json!({
            "origin": { "city": "Los Angeles", "state": "CA" },
            "dest": { "lat": 42.36, "lon": -71.06 }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolver_queries_both_sides() {
        let provider = stub();
        let resolver = WeatherResolver::new(provider.clone(), Some("wx-key".to_string()));

        let report = resolver.try_resolve(&request()).await.unwrap();

        assert_eq!(report.risk_flags, vec![RiskFlag::HighWindDest]);
        assert_eq!(
            *provider.queries.lock().unwrap(),
            vec!["Los Angeles,CA".to_string(), "42.36,-71.06".to_string()]
        );
    }

    #[tokio::test]
    async fn test_resolver_without_key() {
        let provider = stub();
        let resolver = WeatherResolver::new(provider.clone(), None);

        let response = resolver.resolve(&request()).await;

        assert_eq!(response.error(), Some("No weather API key set."));
        assert!(provider.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_is_reported() {
        let resolver = WeatherResolver::new(stub(), Some("wx-key".to_string()));
        let request = WeatherRequest {
            origin: LocationQuery::City { city: "Atlantis".to_string(), state: None },
            dest: LocationQuery::Coordinates { lat: 42.36, lon: -71.06 },
        };

        let response = resolver.resolve(&request).await;

        assert_eq!(response.error(), Some("WeatherAPI error 400: No matching location found."));
    }
}
