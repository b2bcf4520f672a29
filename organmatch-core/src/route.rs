use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Inbound flight lookup as sent by the agent or the HTTP layer.
///
/// The agent's tool call names the airports `airport1`/`airport2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteQuery {
    #[serde(alias = "airport1")]
    pub origin: String,
    #[serde(alias = "airport2")]
    pub dest: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// A validated origin/destination pair for a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub origin: String,
    pub dest: String,
    pub date: NaiveDate,
}

impl RouteQuery {
    pub fn new(origin: &str, dest: &str, date: &str) -> Self {
        Self {
            origin: origin.to_string(),
            dest: dest.to_string(),
            date: Some(date.to_string()),
        }
    }

    /// Validate airport codes and fold both accepted date spellings into one.
    pub fn normalize(&self) -> CoreResult<Route> {
        let origin = airport_code(&self.origin, "origin")?;
        let dest = airport_code(&self.dest, "dest")?;
        let raw_date = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| CoreError::ValidationError("date is required".to_string()))?;

        Ok(Route {
            origin,
            dest,
            date: parse_date(raw_date)?,
        })
    }
}

impl Route {
    pub fn cache_key(&self) -> String {
        format!("{}-{}", self.origin, self.dest)
    }

    /// `YYYYMMDD`, the form the route-tracking provider expects.
    pub fn compact_date(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

fn airport_code(raw: &str, field: &str) -> CoreResult<String> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::ValidationError(format!(
            "{} must be a 3-letter airport code, got '{}'",
            field, raw
        )));
    }
    Ok(code)
}

fn parse_date(raw: &str) -> CoreResult<NaiveDate> {
    let format = match raw.len() {
        8 if raw.chars().all(|c| c.is_ascii_digit()) => "%Y%m%d",
        10 => "%Y-%m-%d",
        _ => {
            return Err(CoreError::ValidationError(format!(
                "date must be YYYYMMDD or YYYY-MM-DD, got '{}'",
                raw
            )))
        }
    };

    NaiveDate::parse_from_str(raw, format)
        .map_err(|e| CoreError::ValidationError(format!("invalid date '{}': {}", raw, e)))
}
