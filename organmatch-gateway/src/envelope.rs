//! Request bodies arrive either bare or wrapped as `{"body": ...}`, where the
//! wrapped payload may itself be a JSON-encoded string.

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

pub fn decode<T: DeserializeOwned>(raw: &Bytes) -> Result<T, AppError> {
    let payload: Value = serde_json::from_slice(raw)
        .map_err(|e| AppError::ValidationError(format!("Request body is not JSON: {}", e)))?;

    serde_json::from_value(unwrap_body(payload)?)
        .map_err(|e| AppError::ValidationError(format!("Invalid request: {}", e)))
}

fn unwrap_body(payload: Value) -> Result<Value, AppError> {
    match payload {
        Value::Object(mut map) if map.contains_key("body") => match map.remove("body") {
            Some(Value::String(inner)) => serde_json::from_str(&inner).map_err(|e| {
                AppError::ValidationError(format!("Embedded body is not JSON: {}", e))
            }),
            Some(Value::Null) | None => Ok(Value::Object(map)),
            Some(inner) => Ok(inner),
        },
        other => Ok(other),
    }
}
