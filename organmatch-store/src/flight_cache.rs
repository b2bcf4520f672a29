use async_trait::async_trait;
use organmatch_core::{CacheError, FlightCache, FlightCandidate};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Route cache backed by a JSON document of `"{ORIGIN}-{DEST}" -> [flight, ...]`.
///
/// The file is re-read on every lookup and never written.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FlightCache for JsonFileCache {
    async fn lookup(&self, route_key: &str) -> Result<Vec<FlightCandidate>, CacheError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CacheError::Unavailable(format!("{}: {}", self.path.display(), e)))?;

        // Only the requested entry is typed; other routes may hold anything.
        let mut routes: HashMap<String, Value> =
            serde_json::from_str(&raw).map_err(|e| CacheError::Malformed(e.to_string()))?;

        let flights: Vec<FlightCandidate> = match routes.remove(route_key) {
            Some(entry) => serde_json::from_value(entry)
                .map_err(|e| CacheError::Malformed(format!("{}: {}", route_key, e)))?,
            None => Vec::new(),
        };
        debug!("Cache lookup {} -> {} flights", route_key, flights.len());
        Ok(flights)
    }
}
