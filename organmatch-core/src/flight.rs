use serde::{Deserialize, Deserializer, Serialize};

use crate::duration::transit_minutes;
use crate::links::BookingLinks;

/// Raw flight record as returned by the live provider or stored in the cache.
///
/// Cache documents written by older tooling use PascalCase keys, the provider
/// uses camelCase; both are accepted. A stored `DurationMinutes` is ignored and
/// recomputed on enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightCandidate {
    #[serde(default, alias = "Airline", deserialize_with = "null_as_empty")]
    pub airline: String,
    #[serde(default, alias = "FlightNumber", deserialize_with = "null_as_empty")]
    pub flight_number: String,
    #[serde(default, alias = "DepartureTime", deserialize_with = "null_as_empty")]
    pub departure_time: String,
    #[serde(default, alias = "ArrivalTime", deserialize_with = "null_as_empty")]
    pub arrival_time: String,
}

/// A candidate annotated with its computed transit duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnrichedFlight {
    pub airline: String,
    pub flight_number: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_links: Option<BookingLinks>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Api,
}

/// Ranked, bounded answer for one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub top_flights: Vec<EnrichedFlight>,
    pub source: Source,
}

impl FlightCandidate {
    pub fn new(airline: &str, flight_number: &str, departure_time: &str, arrival_time: &str) -> Self {
        Self {
            airline: airline.to_string(),
            flight_number: flight_number.to_string(),
            departure_time: departure_time.to_string(),
            arrival_time: arrival_time.to_string(),
        }
    }

    pub fn enrich(self) -> EnrichedFlight {
        let duration_minutes = transit_minutes(&self.departure_time, &self.arrival_time);
        EnrichedFlight {
            airline: self.airline,
            flight_number: self.flight_number,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            duration_minutes,
            booking_links: None,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
