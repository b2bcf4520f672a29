//! Search deep links for booking sites.
//!
//! These are string templates over third-party URL schemes and are not
//! validated against them.

use serde::{Deserialize, Serialize};

use crate::route::Route;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingLinks {
    pub google_flights: String,
    pub kayak: String,
    pub skyscanner: String,
    pub expedia: String,
}

impl BookingLinks {
    pub fn for_flight(route: &Route, airline: &str, flight_number: &str) -> Self {
        let date = route.date;
        Self {
            google_flights: google_flights(route, airline, flight_number),
            kayak: format!(
                "https://www.kayak.com/flights/{}-{}/{}?sort=duration_a",
                route.origin,
                route.dest,
                route.iso_date()
            ),
            skyscanner: format!(
                "https://www.skyscanner.com/transport/flights/{}/{}/{}/?adults=1&trip=oneway",
                route.origin.to_lowercase(),
                route.dest.to_lowercase(),
                date.format("%y%m%d")
            ),
            expedia: format!(
                "https://www.expedia.com/Flights-Search?trip=oneway&leg1=from:{},to:{},departure:{}TANYT&passengers=adults:1&options=cabinclass:economy&mode=search",
                route.origin,
                route.dest,
                date.format("%m/%d/%Y")
            ),
        }
    }
}

fn google_flights(route: &Route, airline: &str, flight_number: &str) -> String {
    let day = route.iso_date();
    let query = match (airline.trim(), flight_number.trim()) {
        ("", _) => format!("Flights from {} to {} on {}", route.origin, route.dest, day),
        (airline, "") => format!("{} flights from {} to {} on {}", airline, route.origin, route.dest, day),
        (airline, number) => format!(
            "{} flight {} from {} to {} on {}",
            airline, number, route.origin, route.dest, day
        ),
    };
    format!("https://www.google.com/travel/flights?q={}", urlencoding::encode(&query))
}
