use crate::flight::EnrichedFlight;

/// Upper bound on flights returned for a route, whichever path produced them.
pub const MAX_RESULTS: usize = 5;

/// Drop flights with an unknown duration, order the rest shortest first and
/// keep at most `limit`. Equal durations keep their incoming order.
pub fn rank(flights: Vec<EnrichedFlight>, limit: usize) -> Vec<EnrichedFlight> {
    let mut ranked: Vec<EnrichedFlight> = flights
        .into_iter()
        .filter(|f| f.duration_minutes.is_some())
        .collect();

    ranked.sort_by_key(|f| f.duration_minutes);
    ranked.truncate(limit);
    ranked
}
