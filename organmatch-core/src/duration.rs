//! Transit time between two provider timestamps.
//!
//! Provider timestamps look like `"06:00, Oct 20"`: a 24-hour clock time and an
//! abbreviated month/day with no year and no zone. Both sides are assumed to be
//! in the same frame.

use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{Datelike, Duration, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%H:%M, %b %d";

/// Non-leap, so `Feb 29` never parses.
const REFERENCE_YEAR: i32 = 2001;

/// Minutes from departure to arrival, or `None` when either side does not parse.
///
/// An arrival earlier than the departure is read as landing the next day
/// (`Dec 31` rolls into `Jan 01` of the following year). Flights longer than
/// a day are not detected; an arrival still earlier after that is unknown.
pub fn transit_minutes(departure: &str, arrival: &str) -> Option<u32> {
    let departed = parse_timestamp(departure, REFERENCE_YEAR)?;
    let mut arrived = parse_timestamp(arrival, REFERENCE_YEAR)?;

    if arrived < departed {
        arrived = if is_new_years_eve(&departed) && is_new_years_day(&arrived) {
            parse_timestamp(arrival, REFERENCE_YEAR + 1)?
        } else {
            arrived + Duration::days(1)
        };
    }

    u32::try_from((arrived - departed).num_minutes()).ok()
}

fn is_new_years_eve(at: &NaiveDateTime) -> bool {
    at.month() == 12 && at.day() == 31
}

fn is_new_years_day(at: &NaiveDateTime) -> bool {
    at.month() == 1 && at.day() == 1
}

/// Strict `"HH:MM, Mon DD"`: the separators must be exactly `", "` and `" "`.
fn parse_timestamp(raw: &str, year: i32) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let (clock, calendar) = raw.split_once(", ")?;
    let (hour, minute) = clock.split_once(':')?;
    let (month, day) = calendar.split_once(' ')?;

    let well_formed = is_digits(hour, 1, 2)
        && is_digits(minute, 2, 2)
        && month.len() == 3
        && month.chars().all(|c| c.is_ascii_alphabetic())
        && is_digits(day, 1, 2);
    if !well_formed {
        return None;
    }

    let mut parsed = Parsed::new();
    parse(&mut parsed, raw, StrftimeItems::new(TIMESTAMP_FORMAT)).ok()?;
    parsed.set_year(i64::from(year)).ok()?;

    let date = parsed.to_naive_date().ok()?;
    let time = parsed.to_naive_time().ok()?;
    Some(date.and_time(time))
}

fn is_digits(part: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&part.len()) && part.chars().all(|c| c.is_ascii_digit())
}
