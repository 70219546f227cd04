//! Event types consumed by the classifier and arrangement builder.
//!
//! Events arrive here already normalized (see `feed`): every event has a
//! parseable date. Title, location, description and media are opaque
//! display data and are never interpreted.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EventboardError, EventboardResult};

/// Date-time formats accepted for values without an offset.
const FLOATING_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// An event as seen by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: EventDate,
    pub location: Option<String>,
    pub description: Option<String>,
    pub media: Option<Media>,
}

/// Opaque attachment reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: Option<String>,
    pub created_at: Option<String>,
}

/// When an event happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDate {
    /// An absolute point in time (RFC 3339, carries its own offset)
    Instant(DateTime<FixedOffset>),
    /// Wall-clock time in whatever timezone the board is viewed in
    Floating(NaiveDateTime),
    /// All-day
    Date(NaiveDate),
}

impl Event {
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: EventDate) -> Self {
        Event {
            id: id.into(),
            title: title.into(),
            date,
            location: None,
            description: None,
            media: None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl EventDate {
    /// Parse an ISO 8601 date or date-time string.
    pub fn parse(input: &str) -> EventboardResult<Self> {
        let trimmed = input.trim();

        // Accept "YYYY-MM-DD HH:MM..." as well as the T separator
        let normalized = match trimmed.get(10..11) {
            Some(" ") => format!("{}T{}", &trimmed[..10], &trimmed[11..]),
            _ => trimmed.to_string(),
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
            return Ok(EventDate::Instant(dt));
        }

        for format in FLOATING_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
                return Ok(EventDate::Floating(dt));
            }
        }

        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .map(EventDate::Date)
            .map_err(|_| EventboardError::InvalidDate(input.to_string()))
    }

    /// The calendar day this date falls on when viewed in `tz`.
    pub fn calendar_day<Z: TimeZone>(&self, tz: &Z) -> NaiveDate {
        match self {
            EventDate::Instant(dt) => dt.with_timezone(tz).date_naive(),
            EventDate::Floating(dt) => dt.date(),
            EventDate::Date(d) => *d,
        }
    }

    /// Absolute point in time used for ordering.
    ///
    /// Floating and all-day values resolve in `tz`. On a DST overlap the
    /// earlier mapping wins; a wall-clock time skipped by a DST gap is read
    /// with the offset in force before the gap, landing just after it.
    pub fn to_utc<Z: TimeZone>(&self, tz: &Z) -> DateTime<Utc> {
        match self {
            EventDate::Instant(dt) => dt.with_timezone(&Utc),
            EventDate::Floating(dt) => resolve_local(tz, dt),
            EventDate::Date(d) => resolve_local(tz, &d.and_time(NaiveTime::MIN)),
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, EventDate::Date(_))
    }
}

fn resolve_local<Z: TimeZone>(tz: &Z, local: &NaiveDateTime) -> DateTime<Utc> {
    let resolved = tz.from_local_datetime(local).earliest().or_else(|| {
        // Gaps are at most an hour long
        tz.from_local_datetime(&(*local + Duration::hours(1))).earliest()
    });

    match resolved {
        Some(dt) => dt.with_timezone(&Utc),
        None => local.and_utc(),
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventDate::Instant(dt) => write!(f, "{}", dt.to_rfc3339()),
            EventDate::Floating(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            EventDate::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for EventDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        EventDate::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use chrono_tz::America::New_York;

    #[test]
    fn parses_rfc3339_as_instant() {
        let date = EventDate::parse("2025-03-20T15:00:00Z").unwrap();
        assert!(matches!(date, EventDate::Instant(_)));
        assert_eq!(date.to_utc(&Utc).hour(), 15);

        let date = EventDate::parse("2025-03-20T15:00:00.000-03:00").unwrap();
        assert_eq!(date.to_utc(&Utc).hour(), 18);
    }

    #[test]
    fn parses_values_without_offset_as_floating() {
        for input in ["2025-03-20T15:00", "2025-03-20T15:00:30", "2025-03-20 15:00:30.250"] {
            let date = EventDate::parse(input).unwrap();
            assert!(matches!(date, EventDate::Floating(_)), "{input}");
        }
    }

    #[test]
    fn parses_bare_dates_as_all_day() {
        let date = EventDate::parse(" 2025-03-20 ").unwrap();
        assert_eq!(date, EventDate::Date(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()));
        assert!(date.is_all_day());
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "tomorrow", "2025-13-40", "20/03/2025"] {
            assert!(matches!(
                EventDate::parse(input),
                Err(EventboardError::InvalidDate(_))
            ));
        }
    }

    #[test]
    fn calendar_day_follows_viewing_timezone() {
        // 02:30 UTC on the 21st is still the evening of the 20th in New York
        let date = EventDate::parse("2025-03-21T02:30:00Z").unwrap();
        assert_eq!(date.calendar_day(&Utc).day(), 21);
        assert_eq!(date.calendar_day(&New_York).day(), 20);

        // Floating and all-day values never shift
        let floating = EventDate::parse("2025-03-21T02:30").unwrap();
        assert_eq!(floating.calendar_day(&New_York).day(), 21);
    }

    #[test]
    fn all_day_resolves_to_local_midnight() {
        let date = EventDate::parse("2025-07-04").unwrap();
        let utc = date.to_utc(&New_York);
        // EDT is UTC-4
        assert_eq!((utc.day(), utc.hour()), (4, 4));
    }

    #[test]
    fn floating_inside_dst_gap_resolves_past_the_gap() {
        // 02:30 on 2025-03-09 does not exist in New York; read as EST it is 03:30 EDT
        let date = EventDate::parse("2025-03-09T02:30").unwrap();
        let utc = date.to_utc(&New_York);
        assert_eq!((utc.day(), utc.hour(), utc.minute()), (9, 7, 30));

        let local = utc.with_timezone(&New_York);
        assert_eq!((local.day(), local.hour(), local.minute()), (9, 3, 30));
    }

    #[test]
    fn floating_inside_dst_overlap_takes_the_earlier_instant() {
        // 01:30 on 2025-11-02 happens twice in New York; the EDT reading comes first
        let date = EventDate::parse("2025-11-02T01:30").unwrap();
        let utc = date.to_utc(&New_York);
        assert_eq!((utc.day(), utc.hour(), utc.minute()), (2, 5, 30));
    }

    #[test]
    fn serializes_as_iso_string() {
        let event = Event::new("7", "Youth night", EventDate::parse("2025-03-20").unwrap());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["date"], "2025-03-20");

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
