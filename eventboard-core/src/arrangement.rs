//! Arrangement of an event list into featured slots and overflow lists.
//!
//! An arrangement is a pure projection of `(events, now)`. It borrows from
//! the caller's slice and never reorders it; build a fresh one whenever the
//! list or the clock changes.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::event::Event;

/// Three-way split of events by calendar day relative to now.
///
/// Computed by comparing calendar days directly rather than through
/// `bucket::classify`; the two always agree on today/future/past.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition<'a> {
    /// Input order
    pub today: Vec<&'a Event>,
    /// Soonest first
    pub future: Vec<&'a Event>,
    /// Most recent first
    pub past: Vec<&'a Event>,
}

type SortKey = (NaiveDate, DateTime<Utc>);

pub fn partition<'a, Z: TimeZone>(events: &'a [Event], now: &DateTime<Z>) -> Partition<'a> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut today_list = Vec::new();
    let mut future: Vec<(SortKey, &'a Event)> = Vec::new();
    let mut past: Vec<(SortKey, &'a Event)> = Vec::new();

    for event in events {
        let day = event.date.calendar_day(&tz);
        // Day first, so the order can never disagree with the calendar split
        let key = (day, event.date.to_utc(&tz));
        match day.cmp(&today) {
            Ordering::Equal => today_list.push(event),
            Ordering::Greater => future.push((key, event)),
            Ordering::Less => past.push((key, event)),
        }
    }

    // Stable sorts: identical timestamps keep input order
    future.sort_by(|a, b| a.0.cmp(&b.0));
    past.sort_by(|a, b| b.0.cmp(&a.0));

    Partition {
        today: today_list,
        future: future.into_iter().map(|(_, e)| e).collect(),
        past: past.into_iter().map(|(_, e)| e).collect(),
    }
}

/// Featured slots and overflow lists for an event listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Arrangement<'a> {
    pub has_today: bool,
    pub has_past: bool,
    pub has_future: bool,

    /// First event on today's date, in input order
    pub today_event: Option<&'a Event>,
    /// Most recent past event
    pub previous_event: Option<&'a Event>,

    pub next_event: Option<&'a Event>,
    pub second_next: Option<&'a Event>,
    pub third_next: Option<&'a Event>,

    /// Future events after the first three, soonest first
    pub remaining_future: Vec<&'a Event>,
    /// Past events after `previous_event`, most recent first
    pub remaining_past: Vec<&'a Event>,
}

impl<'a> Arrangement<'a> {
    pub fn is_empty(&self) -> bool {
        !self.has_today && !self.has_past && !self.has_future
    }

    pub fn future_len(&self) -> usize {
        self.upcoming().count()
    }

    pub fn past_len(&self) -> usize {
        self.earlier().count()
    }

    /// All future events, soonest first.
    pub fn upcoming(&self) -> impl Iterator<Item = &'a Event> + '_ {
        [self.next_event, self.second_next, self.third_next]
            .into_iter()
            .flatten()
            .chain(self.remaining_future.iter().copied())
    }

    /// All past events, most recent first.
    pub fn earlier(&self) -> impl Iterator<Item = &'a Event> + '_ {
        self.previous_event
            .into_iter()
            .chain(self.remaining_past.iter().copied())
    }
}

/// Build the arrangement for `events` as seen at `now`.
pub fn arrange<'a, Z: TimeZone>(events: &'a [Event], now: &DateTime<Z>) -> Arrangement<'a> {
    let Partition { today, future, past } = partition(events, now);

    let arrangement = Arrangement {
        has_today: !today.is_empty(),
        has_past: !past.is_empty(),
        has_future: !future.is_empty(),
        today_event: today.first().copied(),
        previous_event: past.first().copied(),
        next_event: future.first().copied(),
        second_next: future.get(1).copied(),
        third_next: future.get(2).copied(),
        remaining_future: future.get(3..).unwrap_or_default().to_vec(),
        remaining_past: past.get(1..).unwrap_or_default().to_vec(),
    };

    tracing::debug!(
        today = today.len(),
        future = future.len(),
        past = past.len(),
        "arranged events"
    );

    arrangement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::{Bucket, classify};
    use crate::event::EventDate;
    use chrono::Duration;
    use chrono_tz::America::{New_York, Sao_Paulo};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap()
    }

    fn event_in(id: &str, days: i64) -> Event {
        Event::new(id, id, EventDate::Instant((now() + Duration::days(days)).fixed_offset()))
    }

    fn ids<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<&'a str> {
        events.into_iter().map(|e| e.id.as_str()).collect()
    }

    fn id(event: Option<&Event>) -> Option<&str> {
        event.map(|e| e.id.as_str())
    }

    #[test]
    fn today_past_and_future() {
        let events = vec![
            event_in("A", -10),
            event_in("B", -2),
            event_in("C", 0),
            event_in("D", 3),
            event_in("E", 40),
        ];

        let a = arrange(&events, &now());

        assert!(a.has_today && a.has_past && a.has_future);
        assert_eq!(id(a.today_event), Some("C"));
        assert_eq!(id(a.previous_event), Some("B"));
        assert_eq!(ids(a.remaining_past.iter().copied()), vec!["A"]);
        assert_eq!(id(a.next_event), Some("D"));
        assert_eq!(id(a.second_next), Some("E"));
        assert_eq!(a.third_next, None);
        assert!(a.remaining_future.is_empty());
    }

    #[test]
    fn no_today() {
        let events = vec![
            event_in("X", -5),
            event_in("Y", 1),
            event_in("Z", 9),
            event_in("W", 50),
        ];

        let a = arrange(&events, &now());

        assert!(!a.has_today);
        assert_eq!(a.today_event, None);
        assert_eq!(id(a.previous_event), Some("X"));
        assert_eq!(id(a.next_event), Some("Y"));
        assert_eq!(id(a.second_next), Some("Z"));
        assert_eq!(id(a.third_next), Some("W"));
        assert!(a.remaining_future.is_empty());
    }

    #[test]
    fn empty_input() {
        let events: Vec<Event> = Vec::new();
        let a = arrange(&events, &now());

        assert!(a.is_empty());
        assert_eq!((a.future_len(), a.past_len()), (0, 0));
        assert_eq!(a, Arrangement::default());
    }

    #[test]
    fn overflow_lists_keep_their_order() {
        // Deliberately shuffled input
        let events = vec![
            event_in("f5", 5),
            event_in("p20", -20),
            event_in("f1", 1),
            event_in("f90", 90),
            event_in("p1", -1),
            event_in("f3", 3),
            event_in("p3", -3),
            event_in("f12", 12),
        ];

        let a = arrange(&events, &now());

        assert_eq!(ids(a.upcoming()), vec!["f1", "f3", "f5", "f12", "f90"]);
        assert_eq!(ids(a.remaining_future.iter().copied()), vec!["f12", "f90"]);
        assert_eq!(ids(a.earlier()), vec!["p1", "p3", "p20"]);
        assert_eq!(ids(a.remaining_past.iter().copied()), vec!["p3", "p20"]);
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let events: Vec<Event> = (-40..=40)
            .step_by(3)
            .map(|d| event_in(&format!("e{d}"), d))
            .collect();

        let p = partition(&events, &now());
        assert_eq!(p.today.len() + p.future.len() + p.past.len(), events.len());

        let mut seen: Vec<&str> = ids(p.today.iter().copied());
        seen.extend(ids(p.future.iter().copied()));
        seen.extend(ids(p.past.iter().copied()));
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), events.len());

        let a = arrange(&events, &now());
        assert_eq!(a.future_len(), p.future.len());
        assert_eq!(a.past_len(), p.past.len());
    }

    #[test]
    fn partition_agrees_with_classifier() {
        let events: Vec<Event> = (-35..=35).map(|d| event_in(&d.to_string(), d)).collect();
        let p = partition(&events, &now());

        for e in &p.today {
            assert_eq!(classify(&e.date, &now()), Bucket::Today);
        }
        for e in &p.future {
            assert!(classify(&e.date, &now()).is_upcoming());
        }
        for e in &p.past {
            assert!(classify(&e.date, &now()).is_past());
        }
    }

    #[test]
    fn today_event_is_first_in_input_order_not_earliest() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let events = vec![
            Event::new("evening", "Evening", EventDate::Floating(day.and_hms_opt(19, 0, 0).unwrap())),
            Event::new("morning", "Morning", EventDate::Floating(day.and_hms_opt(8, 0, 0).unwrap())),
        ];

        let a = arrange(&events, &now());
        assert_eq!(id(a.today_event), Some("evening"));
    }

    #[test]
    fn identical_dates_keep_input_order() {
        let events = vec![
            event_in("first", 4),
            event_in("second", 4),
            event_in("old-first", -4),
            event_in("old-second", -4),
        ];

        let a = arrange(&events, &now());
        assert_eq!(ids(a.upcoming()), vec!["first", "second"]);
        assert_eq!(ids(a.earlier()), vec!["old-first", "old-second"]);
    }

    #[test]
    fn does_not_touch_the_input_and_is_repeatable() {
        let events = vec![event_in("b", 2), event_in("a", -2), event_in("c", 1)];
        let before = events.clone();

        let first = arrange(&events, &now());
        let second = arrange(&events, &now());

        assert_eq!(first, second);
        assert_eq!(events, before);
    }

    #[test]
    fn same_list_rearranges_on_a_different_day() {
        let events = vec![event_in("x", 1)];

        let a = arrange(&events, &now());
        assert!(a.has_future && !a.has_today);

        let a = arrange(&events, &(now() + Duration::days(1)));
        assert!(a.has_today && !a.has_future);
        assert_eq!(id(a.today_event), Some("x"));
    }

    #[test]
    fn mixes_all_day_and_timed_events() {
        let tomorrow = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
        let events = vec![
            Event::new("timed", "Timed", EventDate::Floating(tomorrow.and_hms_opt(9, 0, 0).unwrap())),
            Event::new("all-day", "All day", EventDate::Date(tomorrow)),
        ];

        let a = arrange(&events, &now());
        // All-day sorts at local midnight, ahead of the 09:00 event
        assert_eq!(ids(a.upcoming()), vec!["all-day", "timed"]);
    }

    #[test]
    fn day_boundaries_follow_the_viewing_timezone() {
        // 01:00 UTC on the 21st is 22:00 on the 20th in Sao Paulo (UTC-3)
        let events = vec![Event::new(
            "late",
            "Late service",
            EventDate::parse("2025-03-21T01:00:00Z").unwrap(),
        )];

        let a = arrange(&events, &now());
        assert!(a.has_future);

        let a = arrange(&events, &now().with_timezone(&Sao_Paulo));
        assert!(a.has_today);
    }

    #[test]
    fn wall_clock_time_in_a_dst_gap_keeps_past_order() {
        let now = New_York.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap();
        let events = vec![
            Event::new("mar8-late", "Late vigil", EventDate::parse("2025-03-08T23:00:00-05:00").unwrap()),
            // 02:30 is skipped when New York springs forward on Mar 9
            Event::new("mar9-gap", "Early prayer", EventDate::parse("2025-03-09T02:30").unwrap()),
        ];

        let a = arrange(&events, &now);
        assert_eq!(id(a.previous_event), Some("mar9-gap"));
        assert_eq!(ids(a.earlier()), vec!["mar9-gap", "mar8-late"]);
    }
}
