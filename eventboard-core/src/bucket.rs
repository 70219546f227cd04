//! Temporal buckets: how far an event is from "now", in calendar days.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::event::EventDate;

/// Coarse temporal classification of an event relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Today,
    Tomorrow,
    ThisWeek,
    ThisMonth,
    Future,
    Yesterday,
    LastWeek,
    LastMonth,
    Old,
}

impl Bucket {
    /// All buckets in display order: soonest upcoming first, then past from
    /// most to least recent.
    pub const ALL: [Bucket; 9] = [
        Bucket::Today,
        Bucket::Tomorrow,
        Bucket::ThisWeek,
        Bucket::ThisMonth,
        Bucket::Future,
        Bucket::Yesterday,
        Bucket::LastWeek,
        Bucket::LastMonth,
        Bucket::Old,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Today => "Today",
            Bucket::Tomorrow => "Tomorrow",
            Bucket::ThisWeek => "This week",
            Bucket::ThisMonth => "This month",
            Bucket::Future => "Later",
            Bucket::Yesterday => "Yesterday",
            Bucket::LastWeek => "Last week",
            Bucket::LastMonth => "Last month",
            Bucket::Old => "Earlier",
        }
    }

    /// Tomorrow or later.
    pub fn is_upcoming(&self) -> bool {
        matches!(
            self,
            Bucket::Tomorrow | Bucket::ThisWeek | Bucket::ThisMonth | Bucket::Future
        )
    }

    /// Yesterday or earlier.
    pub fn is_past(&self) -> bool {
        matches!(
            self,
            Bucket::Yesterday | Bucket::LastWeek | Bucket::LastMonth | Bucket::Old
        )
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whole calendar days from `now`'s day to the event's day, both taken in
/// `now`'s timezone. Positive means the event is ahead.
pub fn day_difference<Z: TimeZone>(date: &EventDate, now: &DateTime<Z>) -> i64 {
    let today = now.date_naive();
    let day = date.calendar_day(&now.timezone());
    (day - today).num_days()
}

/// Classify an event date relative to `now`. Total over valid dates.
pub fn classify<Z: TimeZone>(date: &EventDate, now: &DateTime<Z>) -> Bucket {
    match day_difference(date, now) {
        0 => Bucket::Today,
        1 => Bucket::Tomorrow,
        2..=7 => Bucket::ThisWeek,
        8..=30 => Bucket::ThisMonth,
        31.. => Bucket::Future,
        -1 => Bucket::Yesterday,
        -7..=-2 => Bucket::LastWeek,
        -30..=-8 => Bucket::LastMonth,
        _ => Bucket::Old,
    }
}
