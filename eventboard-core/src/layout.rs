//! Layout selection for an arrangement.
//!
//! A layout is picked from a handful of signals on the arrangement and
//! decides which slots become featured cards. Everything not featured ends
//! up in the "more upcoming" and "earlier" disclosure lists.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::arrangement::Arrangement;
use crate::bucket::{Bucket, classify};
use crate::event::Event;

/// Signals the layout table is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutSignals {
    pub has_today: bool,
    pub has_past: bool,
    pub has_future: bool,
    pub has_second_next: bool,
    pub has_third_next: bool,
}

impl From<&Arrangement<'_>> for LayoutSignals {
    fn from(arrangement: &Arrangement<'_>) -> Self {
        LayoutSignals {
            has_today: arrangement.has_today,
            has_past: arrangement.has_past,
            has_future: arrangement.has_future,
            has_second_next: arrangement.second_next.is_some(),
            has_third_next: arrangement.third_next.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    TodayOnly,
    TodayAndPast,
    TodayAndFuture,
    TodayPastAndFuture,
    PastOnly,
    PastAndFuture,
    FutureSingle,
    FuturePair,
    FutureTrio,
}

/// Which arrangement slot a featured card is filled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRole {
    Previous,
    Today,
    Next,
    SecondNext,
    ThirdNext,
}

impl Layout {
    /// Pick the layout for a set of signals. `None` means there is nothing
    /// to show.
    pub fn select(signals: &LayoutSignals) -> Option<Layout> {
        let layout = match (signals.has_today, signals.has_past, signals.has_future) {
            (true, false, false) => Layout::TodayOnly,
            (true, true, false) => Layout::TodayAndPast,
            (true, false, true) => Layout::TodayAndFuture,
            (true, true, true) => Layout::TodayPastAndFuture,
            (false, true, false) => Layout::PastOnly,
            (false, true, true) => Layout::PastAndFuture,
            (false, false, true) if signals.has_third_next => Layout::FutureTrio,
            (false, false, true) if signals.has_second_next => Layout::FuturePair,
            (false, false, true) => Layout::FutureSingle,
            (false, false, false) => return None,
        };
        Some(layout)
    }

    /// Featured slots, left to right.
    pub fn slots(&self) -> &'static [SlotRole] {
        use SlotRole::*;

        match self {
            Layout::TodayOnly => &[Today],
            Layout::TodayAndPast => &[Previous, Today],
            Layout::TodayAndFuture => &[Today, Next],
            Layout::TodayPastAndFuture => &[Previous, Today, Next],
            Layout::PastOnly => &[Previous],
            Layout::PastAndFuture => &[Previous, Next, SecondNext],
            Layout::FutureSingle => &[Next],
            Layout::FuturePair => &[Next, SecondNext],
            Layout::FutureTrio => &[Next, SecondNext, ThirdNext],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::TodayOnly => "today-only",
            Layout::TodayAndPast => "today-and-past",
            Layout::TodayAndFuture => "today-and-future",
            Layout::TodayPastAndFuture => "today-past-and-future",
            Layout::PastOnly => "past-only",
            Layout::PastAndFuture => "past-and-future",
            Layout::FutureSingle => "future-single",
            Layout::FuturePair => "future-pair",
            Layout::FutureTrio => "future-trio",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl SlotRole {
    pub fn resolve<'a>(&self, arrangement: &Arrangement<'a>) -> Option<&'a Event> {
        match self {
            SlotRole::Previous => arrangement.previous_event,
            SlotRole::Today => arrangement.today_event,
            SlotRole::Next => arrangement.next_event,
            SlotRole::SecondNext => arrangement.second_next,
            SlotRole::ThirdNext => arrangement.third_next,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotRole::Previous => "Previous",
            SlotRole::Today => "Today",
            SlotRole::Next => "Next",
            SlotRole::SecondNext => "Coming up",
            SlotRole::ThirdNext => "Coming up",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedCard<'a> {
    pub role: SlotRole,
    pub bucket: Bucket,
    pub event: &'a Event,
}

/// What a listing screen renders: a layout, its featured cards, and the
/// collapsed overflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board<'a> {
    pub layout: Option<Layout>,
    pub featured: Vec<FeaturedCard<'a>>,
    /// Future events not featured, soonest first
    pub more_upcoming: Vec<&'a Event>,
    /// Past events not featured, most recent first
    pub earlier: Vec<&'a Event>,
}

impl<'a> Board<'a> {
    pub fn build<Z: TimeZone>(arrangement: &Arrangement<'a>, now: &DateTime<Z>) -> Self {
        let layout = Layout::select(&LayoutSignals::from(arrangement));

        let featured: Vec<FeaturedCard<'a>> = layout
            .map(|l| l.slots())
            .unwrap_or_default()
            .iter()
            .filter_map(|role| {
                role.resolve(arrangement).map(|event| FeaturedCard {
                    role: *role,
                    bucket: classify(&event.date, now),
                    event,
                })
            })
            .collect();

        let is_featured =
            |event: &Event| featured.iter().any(|card| std::ptr::eq(card.event, event));

        let more_upcoming = arrangement.upcoming().filter(|e| !is_featured(*e)).collect();
        let earlier = arrangement.earlier().filter(|e| !is_featured(*e)).collect();

        Board {
            layout,
            featured,
            more_upcoming,
            earlier,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_none()
    }
}
