//! Terminal rendering for eventboard types.
//!
//! Extension traits that add colored output to eventboard-core types
//! using owo_colors.

use chrono_tz::Tz;
use eventboard_core::{Board, Bucket, Event, EventDate, FeaturedCard, Layout};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Bucket {
    fn render(&self) -> String {
        let label = format!("{:<10}", self.label());
        match self {
            Bucket::Today => label.green().bold().to_string(),
            Bucket::Tomorrow | Bucket::ThisWeek => label.cyan().to_string(),
            Bucket::ThisMonth | Bucket::Future => label.blue().to_string(),
            Bucket::Yesterday | Bucket::LastWeek => label.yellow().to_string(),
            Bucket::LastMonth | Bucket::Old => label.dimmed().to_string(),
        }
    }
}

impl Render for Layout {
    fn render(&self) -> String {
        format!("📋 {}", self.name().bold())
    }
}

/// Format when an event happens in the viewing timezone
/// (e.g. "Sun Mar 23 19:00" or "Sun Mar 23  all-day").
pub fn format_when(date: &EventDate, tz: &Tz) -> String {
    match date {
        EventDate::Date(d) => format!("{}  all-day", d.format("%a %b %e")),
        EventDate::Floating(dt) => dt.format("%a %b %e %H:%M").to_string(),
        EventDate::Instant(dt) => dt.with_timezone(tz).format("%a %b %e %H:%M").to_string(),
    }
}

/// One line for an event: when, title, and location if any.
pub fn render_event(event: &Event, tz: &Tz) -> String {
    let when = format_when(&event.date, tz);
    let title = if event.title.is_empty() {
        format!("(untitled {})", event.id)
    } else {
        event.title.clone()
    };

    match &event.location {
        Some(location) => format!("{}  {} {}", when.dimmed(), title, format!("@ {}", location).dimmed()),
        None => format!("{}  {}", when.dimmed(), title),
    }
}

fn render_card(card: &FeaturedCard<'_>, tz: &Tz) -> String {
    format!(
        "   {:<10} {} {}",
        card.role.label().bold(),
        card.bucket.render(),
        render_event(card.event, tz)
    )
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Render a board: the layout, its featured cards, then the overflow lists
/// either expanded (`all`) or as counts.
pub fn render_board(board: &Board<'_>, tz: &Tz, all: bool) -> String {
    let Some(layout) = board.layout else {
        return "   No events".dimmed().to_string();
    };

    let mut lines = vec![layout.render()];
    lines.extend(board.featured.iter().map(|card| render_card(card, tz)));

    let overflow = [
        ("more upcoming", &board.more_upcoming),
        ("earlier", &board.earlier),
    ];

    for (label, events) in overflow {
        if events.is_empty() {
            continue;
        }

        lines.push(String::new());

        if all {
            lines.push(format!("   {}", capitalize(label).dimmed()));
            lines.extend(events.iter().map(|e| format!("     {}", render_event(e, tz))));
        } else {
            let summary = format!("({} {} {})", events.len(), label, pluralize("event", events.len()));
            lines.push(format!("   {} {}", "+".dimmed(), summary.dimmed()));
        }
    }

    lines.join("\n")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralizes() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 3), "events");
    }

    #[test]
    fn capitalizes_labels() {
        assert_eq!(capitalize("more upcoming"), "More upcoming");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn formats_each_kind_of_date() {
        let tz = chrono_tz::America::Sao_Paulo;

        let all_day = EventDate::parse("2025-03-23").unwrap();
        assert_eq!(format_when(&all_day, &tz), "Sun Mar 23  all-day");

        let floating = EventDate::parse("2025-03-23T19:00").unwrap();
        assert_eq!(format_when(&floating, &tz), "Sun Mar 23 19:00");

        // 01:00 UTC on Monday is Sunday evening in Sao Paulo
        let instant = EventDate::parse("2025-03-24T01:00:00Z").unwrap();
        assert_eq!(format_when(&instant, &tz), "Sun Mar 23 22:00");
    }
}
