//! Parsing of the `--now` reference time.

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use eventboard_core::EventDate;

/// Day-only inputs are pinned to midday so a DST shift can't move them
/// onto a neighbouring day.
fn midday() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Parse a reference time: ISO 8601 first, natural language second.
pub fn parse_now(input: &str, tz: &Tz) -> Result<DateTime<Tz>> {
    if let Ok(date) = EventDate::parse(input) {
        return Ok(match date {
            EventDate::Instant(dt) => dt.with_timezone(tz),
            EventDate::Floating(dt) => localize(tz, &dt),
            EventDate::Date(d) => localize(tz, &d.and_time(midday())),
        });
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    if has_time_component(input) {
        Ok(localize(tz, &dt))
    } else {
        Ok(localize(tz, &dt.date().and_time(midday())))
    }
}

fn localize(tz: &Tz, local: &NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(*local + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(local))
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the input names a time of day (am/pm, HH:MM, noon, midnight).
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    // "friday at 3", "at 9"
    if let Some(pos) = lower.find(" at ") {
        let after = &lower[pos + 4..];
        if after.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
    }
    if let Some(after) = lower.strip_prefix("at ") {
        if after.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
    }

    let bytes = lower.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        // "6pm", "6 pm"
        if (b == b'a' || b == b'p') && bytes.get(i + 1) == Some(&b'm') {
            let digit_before = i > 0 && bytes[i - 1].is_ascii_digit();
            let digit_before_space = i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit();
            if digit_before || digit_before_space {
                return true;
            }
        }

        // "9:30"
        if b == b':' {
            let digit_before = i > 0 && bytes[i - 1].is_ascii_digit();
            let digit_after = bytes.get(i + 1).is_some_and(|c| c.is_ascii_digit());
            if digit_before && digit_after {
                return true;
            }
        }
    }

    false
}
