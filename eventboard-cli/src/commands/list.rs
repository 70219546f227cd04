use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use eventboard_core::feed::Feed;
use eventboard_core::{Bucket, Event, classify, partition};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::render::{Render, render_event};

#[derive(Serialize)]
struct ListedEvent<'a> {
    bucket: Bucket,
    event: &'a Event,
}

pub fn run(feed: &Feed, now: &DateTime<Tz>, json: bool) -> Result<()> {
    let listed = bucketed(&feed.events, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    if listed.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let tz = now.timezone();
    let mut current: Option<Bucket> = None;

    for item in &listed {
        if current != Some(item.bucket) {
            if current.is_some() {
                println!();
            }
            println!("{}", item.bucket.render().bold());
            current = Some(item.bucket);
        }

        println!("  {}", render_event(item.event, &tz));
    }

    Ok(())
}

/// Today's events in feed order, then upcoming soonest first, then past
/// most recent first. Buckets come out contiguous in `Bucket::ALL` order.
fn bucketed<'a>(events: &'a [Event], now: &DateTime<Tz>) -> Vec<ListedEvent<'a>> {
    let split = partition(events, now);

    split
        .today
        .into_iter()
        .chain(split.future)
        .chain(split.past)
        .map(|event| ListedEvent {
            bucket: classify(&event.date, now),
            event,
        })
        .collect()
}
