//! Backend event records and their normalization into `Event`s.
//!
//! Records come from the REST backend either as a bare JSON array or as a
//! paginated envelope. A record with no primary date falls back to its
//! media creation time, then to its own creation time.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{EventboardError, EventboardResult};
use crate::event::{Event, EventDate, Media};

/// An event record as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: RawId,
    #[serde(default)]
    pub title: String,
    pub date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub media: Option<RawMedia>,
    #[serde(alias = "created_at")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMedia {
    pub url: Option<String>,
    #[serde(alias = "created_at")]
    pub created_at: Option<String>,
}

/// Backend ids show up as strings or numbers depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Text(s) => write!(f, "{}", s),
            RawId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Top-level shapes a feed can take.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    List(Vec<Value>),
    Page {
        #[serde(alias = "data")]
        items: Vec<Value>,
    },
}

impl RawEvent {
    /// The date this record should be classified by, following the
    /// fallback chain. Blank strings count as missing.
    pub fn effective_date(&self) -> Option<&str> {
        let media_created = self.media.as_ref().and_then(|m| m.created_at.as_deref());

        [self.date.as_deref(), media_created, self.created_at.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    pub fn normalize(&self) -> EventboardResult<Event> {
        let raw_date = self.effective_date().ok_or_else(|| {
            EventboardError::Feed(format!("Event '{}' has no date to classify by", self.id))
        })?;

        Ok(Event {
            id: self.id.to_string(),
            title: self.title.clone(),
            date: EventDate::parse(raw_date)?,
            location: non_blank(&self.location),
            description: non_blank(&self.description),
            media: self.media.as_ref().map(|m| Media {
                url: m.url.clone(),
                created_at: m.created_at.clone(),
            }),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Normalized events from one feed, in feed order.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub events: Vec<Event>,
    /// Records that could not be turned into events
    pub skipped: usize,
}

impl Feed {
    pub fn from_json(content: &str) -> EventboardResult<Self> {
        let envelope: Envelope = serde_json::from_str(content).map_err(|e| {
            EventboardError::Serialization(format!(
                "Expected a JSON array of events or an object with \"items\": {e}"
            ))
        })?;

        let records = match envelope {
            Envelope::List(items) | Envelope::Page { items } => items,
        };

        let mut feed = Feed::default();

        for (index, record) in records.into_iter().enumerate() {
            let normalized = serde_json::from_value::<RawEvent>(record)
                .map_err(|e| EventboardError::Feed(e.to_string()))
                .and_then(|raw| raw.normalize());

            match normalized {
                Ok(event) => feed.events.push(event),
                Err(e) => {
                    tracing::warn!(index, "skipping event record: {}", e);
                    feed.skipped += 1;
                }
            }
        }

        tracing::debug!(events = feed.events.len(), skipped = feed.skipped, "loaded feed");

        Ok(feed)
    }

    pub fn load(path: &Path) -> EventboardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
