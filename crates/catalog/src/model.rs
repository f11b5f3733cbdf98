//! Search result data model

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Event types whose location picture comes from the home team
const HOME_TEAM_KINDS: &[&str] = &["mlb", "minor_league_baseball"];

/// Display format: `Sat, 4 Aug 2018 7:05 PM`
const DISPLAY_FORMAT: &str = "%a, %-d %b %Y %-I:%M %p";

/// Top-level response of the events endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub events: Vec<Event>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event at a zero-based row
    pub fn get(&self, row: usize) -> Option<&Event> {
        self.events.get(row)
    }
}

/// A single event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event type (mlb, concert, theater, ...)
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub id: Option<i64>,

    /// Local date and time of the event
    #[serde(default, deserialize_with = "deserialize_datetime")]
    pub datetime_local: Option<NaiveDateTime>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub venue: Option<Venue>,

    /// Bands, teams or groups taking part
    #[serde(default)]
    pub performers: Vec<Performer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub display_location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Performer {
    /// Picture URL
    #[serde(default)]
    pub image: Option<String>,

    /// Set on team events; the home team's image shows the field
    #[serde(default)]
    pub home_team: Option<bool>,
}

impl Event {
    /// Key under which the favorite flag is stored
    pub fn key(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }

    /// Picture of where the event takes place
    ///
    /// Baseball events list both teams; the home team's image is the field.
    /// If no performer is marked home, the last performer's image is used.
    /// Every other event uses the first performer's image.
    pub fn location_image(&self) -> Option<&str> {
        let is_home_team_kind = self
            .kind
            .as_deref()
            .map(|kind| HOME_TEAM_KINDS.contains(&kind))
            .unwrap_or(false);

        if !is_home_team_kind {
            return self.performers.first().and_then(|p| p.image.as_deref());
        }

        let mut image = None;
        for performer in &self.performers {
            image = performer.image.as_deref();
            if performer.home_team == Some(true) {
                break;
            }
        }
        image
    }

    /// Date formatted for the result list and detail view
    pub fn display_date(&self) -> Option<String> {
        self.datetime_local
            .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
    }

    /// Title, or a placeholder for untitled events
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }

    pub fn display_location(&self) -> Option<&str> {
        self.venue.as_ref().and_then(|v| v.display_location.as_deref())
    }
}

/// Data handed from the result list to the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    pub key: String,
    pub title: String,
    pub favorite: bool,
    pub location_image: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
}

impl EventDetail {
    /// Build the detail view data; events without an id cannot be shown
    pub fn from_event(event: &Event, favorite: bool) -> Option<Self> {
        Some(Self {
            key: event.key()?,
            title: event.display_title().to_string(),
            favorite,
            location_image: event.location_image().map(str::to_string),
            date: event.display_date(),
            location: event.display_location().map(str::to_string),
        })
    }
}

/// Parse an API timestamp
///
/// Accepted shapes, tried in order:
/// - `2018-08-04T19:05:00.000-0700` (kept as wall time in that offset)
/// - `2018-08-04T19:05:00`
/// - `2018-08-04` (midnight)
pub fn parse_event_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.3f%z") {
        return Some(dt.naive_local());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn deserialize_datetime<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let parsed = parse_event_datetime(&value);
        if parsed.is_none() {
            debug!(value = %value, "unrecognized event timestamp");
        }
        parsed
    }))
}

/// Decode a response body into search results
pub fn decode_results(body: &[u8]) -> crate::Result<SearchResults> {
    Ok(serde_json::from_slice(body)?)
}
