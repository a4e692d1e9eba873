//! Badge swipe events and the identity key they are grouped by.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Format of a swipe's date and time once joined with a single space.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Direction of a badge swipe.
///
/// Anything other than `IN` or `OUT` is kept as [`Direction::Unknown`] so a
/// single odd record never rejects a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    In,
    Out,
    #[default]
    Unknown,
}

impl Direction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Unknown => "",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "IN" => Self::In,
            "OUT" => Self::Out,
            _ => Self::Unknown,
        })
    }
}

impl Serialize for Direction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.and_then(|s| s.parse().ok()).unwrap_or_default())
    }
}

/// One badge scan.
///
/// Field aliases accept the names used by the door controllers' feed
/// (`Name`, `RFID`, `IN/OUT`, `Log_Cabin`). A record that carries both a
/// field and one of its aliases (say `tag` and `RFID`) is a duplicate-field
/// error, and the batch reader reports it against that record's line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeEvent {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "rfid", alias = "RFID")]
    pub tag: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// Wall-clock time, `HH:MM:SS`.
    #[serde(default)]
    pub time: String,
    #[serde(default, alias = "IN/OUT")]
    pub direction: Direction,
    #[serde(
        default,
        alias = "log_cabin",
        alias = "Log_Cabin",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
}

impl SwipeEvent {
    pub fn new(
        name: impl Into<String>,
        tag: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            date: date.into(),
            time: time.into(),
            direction,
            location: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// The (name, tag, date) key this event is grouped under.
    pub fn key(&self) -> IdentityKey {
        IdentityKey {
            name: self.name.clone(),
            tag: self.tag.clone(),
            date: self.date.clone(),
        }
    }

    /// Parses the event's date and time, `None` when either is malformed.
    ///
    /// Leading whitespace before the time is tolerated. Whitespace anywhere
    /// else, or a leap second (`:60`), makes the timestamp malformed.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let time = self.time.trim_start();
        if self.date.contains(char::is_whitespace) || time.contains(char::is_whitespace) {
            return None;
        }

        let joined = format!("{} {time}", self.date);
        let timestamp = NaiveDateTime::parse_from_str(&joined, TIMESTAMP_FORMAT).ok()?;
        // chrono stores a leap second as nanoseconds past one billion.
        (timestamp.nanosecond() < 1_000_000_000).then_some(timestamp)
    }
}

/// Grouping key: two events share a day record iff all three fields are
/// textually equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub name: String,
    pub tag: String,
    pub date: String,
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.name, self.tag, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parses_known_values() {
        assert_eq!("IN".parse::<Direction>().unwrap(), Direction::In);
        assert_eq!("OUT".parse::<Direction>().unwrap(), Direction::Out);
        assert_eq!("in".parse::<Direction>().unwrap(), Direction::Unknown);
        assert_eq!("BREAK".parse::<Direction>().unwrap(), Direction::Unknown);
    }

    #[test]
    fn event_accepts_feed_field_names() {
        let json = r#"{
            "Name": "Alice",
            "RFID": "0042",
            "date": "2025-01-01",
            "time": "08:00:00",
            "IN/OUT": "IN",
            "Log_Cabin": "C-12"
        }"#;
        let event: SwipeEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.name, "Alice");
        assert_eq!(event.tag, "0042");
        assert_eq!(event.direction, Direction::In);
        assert_eq!(event.location.as_deref(), Some("C-12"));
    }

    #[test]
    fn event_missing_fields_default_to_empty() {
        let event: SwipeEvent = serde_json::from_str(r#"{"name": "Bob"}"#).unwrap();

        assert_eq!(event.tag, "");
        assert_eq!(event.date, "");
        assert_eq!(event.direction, Direction::Unknown);
        assert!(event.timestamp().is_none());
    }

    #[test]
    fn event_null_direction_is_unknown() {
        let event: SwipeEvent =
            serde_json::from_str(r#"{"name": "Bob", "direction": null}"#).unwrap();
        assert_eq!(event.direction, Direction::Unknown);
    }

    #[test]
    fn timestamp_parses_date_and_time() {
        let event = SwipeEvent::new("A", "1", "2025-01-01", "08:30:15", Direction::In);
        let ts = event.timestamp().unwrap();
        assert_eq!(ts.format("%H:%M:%S").to_string(), "08:30:15");
    }

    #[test]
    fn timestamp_rejects_garbage() {
        let bad_time = SwipeEvent::new("A", "1", "2025-01-01", "8 o'clock", Direction::In);
        let bad_date = SwipeEvent::new("A", "1", "2025-13-01", "08:00:00", Direction::In);
        assert!(bad_time.timestamp().is_none());
        assert!(bad_date.timestamp().is_none());
    }

    #[test]
    fn timestamp_rejects_inner_whitespace_and_leap_seconds() {
        let at = |date: &str, time: &str| {
            SwipeEvent::new("A", "1", date, time, Direction::In).timestamp()
        };

        assert!(at("2025-01-01", "08: 00:00").is_none());
        assert!(at("2025-01-01", "08:00: 00").is_none());
        assert!(at("2025-01-01", "08:00:00 ").is_none());
        assert!(at("2025-01-01 ", "08:00:00").is_none());
        assert!(at("2025-01-01", "08:00:60").is_none());
        assert!(at("2025-01-01", " 08:00:00").is_some());
        assert!(at("2025-01-01", "8:00:00").is_some());
    }

    #[test]
    fn key_uses_name_tag_and_date() {
        let event = SwipeEvent::new("A", "1", "2025-01-01", "08:00:00", Direction::In);
        assert_eq!(event.key().to_string(), "A/1/2025-01-01");
    }
}
