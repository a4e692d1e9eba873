//! Per-day attendance summaries and their wire rendering.

use chrono::{NaiveTime, TimeDelta};
use serde::{Serialize, Serializer};

use crate::duration::{format_duration, format_nonzero};
use crate::session::Anomaly;

/// Text written in the `errors` field for both [`SummaryStatus::NoAnomalies`]
/// and [`SummaryStatus::NoData`]. Consumers of the report format expect the
/// same value for both; use [`DaySummary::status`] to tell them apart.
pub const ABSENT: &str = "Absent";

const TIME_FORMAT: &str = "%H:%M:%S";

/// Outcome of reconciling one identity-day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryStatus {
    /// Swipes were present and at least one was out of place.
    Anomalies(Vec<Anomaly>),
    /// Swipes were present and formed clean sessions.
    NoAnomalies,
    /// No swipes at all; the row was synthesized from the query.
    NoData,
}

impl SummaryStatus {
    pub fn from_anomalies(anomalies: Vec<Anomaly>) -> Self {
        if anomalies.is_empty() {
            Self::NoAnomalies
        } else {
            Self::Anomalies(anomalies)
        }
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        match self {
            Self::Anomalies(anomalies) => anomalies,
            Self::NoAnomalies | Self::NoData => &[],
        }
    }
}

impl Serialize for SummaryStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Anomalies(anomalies) => {
                serializer.collect_seq(anomalies.iter().map(ToString::to_string))
            }
            Self::NoAnomalies | Self::NoData => serializer.serialize_str(ABSENT),
        }
    }
}

/// One output row: what a single identity did on a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub name: String,
    pub tag: String,
    /// The group's own date, or the query date for synthesized rows.
    pub date: String,
    /// First valid IN of the day.
    pub login_time: Option<NaiveTime>,
    /// OUT of the last successfully closed session.
    pub logout_time: Option<NaiveTime>,
    /// Sum of closed sessions.
    pub worked: TimeDelta,
    /// `logout - login`, only when both are known.
    pub span: Option<TimeDelta>,
    pub status: SummaryStatus,
    /// Requested locations, echoed on rows synthesized for an empty batch.
    pub locations: Option<Vec<String>>,
}

impl DaySummary {
    /// Placeholder for an identity with no swipes.
    pub fn absent(
        name: impl Into<String>,
        tag: impl Into<String>,
        date: impl Into<String>,
        locations: Option<Vec<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            date: date.into(),
            login_time: None,
            logout_time: None,
            worked: TimeDelta::zero(),
            span: None,
            status: SummaryStatus::NoData,
            locations,
        }
    }

    /// Time between sessions. Negative when sessions overlap the span
    /// inconsistently; not clamped.
    pub fn break_time(&self) -> Option<TimeDelta> {
        self.span.map(|span| span - self.worked)
    }

    pub fn login_time_text(&self) -> String {
        format_time(self.login_time)
    }

    pub fn logout_time_text(&self) -> String {
        format_time(self.logout_time)
    }

    pub fn effective_login_text(&self) -> String {
        format_nonzero(self.worked)
    }

    pub fn break_hours_text(&self) -> String {
        self.break_time().map(format_nonzero).unwrap_or_default()
    }

    pub fn total_login_text(&self) -> String {
        self.span.map(format_duration).unwrap_or_default()
    }
}

fn format_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

#[derive(Serialize)]
struct WireSummary<'a> {
    name: &'a str,
    rfid: &'a str,
    date: &'a str,
    login_time: String,
    logout_time: String,
    #[serde(rename = "Effective_login")]
    effective_login: String,
    #[serde(rename = "Break_hours")]
    break_hours: String,
    #[serde(rename = "Total_login")]
    total_login: String,
    errors: &'a SummaryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_cabin: Option<&'a [String]>,
}

impl Serialize for DaySummary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireSummary {
            name: &self.name,
            rfid: &self.tag,
            date: &self.date,
            login_time: self.login_time_text(),
            logout_time: self.logout_time_text(),
            effective_login: self.effective_login_text(),
            break_hours: self.break_hours_text(),
            total_login: self.total_login_text(),
            errors: &self.status,
            log_cabin: self.locations.as_deref(),
        }
        .serialize(serializer)
    }
}
