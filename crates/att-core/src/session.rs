//! Reconstruction of IN/OUT sessions for one identity-day.
//!
//! Events are walked in time order through a two-state machine:
//!
//! | state   | event          | next    | effect                               |
//! |---------|----------------|---------|--------------------------------------|
//! | Idle    | IN, valid      | Open    | start session, first one sets login  |
//! | Idle    | IN, malformed  | Idle    | `Bad IN datetime`                    |
//! | Open    | IN             | Open    | `Duplicate IN`, original start kept  |
//! | Open    | OUT, valid     | Idle    | add session to worked, set logout    |
//! | Open    | OUT, malformed | Open    | `Unexpected OUT`                     |
//! | Idle    | OUT            | Idle    | `Unexpected OUT`                     |
//!
//! A session still open after the last event is reported as `Missing OUT`.
//! Events with an unknown direction are skipped.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use thiserror::Error;

use crate::event::Direction;
use crate::group::{EventGroup, TimedEvent};
use crate::summary::{DaySummary, SummaryStatus};

/// Something out of place in a day's swipes. Never fatal; each one becomes
/// an entry in the row's `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Anomaly {
    /// An IN whose date or time could not be parsed.
    #[error("Bad IN datetime at {time}")]
    MalformedTimestamp { time: String },

    /// An IN while a session was already open.
    #[error("Duplicate IN at {time}")]
    DuplicateIn { time: String },

    /// An OUT with no open session, or with a malformed timestamp.
    #[error("Unexpected OUT at {time}")]
    UnexpectedOut { time: String },

    /// The day ended with a session still open.
    #[error("Missing OUT after {}", format_since(.since.as_ref()))]
    MissingOut { since: Option<NaiveTime> },
}

fn format_since(since: Option<&NaiveTime>) -> String {
    since.map_or_else(
        || "unknown time".to_string(),
        |t| t.format("%H:%M:%S").to_string(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Open(NaiveDateTime),
}

/// Accumulates one group's sessions.
#[derive(Debug)]
struct Reconciler {
    state: SessionState,
    login: Option<NaiveDateTime>,
    logout: Option<NaiveDateTime>,
    worked: TimeDelta,
    anomalies: Vec<Anomaly>,
}

impl Reconciler {
    const fn new() -> Self {
        Self {
            state: SessionState::Idle,
            login: None,
            logout: None,
            worked: TimeDelta::zero(),
            anomalies: Vec::new(),
        }
    }

    fn step(&mut self, timed: &TimedEvent<'_>) {
        let time = || timed.event.time.clone();

        self.state = match (self.state, timed.event.direction, timed.timestamp) {
            (SessionState::Idle, Direction::In, Some(ts)) => {
                self.login.get_or_insert(ts);
                SessionState::Open(ts)
            }
            (SessionState::Idle, Direction::In, None) => {
                self.flag(Anomaly::MalformedTimestamp { time: time() });
                SessionState::Idle
            }
            (open @ SessionState::Open(_), Direction::In, _) => {
                self.flag(Anomaly::DuplicateIn { time: time() });
                open
            }
            (SessionState::Open(started), Direction::Out, Some(ts)) => {
                self.worked += ts - started;
                self.logout = Some(ts);
                SessionState::Idle
            }
            (state, Direction::Out, _) => {
                self.flag(Anomaly::UnexpectedOut { time: time() });
                state
            }
            (state, Direction::Unknown, _) => {
                tracing::trace!(time = %timed.event.time, "ignoring swipe without direction");
                state
            }
        };
    }

    fn flag(&mut self, anomaly: Anomaly) {
        tracing::trace!(%anomaly, "swipe anomaly");
        self.anomalies.push(anomaly);
    }

    fn finish(mut self, group: &EventGroup<'_>) -> DaySummary {
        if let SessionState::Open(started) = self.state {
            self.flag(Anomaly::MissingOut {
                since: Some(started.time()),
            });
        }

        let span = match (self.login, self.logout) {
            (Some(login), Some(logout)) => Some(logout - login),
            _ => None,
        };

        DaySummary {
            name: group.key.name.clone(),
            tag: group.key.tag.clone(),
            date: group.key.date.clone(),
            login_time: self.login.map(|t| t.time()),
            logout_time: self.logout.map(|t| t.time()),
            worked: self.worked,
            span,
            status: SummaryStatus::from_anomalies(self.anomalies),
            locations: None,
        }
    }
}

/// Reduces one group of time-sorted swipes to its day summary.
///
/// Pure and total: malformed input only ever produces anomalies on the row.
pub fn reconstruct(group: &EventGroup<'_>) -> DaySummary {
    let mut reconciler = Reconciler::new();
    for timed in &group.events {
        reconciler.step(timed);
    }
    reconciler.finish(group)
}
