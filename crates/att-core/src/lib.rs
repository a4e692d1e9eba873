//! Attendance reconciliation engine.
//!
//! This crate turns a batch of badge swipes into per-day attendance rows:
//! - Grouping: swipes are partitioned by (name, tag, date)
//! - Sessions: each group is walked through an IN/OUT state machine
//! - Absence: requested identities with no swipes get placeholder rows

mod absence;
pub mod batch;
pub mod duration;
mod engine;
pub mod event;
pub mod group;
pub mod query;
pub mod session;
pub mod summary;

pub use absence::{append_missing, synthesize_absent};
pub use batch::{EventParseError, parse_events};
pub use engine::{ReconcileOptions, reconcile};
pub use event::{Direction, IdentityKey, SwipeEvent};
pub use query::{Criterion, NormalizedQuery, QueryCriteria};
pub use session::{Anomaly, reconstruct};
pub use summary::{ABSENT, DaySummary, SummaryStatus};
