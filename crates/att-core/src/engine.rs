//! Top-level reconciliation of a swipe batch against query criteria.

use rayon::prelude::*;

use crate::absence::{append_missing, synthesize_absent};
use crate::event::SwipeEvent;
use crate::group::group_events;
use crate::query::QueryCriteria;
use crate::session::reconstruct;
use crate::summary::DaySummary;

/// Tuning for [`reconcile`].
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Minimum number of groups before groups are reconstructed on the rayon
    /// pool. Default: 64.
    pub parallel_threshold: usize,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
        }
    }
}

/// Reconciles a batch of swipes into per-day summaries.
///
/// Rows for identity-days with swipes come first, in the order each
/// (name, tag, date) was first seen; rows for requested identities with no
/// swipes follow. An empty batch is answered entirely from the criteria.
///
/// Never fails. Identical input always produces identical output.
pub fn reconcile(
    events: &[SwipeEvent],
    criteria: &QueryCriteria,
    options: &ReconcileOptions,
) -> Vec<DaySummary> {
    let query = criteria.normalize();
    tracing::debug!(?query, event_count = events.len(), "reconciling swipes");

    if events.is_empty() {
        return synthesize_absent(&query);
    }

    let groups = group_events(events);
    let mut summaries: Vec<DaySummary> = if groups.len() >= options.parallel_threshold {
        tracing::debug!(group_count = groups.len(), "reconstructing groups in parallel");
        // Indexed collect keeps group order regardless of completion order.
        groups.par_iter().map(reconstruct).collect()
    } else {
        groups.iter().map(reconstruct).collect()
    };

    append_missing(&mut summaries, &query);
    summaries
}
