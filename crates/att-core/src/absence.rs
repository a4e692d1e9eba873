//! Placeholder rows for requested identities that have no swipes.

use std::collections::HashSet;

use crate::query::NormalizedQuery;
use crate::summary::DaySummary;

/// How requested names and tags combine into identities.
///
/// Names and tags of equal length pair up by position; otherwise whichever
/// list is present is broadcast against the other's first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Requested<'q> {
    Paired(Vec<(&'q str, &'q str)>),
    ByName { names: &'q [String], tag: &'q str },
    ByTag { tags: &'q [String], name: &'q str },
    Nobody,
}

impl<'q> Requested<'q> {
    fn from_query(query: &'q NormalizedQuery) -> Self {
        let first = |values: &'q [String]| values.first().map_or("", String::as_str);

        if !query.names.is_empty() && query.names.len() == query.tags.len() {
            Self::Paired(
                query
                    .names
                    .iter()
                    .zip(&query.tags)
                    .map(|(n, t)| (n.as_str(), t.as_str()))
                    .collect(),
            )
        } else if !query.names.is_empty() {
            Self::ByName {
                names: &query.names,
                tag: first(&query.tags),
            }
        } else if !query.tags.is_empty() {
            Self::ByTag {
                tags: &query.tags,
                name: first(&query.names),
            }
        } else {
            Self::Nobody
        }
    }
}

/// Rows for a batch with no swipes at all.
///
/// Every row carries the query date verbatim and echoes the full requested
/// location list. With no names or tags requested, a single blank row is
/// produced.
pub fn synthesize_absent(query: &NormalizedQuery) -> Vec<DaySummary> {
    let absent = |name: &str, tag: &str| {
        DaySummary::absent(name, tag, &query.date, Some(query.locations.clone()))
    };

    let rows: Vec<DaySummary> = match Requested::from_query(query) {
        Requested::Paired(pairs) => pairs.into_iter().map(|(n, t)| absent(n, t)).collect(),
        Requested::ByName { names, tag } => names.iter().map(|n| absent(n, tag)).collect(),
        Requested::ByTag { tags, name } => tags.iter().map(|t| absent(name, t)).collect(),
        Requested::Nobody => vec![absent("", "")],
    };

    tracing::debug!(rows = rows.len(), "synthesized rows for empty batch");
    rows
}

/// Appends a row for every requested identity missing from `summaries`.
///
/// Presence is judged on the rows already produced: by (name, tag) when
/// names and tags pair up, otherwise by name alone or tag alone. Existing
/// rows are left untouched; new rows go at the end.
pub fn append_missing(summaries: &mut Vec<DaySummary>, query: &NormalizedQuery) {
    let present_pairs: HashSet<(&str, &str)> = summaries
        .iter()
        .map(|s| (s.name.as_str(), s.tag.as_str()))
        .collect();
    let present_names: HashSet<&str> = present_pairs.iter().map(|(n, _)| *n).collect();
    let present_tags: HashSet<&str> = present_pairs.iter().map(|(_, t)| *t).collect();

    let absent = |name: &str, tag: &str| DaySummary::absent(name, tag, &query.date, None);

    let missing: Vec<DaySummary> = match Requested::from_query(query) {
        Requested::Paired(pairs) => pairs
            .into_iter()
            .filter(|&(n, t)| !present_pairs.contains(&(n, t)))
            .map(|(n, t)| absent(n, t))
            .collect(),
        Requested::ByName { names, tag } => names
            .iter()
            .filter(|n| !present_names.contains(n.as_str()))
            .map(|n| absent(n, tag))
            .collect(),
        Requested::ByTag { tags, name } => tags
            .iter()
            .filter(|t| !present_tags.contains(t.as_str()))
            .map(|t| absent(name, t))
            .collect(),
        Requested::Nobody => Vec::new(),
    };

    tracing::debug!(missing = missing.len(), "appending rows for absent identities");
    summaries.extend(missing);
}
