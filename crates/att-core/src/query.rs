//! Query criteria and their normalization into ordered value lists.

use serde::{Deserialize, Serialize};

use crate::event::SwipeEvent;

/// A list-valued criterion as supplied by a caller: one string, possibly
/// comma-separated, or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Criterion {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for Criterion {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for Criterion {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for Criterion {
    fn from(values: Vec<S>) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }
}

/// Normalizes a criterion into trimmed, non-empty values in supplied order.
///
/// A single string is split on commas; list elements are taken as given.
pub fn normalize(criterion: Option<&Criterion>) -> Vec<String> {
    let keep = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    match criterion {
        None => Vec::new(),
        Some(Criterion::One(s)) => s.split(',').filter_map(keep).collect(),
        Some(Criterion::Many(values)) => values.iter().filter_map(|s| keep(s)).collect(),
    }
}

/// Which identities, day and locations a caller asked about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Criterion>,
    #[serde(default, alias = "rfid", skip_serializing_if = "Option::is_none")]
    pub tag: Option<Criterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, alias = "log_cabin", skip_serializing_if = "Option::is_none")]
    pub location: Option<Criterion>,
}

impl QueryCriteria {
    pub fn normalize(&self) -> NormalizedQuery {
        NormalizedQuery {
            names: normalize(self.name.as_ref()),
            tags: normalize(self.tag.as_ref()),
            date: self.date.clone().unwrap_or_default(),
            locations: normalize(self.location.as_ref()),
        }
    }
}

/// Criteria reduced to plain ordered lists. `date` is empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub names: Vec<String>,
    pub tags: Vec<String>,
    pub date: String,
    pub locations: Vec<String>,
}

impl NormalizedQuery {
    /// Whether an event falls inside these criteria.
    ///
    /// Every criterion that is set must match; unset criteria match anything.
    /// An event without a location never passes a location filter.
    pub fn admits(&self, event: &SwipeEvent) -> bool {
        if !self.names.is_empty() && !self.names.contains(&event.name) {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.contains(&event.tag) {
            return false;
        }
        if !self.date.is_empty() && self.date != event.date {
            return false;
        }
        if !self.locations.is_empty() {
            return event
                .location
                .as_ref()
                .is_some_and(|loc| self.locations.contains(loc));
        }
        true
    }
}
