//! Reading swipe batches from JSON or JSON Lines text.

use thiserror::Error;

use crate::event::SwipeEvent;

#[derive(Debug, Error)]
pub enum EventParseError {
    #[error("invalid event array: {0}")]
    Array(#[source] serde_json::Error),
    #[error("invalid event on line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses a batch given either as a JSON array or as one JSON object per
/// line. Blank lines are skipped.
pub fn parse_events(input: &str) -> Result<Vec<SwipeEvent>, EventParseError> {
    if input.trim_start().starts_with('[') {
        return serde_json::from_str(input).map_err(EventParseError::Array);
    }

    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| EventParseError::Line {
                line: idx + 1,
                source,
            })
        })
        .collect()
}
