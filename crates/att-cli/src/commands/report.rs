//! Report command: reconcile a swipe batch and print attendance rows.
//!
//! Swipes are loaded from a file (or stdin), narrowed to the query criteria,
//! reconciled, and printed either as a text table or as JSON records.

use std::fmt::Write as _;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use att_core::{
    Criterion, DaySummary, QueryCriteria, SummaryStatus, SwipeEvent, parse_events, reconcile,
};

use crate::Config;

/// What to report on and how to print it.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    /// Swipe batch location; `-` reads stdin. `None` uses the config default.
    pub events: Option<PathBuf>,
    pub criteria: QueryCriteria,
    pub json: bool,
    pub anomalies_only: bool,
}

/// Builds a criterion from repeated flag values. Values are joined so the
/// normalizer splits commas inside each flag as well.
pub fn criterion_from_flags(values: &[String]) -> Option<Criterion> {
    (!values.is_empty()).then(|| Criterion::One(values.join(",")))
}

pub fn run<W: Write>(writer: &mut W, config: &Config, request: &ReportRequest) -> Result<()> {
    let path = request.events.as_deref().unwrap_or(config.events_path.as_path());
    let events = load_events(path)?;

    let query = request.criteria.normalize();
    let matching: Vec<SwipeEvent> = events.into_iter().filter(|e| query.admits(e)).collect();
    tracing::debug!(matching = matching.len(), "selected swipes for report");

    let mut rows = reconcile(&matching, &request.criteria, &config.reconcile_options());
    if request.anomalies_only {
        rows.retain(|row| matches!(row.status, SummaryStatus::Anomalies(_)));
    }

    if request.json {
        let json = serde_json::to_string_pretty(&rows).context("failed to serialize report")?;
        writeln!(writer, "{json}")?;
    } else {
        write!(writer, "{}", render_table(&rows))?;
    }

    Ok(())
}

fn load_events(path: &Path) -> Result<Vec<SwipeEvent>> {
    let input = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read swipes from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read swipes from {}", path.display()))?
    };

    let events = parse_events(&input)
        .with_context(|| format!("failed to parse swipes from {}", path.display()))?;
    tracing::debug!(count = events.len(), path = %path.display(), "loaded swipes");
    Ok(events)
}

// ========== Table Rendering ==========

const HEADERS: [&str; 9] = [
    "NAME", "TAG", "DATE", "LOGIN", "LOGOUT", "WORKED", "BREAK", "TOTAL", "STATUS",
];

fn status_text(status: &SummaryStatus) -> String {
    match status {
        SummaryStatus::Anomalies(anomalies) => anomalies
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
        SummaryStatus::NoAnomalies => "ok".to_string(),
        SummaryStatus::NoData => "absent".to_string(),
    }
}

fn cell(value: String) -> String {
    if value.is_empty() { "-".to_string() } else { value }
}

fn row_cells(row: &DaySummary) -> [String; 9] {
    [
        cell(row.name.clone()),
        cell(row.tag.clone()),
        cell(row.date.clone()),
        cell(row.login_time_text()),
        cell(row.logout_time_text()),
        cell(row.effective_login_text()),
        cell(row.break_hours_text()),
        cell(row.total_login_text()),
        status_text(&row.status),
    ]
}

/// Renders rows as a left-aligned table. The last column is not padded.
pub fn render_table(rows: &[DaySummary]) -> String {
    let cells: Vec<[String; 9]> = rows.iter().map(row_cells).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    write_line(&mut out, &HEADERS.map(String::from), &widths);
    for row in &cells {
        write_line(&mut out, row, &widths);
    }
    out
}

fn write_line(out: &mut String, values: &[String; 9], widths: &[usize; 9]) {
    let last = values.len() - 1;
    for (i, (value, &width)) in values.iter().zip(widths).enumerate() {
        if i == last {
            out.push_str(value);
        } else {
            write!(out, "{value:<width$}  ").unwrap();
        }
    }
    out.push('\n');
}
