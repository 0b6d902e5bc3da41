/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Where validator input comes from.
//!
//! The validator only ever sees `&[RawEntry]`.  A [`CandidateSource`] is
//! anything that can hand it such a list: a timetable the scheduler already
//! built, a closure, or the free-form text an external generator produced.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::model::TimetableEntry;
use crate::validator::{dedup_exact, RawEntry};

/// Keys under which a generator may wrap its entry list.
const WRAPPER_KEYS: [&str; 5] = ["timetable", "result", "data", "output", "items"];

// ── CandidateSource ───────────────────────────────────────────────────────────

/// Producer of untrusted candidate entries.
pub trait CandidateSource {
    fn candidates(&mut self) -> Vec<RawEntry>;
}

impl<F> CandidateSource for F
where
    F: FnMut() -> Vec<RawEntry>,
{
    fn candidates(&mut self) -> Vec<RawEntry> {
        self()
    }
}

/// Candidates taken from an already built timetable.
#[derive(Debug, Clone)]
pub struct ScheduledCandidates {
    entries: Vec<TimetableEntry>,
}

impl ScheduledCandidates {
    pub fn new(entries: Vec<TimetableEntry>) -> Self {
        Self { entries }
    }
}

impl CandidateSource for ScheduledCandidates {
    fn candidates(&mut self) -> Vec<RawEntry> {
        self.entries.iter().map(RawEntry::from).collect()
    }
}

/// Candidates parsed from generator output text.
///
/// Unparseable text yields no candidates.
#[derive(Debug, Clone)]
pub struct TextCandidates {
    text: String,
}

impl TextCandidates {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl CandidateSource for TextCandidates {
    fn candidates(&mut self) -> Vec<RawEntry> {
        parse_generated_text(&self.text).unwrap_or_else(|| {
            warn!(bytes = self.text.len(), "generator text held no usable entries");
            Vec::new()
        })
    }
}

// ── Text parsing ──────────────────────────────────────────────────────────────

/// Extract candidate entries from generator text.
///
/// Accepts a bare JSON array, an object wrapping the array under one of
/// `timetable`, `result`, `data`, `output` or `items`, or a single object.
/// Anything that is not JSON is read as CSV with a header row.  A
/// surrounding markdown code fence is stripped first.  Non-object array
/// elements are dropped and exact duplicates removed.
///
/// Returns `None` for empty text, text that is neither JSON nor CSV, or when
/// nothing is left.
pub fn parse_generated_text(text: &str) -> Option<Vec<RawEntry>> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return None;
    }

    let items = match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items,
        Ok(Value::Object(mut map)) => {
            let key = WRAPPER_KEYS
                .into_iter()
                .find(|&key| matches!(map.get(key), Some(Value::Array(_))));
            match key.and_then(|key| map.remove(key)) {
                Some(Value::Array(items)) => items,
                _ => vec![Value::Object(map)],
            }
        }
        Ok(_) => csv_records(body)?,
        Err(e) => {
            debug!(error = %e, "generator text is not JSON, trying CSV");
            csv_records(body)?
        }
    };

    let entries = dedup_exact(items.into_iter().filter_map(RawEntry::from_value).collect());
    (!entries.is_empty()).then_some(entries)
}

/// One JSON object per CSV record, keyed by the header row.
///
/// `None` if the CSV is unreadable, e.g. rows of differing width.
fn csv_records(body: &str) -> Option<Vec<Value>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            debug!(error = %e, "generator text is not CSV");
            return None;
        }
    };

    let mut items = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "generator text is not CSV");
                return None;
            }
        };
        let object: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(key, cell)| (key.to_string(), csv_cell(cell)))
            .collect();
        items.push(Value::Object(object));
    }
    Some(items)
}

/// Integers become numbers, empty cells `null`, everything else a string.
fn csv_cell(cell: &str) -> Value {
    if cell.is_empty() {
        Value::Null
    } else if let Ok(n) = cell.parse::<i64>() {
        Value::from(n)
    } else {
        Value::String(cell.to_string())
    }
}

/// Drop a leading markdown fence (optionally tagged `json` or `csv`) and a
/// trailing one.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("csv"))
        .unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
