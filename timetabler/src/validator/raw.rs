/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Loosely typed candidate entries.
//!
//! A [`RawEntry`] is whatever JSON object an external producer handed us.
//! Nothing about it is trusted: fields may be missing, `null`, strings where
//! numbers are expected, or times in the wrong format.  [`RawEntry::parse`] is
//! the only way to turn one into a [`TimetableEntry`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Day, TimetableEntry, LAST_DAY};
use crate::slot::{format_minutes, to_minutes, Minute, TimeSlot, LAST_MINUTE};

pub const SECTION_ID: &str = "section_id";
pub const SUBJECT_ID: &str = "subject_id";
pub const TEACHER_ID: &str = "teacher_id";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const START_TIME: &str = "start_time";
pub const END_TIME: &str = "end_time";

// ── Error type ────────────────────────────────────────────────────────────────

/// Why a raw candidate could not be read as a timetable entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field is absent or `null`.
    #[error("field '{field}' is missing")]
    Missing { field: &'static str },

    /// The field is present but its value is unusable.
    #[error("field '{field}' is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl FieldError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        FieldError::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing { field } | FieldError::Invalid { field, .. } => *field,
        }
    }
}

// ── RawEntry ──────────────────────────────────────────────────────────────────

/// An untrusted candidate: a JSON object with arbitrary content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEntry(Map<String, Value>);

impl RawEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value.  Only objects qualify.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read every required field and build a [`TimetableEntry`].
    ///
    /// Ids accept JSON integers or integer strings; `day_of_week` must be in
    /// `0..=6`; times accept `HH:MM`, `HH:MM:SS` or integer minutes, and the
    /// interval must be non-empty.
    pub fn parse(&self) -> Result<TimetableEntry, FieldError> {
        self.parse_with_slot().map(|(entry, _)| entry)
    }

    /// [`parse`](Self::parse), also returning the checked interval.
    pub fn parse_with_slot(&self) -> Result<(TimetableEntry, TimeSlot), FieldError> {
        let teacher_id = self.id_field(TEACHER_ID)?;
        let section_id = self.id_field(SECTION_ID)?;
        let subject_id = self.id_field(SUBJECT_ID)?;
        let day_of_week = self.day_field()?;
        let start = self.time_field(START_TIME)?;
        let end = self.time_field(END_TIME)?;

        let slot = TimeSlot::try_new(start, end)
            .map_err(|e| FieldError::invalid(END_TIME, e.to_string()))?;

        let entry = TimetableEntry::new(section_id, subject_id, teacher_id, day_of_week, slot);
        Ok((entry, slot))
    }

    // ── Field readers ─────────────────────────────────────────────────────────

    fn field(&self, name: &'static str) -> Result<&Value, FieldError> {
        match self.0.get(name) {
            None | Some(Value::Null) => Err(FieldError::Missing { field: name }),
            Some(value) => Ok(value),
        }
    }

    fn id_field(&self, name: &'static str) -> Result<u32, FieldError> {
        match self.field(name)? {
            Value::Number(n) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| FieldError::invalid(name, format!("{n} is not a valid id"))),
            Value::String(s) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| FieldError::invalid(name, format!("'{s}' is not a valid id"))),
            other => Err(FieldError::invalid(name, format!("unexpected {other}"))),
        }
    }

    fn day_field(&self) -> Result<Day, FieldError> {
        let day = self.id_field(DAY_OF_WEEK)?;
        Day::try_from(day)
            .ok()
            .filter(|&d| d <= LAST_DAY)
            .ok_or_else(|| FieldError::invalid(DAY_OF_WEEK, format!("{day} is not in 0..=6")))
    }

    fn time_field(&self, name: &'static str) -> Result<Minute, FieldError> {
        match self.field(name)? {
            Value::String(s) => to_minutes(s).map_err(|e| FieldError::invalid(name, e.to_string())),
            Value::Number(n) => n
                .as_u64()
                .and_then(|v| Minute::try_from(v).ok())
                .filter(|&m| m <= LAST_MINUTE)
                .ok_or_else(|| FieldError::invalid(name, format!("{n} is not a minute of day"))),
            other => Err(FieldError::invalid(name, format!("unexpected {other}"))),
        }
    }
}

impl From<Map<String, Value>> for RawEntry {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<&TimetableEntry> for RawEntry {
    fn from(entry: &TimetableEntry) -> Self {
        RawEntry::new()
            .with(SECTION_ID, entry.section_id)
            .with(SUBJECT_ID, entry.subject_id)
            .with(TEACHER_ID, entry.teacher_id)
            .with(DAY_OF_WEEK, entry.day_of_week)
            .with(START_TIME, format_minutes(entry.start))
            .with(END_TIME, format_minutes(entry.end))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
