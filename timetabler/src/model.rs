/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core timetable data structures.
//!
//! The types model the two ends of the scheduling pipeline:
//!
//! ```text
//! course file ──► Subject / SectionId / TeacherMap ──(scheduler)──► TimetableEntry ──► caller
//!                                                                       ▲
//! generator text ──► RawEntry ─────────────────────(validator)──────────┘
//! ```
//!
//! `TimetableEntry` is the atomic unit of output.  Times are minutes in memory
//! and `HH:MM` strings on the wire (see [`crate::slot::clock::hhmm`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::slot::{clock::hhmm, Minute, TimeSlot};

// ── Identifiers ───────────────────────────────────────────────────────────────

pub type CourseId = u32;
pub type SectionId = u32;
pub type SubjectId = u32;
pub type TeacherId = u32;

/// Day of week, `0` = Monday … `6` = Sunday.
pub type Day = u8;

/// Days the scheduler places sessions on (Monday–Friday).
pub const SCHOOL_DAYS: [Day; 5] = [0, 1, 2, 3, 4];

/// Largest day value the validator accepts (Sunday).
pub const LAST_DAY: Day = 6;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// English name for `day`, or `None` outside `0..=6`.
pub fn day_name(day: Day) -> Option<&'static str> {
    DAY_NAMES.get(usize::from(day)).copied()
}

/// Default session length for a subject whose file entry omits it.
pub const DEFAULT_DURATION_MINUTES: Minute = 60;

// ── Subject ───────────────────────────────────────────────────────────────────

/// A subject taught to every section of a course.
///
/// `duration_minutes` is only meaningful for labs: lectures always occupy
/// exactly one grid slot, labs occupy one contiguous block of this length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub is_lab: bool,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: Minute,
}

fn default_duration_minutes() -> Minute {
    DEFAULT_DURATION_MINUTES
}

impl Subject {
    /// A lecture subject (grid-slot sessions).
    pub fn lecture(id: SubjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_lab: false,
            duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }

    /// A lab subject with a `duration_minutes` block.
    pub fn lab(id: SubjectId, name: impl Into<String>, duration_minutes: Minute) -> Self {
        Self {
            id,
            name: name.into(),
            is_lab: true,
            duration_minutes,
        }
    }
}

// ── Section ───────────────────────────────────────────────────────────────────

/// One class group of a course; the unit that attends sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub course_id: CourseId,
    pub name: String,
}

// ── Teacher eligibility ───────────────────────────────────────────────────────

/// Subject → teachers authorised to teach it, in preference-free order.
///
/// `BTreeMap` so iteration (and therefore logging) is deterministic.
pub type TeacherMap = BTreeMap<SubjectId, Vec<TeacherId>>;

// ── TimetableEntry ────────────────────────────────────────────────────────────

/// One weekly session: who teaches what to which section, when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub section_id: SectionId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub day_of_week: Day,
    #[serde(rename = "start_time", with = "hhmm")]
    pub start: Minute,
    #[serde(rename = "end_time", with = "hhmm")]
    pub end: Minute,
}

impl TimetableEntry {
    pub fn new(
        section_id: SectionId,
        subject_id: SubjectId,
        teacher_id: TeacherId,
        day_of_week: Day,
        slot: TimeSlot,
    ) -> Self {
        Self {
            section_id,
            subject_id,
            teacher_id,
            day_of_week,
            start: slot.start(),
            end: slot.end(),
        }
    }

    /// The session interval.  `None` if the entry was built by hand with
    /// `start >= end`.
    pub fn slot(&self) -> Option<TimeSlot> {
        TimeSlot::try_new(self.start, self.end).ok()
    }

    /// Display order: day, then start time, then section.
    pub fn display_key(&self) -> (Day, Minute, SectionId) {
        (self.day_of_week, self.start, self.section_id)
    }
}

impl std::fmt::Display for TimetableEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{} section={} subject={} teacher={}",
            day_name(self.day_of_week).unwrap_or("?"),
            crate::slot::format_minutes(self.start),
            crate::slot::format_minutes(self.end),
            self.section_id,
            self.subject_id,
            self.teacher_id,
        )
    }
}

/// Sort entries into timetable reading order (day, start, section).
pub fn sort_for_display(entries: &mut [TimetableEntry]) {
    entries.sort_by_key(TimetableEntry::display_key);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: Day, start: Minute, end: Minute, section: SectionId) -> TimetableEntry {
        TimetableEntry {
            section_id: section,
            subject_id: 10,
            teacher_id: 100,
            day_of_week: day,
            start,
            end,
        }
    }

    // ── Days ──────────────────────────────────────────────────────────────────

    #[test]
    fn day_names_cover_the_week() {
        assert_eq!(day_name(0), Some("Monday"));
        assert_eq!(day_name(4), Some("Friday"));
        assert_eq!(day_name(LAST_DAY), Some("Sunday"));
        assert_eq!(day_name(7), None);
    }

    #[test]
    fn school_days_are_weekdays_only() {
        assert!(SCHOOL_DAYS.iter().all(|&d| d <= 4));
        assert_eq!(SCHOOL_DAYS.len(), 5);
    }

    // ── Subject ───────────────────────────────────────────────────────────────

    #[test]
    fn subject_defaults_when_deserialising() {
        let s: Subject = serde_json::from_str(r#"{"id": 3, "name": "Maths"}"#).unwrap();
        assert_eq!(s, Subject::lecture(3, "Maths"));
        assert_eq!(s.duration_minutes, 60);
        assert!(!s.is_lab);
    }

    #[test]
    fn lab_constructor_sets_flag_and_duration() {
        let s = Subject::lab(4, "Chemistry Lab", 100);
        assert!(s.is_lab);
        assert_eq!(s.duration_minutes, 100);
    }

    // ── TimetableEntry ────────────────────────────────────────────────────────

    #[test]
    fn entry_serialises_times_as_hh_mm() {
        let e = entry(2, 550, 600, 1);
        let json = serde_json::to_value(e).unwrap();
        assert_eq!(json["start_time"], "09:10");
        assert_eq!(json["end_time"], "10:00");
        assert_eq!(json["day_of_week"], 2);
    }

    #[test]
    fn entry_json_round_trips() {
        let e = entry(4, 810, 870, 7);
        let back: TimetableEntry =
            serde_json::from_str(&serde_json::to_string(&e).unwrap()).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn entry_slot_rejects_reversed_interval() {
        assert!(entry(0, 600, 550, 1).slot().is_none());
        assert_eq!(entry(0, 550, 600, 1).slot().unwrap().duration(), 50);
    }

    #[test]
    fn display_mentions_day_and_times() {
        let text = entry(1, 550, 600, 3).to_string();
        assert!(text.starts_with("Tuesday 09:10-10:00"), "{text}");
        assert!(text.contains("section=3"));
    }

    #[test]
    fn sort_for_display_orders_by_day_then_start() {
        let mut entries = vec![
            entry(1, 600, 650, 1),
            entry(0, 810, 870, 2),
            entry(0, 550, 600, 2),
            entry(0, 550, 600, 1),
        ];
        sort_for_display(&mut entries);
        let keys: Vec<_> = entries.iter().map(|e| e.display_key()).collect();
        assert_eq!(
            keys,
            vec![(0, 550, 1), (0, 550, 2), (0, 810, 2), (1, 600, 1)]
        );
    }
}
