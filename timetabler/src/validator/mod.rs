/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Entry validator: filters untrusted candidate entries down to a
//! conflict-free timetable.
//!
//! # Algorithm
//! One forward pass, no backtracking.  For each candidate in input order:
//!
//! 1. Read the fields ([`RawEntry::parse`]); skip on any missing or
//!    malformed value.
//! 2. Skip if the interval intersects lunch.
//! 3. With a [`Catalog`]: skip unknown subjects, ineligible teachers,
//!    off-grid lectures and mis-shaped labs.
//! 4. Skip if the teacher already holds an overlapping interval that day.
//! 5. Skip if the section already holds an overlapping interval that day.
//! 6. Otherwise accept and commit the interval for both.
//!
//! Earlier candidates therefore win over later conflicting ones.  Nothing is
//! ever raised for a bad candidate; [`EntryValidator::validate_with_report`]
//! exposes the reasons for callers that want them.
//!
//! The accepted list is a subsequence of the input, so
//! `validate(x).len() <= x.len()`, and feeding it back in accepts every entry
//! again unchanged.

pub mod raw;

pub use raw::{FieldError, RawEntry};

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::model::{Subject, SubjectId, TeacherId, TeacherMap, TimetableEntry};
use crate::occupancy::{Clash, ScheduleIndex};
use crate::slot::{is_in_teaching_band, Minute, TimeSlot};

// ── Rejection ─────────────────────────────────────────────────────────────────

/// Why a candidate was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A field was missing or unusable.
    Malformed(FieldError),
    /// The interval intersects the lunch window.
    Lunch,
    /// The teacher already teaches at an overlapping time that day.
    TeacherClash,
    /// The section already attends an overlapping session that day.
    SectionClash,
    /// Catalog check: the subject id is not in the catalog.
    UnknownSubject { subject_id: SubjectId },
    /// Catalog check: the teacher is not eligible for the subject.
    IneligibleTeacher {
        subject_id: SubjectId,
        teacher_id: TeacherId,
    },
    /// Catalog check: a lecture that is not exactly one grid slot.
    OffGrid,
    /// Catalog check: a lab with the wrong length or outside the teaching
    /// bands.
    LabShape { expected: Minute, actual: Minute },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Malformed(e) => write!(f, "malformed: {e}"),
            Rejection::Lunch => write!(f, "intersects lunch 12:30-13:30"),
            Rejection::TeacherClash => write!(f, "teacher already busy"),
            Rejection::SectionClash => write!(f, "section already busy"),
            Rejection::UnknownSubject { subject_id } => {
                write!(f, "subject {subject_id} is not in the catalog")
            }
            Rejection::IneligibleTeacher {
                subject_id,
                teacher_id,
            } => write!(f, "teacher {teacher_id} may not teach subject {subject_id}"),
            Rejection::OffGrid => write!(f, "lecture is not on a grid slot"),
            Rejection::LabShape { expected, actual } => write!(
                f,
                "lab block is {actual} min (expected {expected} min within a half-day)"
            ),
        }
    }
}

impl From<Clash> for Rejection {
    fn from(clash: Clash) -> Self {
        match clash {
            Clash::Teacher => Rejection::TeacherClash,
            Clash::Section => Rejection::SectionClash,
        }
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Subjects and teacher eligibility used for conformance checks.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    subjects: BTreeMap<SubjectId, Subject>,
    teacher_map: TeacherMap,
}

impl Catalog {
    pub fn new(subjects: impl IntoIterator<Item = Subject>, teacher_map: TeacherMap) -> Self {
        Self {
            subjects: subjects.into_iter().map(|s| (s.id, s)).collect(),
            teacher_map,
        }
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.get(&id)
    }

    pub fn is_eligible(&self, subject_id: SubjectId, teacher_id: TeacherId) -> bool {
        self.teacher_map
            .get(&subject_id)
            .is_some_and(|teachers| teachers.contains(&teacher_id))
    }

    /// Subject, teacher and shape checks for one parsed entry.
    pub fn check(&self, entry: &TimetableEntry, slot: TimeSlot) -> Result<(), Rejection> {
        let subject = self
            .subject(entry.subject_id)
            .ok_or(Rejection::UnknownSubject {
                subject_id: entry.subject_id,
            })?;

        if !self.is_eligible(entry.subject_id, entry.teacher_id) {
            return Err(Rejection::IneligibleTeacher {
                subject_id: entry.subject_id,
                teacher_id: entry.teacher_id,
            });
        }

        if subject.is_lab {
            if slot.duration() != subject.duration_minutes || !is_in_teaching_band(slot) {
                return Err(Rejection::LabShape {
                    expected: subject.duration_minutes,
                    actual: slot.duration(),
                });
            }
        } else if !slot.is_grid_slot() {
            return Err(Rejection::OffGrid);
        }

        Ok(())
    }
}

// ── ValidationReport ──────────────────────────────────────────────────────────

/// Accepted entries plus the reason every other candidate was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Survivors, in input order.
    pub accepted: Vec<TimetableEntry>,
    /// `(input index, reason)` for every dropped candidate, in input order.
    pub rejected: Vec<(usize, Rejection)>,
}

impl ValidationReport {
    pub fn dropped(&self) -> usize {
        self.rejected.len()
    }
}

// ── EntryValidator ────────────────────────────────────────────────────────────

/// Single-pass candidate filter.
///
/// Holds only the optional catalog; the schedule index lives inside each
/// call.
#[derive(Debug, Clone, Default)]
pub struct EntryValidator {
    catalog: Option<Catalog>,
}

impl EntryValidator {
    /// Validator applying the overlap and lunch rules only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator that also enforces subject, eligibility and slot-shape rules.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    /// Conflict-free subsequence of `candidates`.
    pub fn validate(&self, candidates: &[RawEntry]) -> Vec<TimetableEntry> {
        self.validate_with_report(candidates).accepted
    }

    /// Same as [`validate`](Self::validate), keeping the rejection reasons.
    pub fn validate_with_report(&self, candidates: &[RawEntry]) -> ValidationReport {
        let mut index = ScheduleIndex::new();
        let mut report = ValidationReport {
            accepted: Vec::with_capacity(candidates.len()),
            rejected: Vec::new(),
        };

        for (i, candidate) in candidates.iter().enumerate() {
            match self.admit(candidate, &index) {
                Ok((entry, slot)) => {
                    index.commit(entry.teacher_id, entry.section_id, entry.day_of_week, slot);
                    report.accepted.push(entry);
                }
                Err(reason) => {
                    match &reason {
                        Rejection::Malformed(e) => {
                            debug!(index = i, field = e.field(), reason = %reason, "candidate dropped")
                        }
                        _ => debug!(index = i, reason = %reason, "candidate dropped"),
                    }
                    report.rejected.push((i, reason));
                }
            }
        }

        info!(
            candidates = candidates.len(),
            accepted = report.accepted.len(),
            dropped = report.dropped(),
            committed = index.len(),
            "validation complete"
        );

        report
    }

    /// Every check for one candidate against the entries accepted so far.
    fn admit(
        &self,
        candidate: &RawEntry,
        index: &ScheduleIndex,
    ) -> Result<(TimetableEntry, TimeSlot), Rejection> {
        let (entry, slot) = candidate.parse_with_slot().map_err(Rejection::Malformed)?;

        if slot.intersects_lunch() {
            return Err(Rejection::Lunch);
        }

        if let Some(catalog) = &self.catalog {
            catalog.check(&entry, slot)?;
        }

        index.check(entry.teacher_id, entry.section_id, entry.day_of_week, slot)?;

        Ok((entry, slot))
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Validate with the overlap and lunch rules only.
pub fn validate(candidates: &[RawEntry]) -> Vec<TimetableEntry> {
    EntryValidator::new().validate(candidates)
}

/// Drop candidates whose every field equals an earlier candidate.
///
/// First occurrences keep their relative order.  Equality is exact JSON
/// equality: `1` and `"1"` are different values.
pub fn dedup_exact(candidates: Vec<RawEntry>) -> Vec<RawEntry> {
    let mut unique: Vec<RawEntry> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}

// ── Tests ─────────────────────────────────────────────────────────────────────
