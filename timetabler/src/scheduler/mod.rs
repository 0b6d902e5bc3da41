/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Weekly timetable scheduler.
//!
//! [`Scheduler`] places one weekly session for every `(section, subject)`
//! pair using a randomized greedy search, and returns the committed
//! [`TimetableEntry`] list.
//!
//! # Algorithm
//! Sections in input order, subjects in input order.  For each pair:
//!
//! 1. Shuffle Monday–Friday and try the days in that order.
//! 2. Collect every `(window, teacher)` candidate for the day whose window
//!    overlaps nothing the teacher or the section already holds that day.
//!    Lectures draw windows from the fixed grid; labs from
//!    [`lab_windows`] for the subject's duration.
//! 3. Pick one candidate uniformly at random, commit it to both indexes and
//!    move on to the next subject.  A day with no candidate falls through to
//!    the next day.
//!
//! A pair that fits on no day is logged and left out.  The search never
//! backtracks, so the result is best effort: always conflict-free, not always
//! complete, and not balanced.
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | Randomness | Injected `R: Rng`; [`Scheduler::seeded`] pins a seed for tests |
//! | State | All per-call state (the [`ScheduleIndex`]) is local to `generate()` |
//! | Errors | Only precondition failures are `Err`; placement misses are `warn!` |
//!
//! # Example
//! ```rust
//! use timetabler::model::{Subject, TeacherMap};
//! use timetabler::scheduler::Scheduler;
//!
//! let subjects = vec![Subject::lecture(10, "Mathematics")];
//! let teachers = TeacherMap::from([(10, vec![100])]);
//!
//! let entries = Scheduler::seeded(7).generate(&[1], &subjects, &teachers).unwrap();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].teacher_id, 100);
//! ```

pub mod error;

pub use error::SchedulerError;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::model::{Day, SectionId, Subject, TeacherId, TeacherMap, TimetableEntry, SCHOOL_DAYS};
use crate::occupancy::ScheduleIndex;
use crate::slot::{fixed_lecture_slots, lab_windows, TimeSlot};

// ── Internal state types ──────────────────────────────────────────────────────

/// A subject resolved against the teacher map, with its candidate windows
/// precomputed once per call.
struct SubjectPlan<'a> {
    subject: &'a Subject,
    teachers: &'a [TeacherId],
    windows: Vec<TimeSlot>,
}

/// One placement option for a day.
type Candidate = (TimeSlot, TeacherId);

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Randomized greedy timetable builder.
///
/// Owns its random source and nothing else; every `generate()` call builds
/// and drops its own schedule index, so consecutive calls are independent
/// apart from advancing the RNG.
pub struct Scheduler<R = StdRng> {
    rng: R,
}

impl Scheduler<StdRng> {
    /// Scheduler with a fixed seed.  Same seed + same input ⇒ same output.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Scheduler seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Scheduler<R> {
    /// Create a scheduler drawing tie-breaks from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Build a weekly timetable for `sections × subjects`.
    ///
    /// # Errors
    /// * [`SchedulerError::NoSections`] if `sections` is empty.
    /// * [`SchedulerError::NoSubjects`] if `subjects` is empty.
    /// * [`SchedulerError::NoTeacherAssigned`] if any subject has no eligible
    ///   teacher in `teacher_map`.
    ///
    /// Preconditions are checked before anything is placed.  On success the
    /// returned list may still be shorter than `sections.len() *
    /// subjects.len()`, or even empty; that is a valid outcome.
    pub fn generate(
        &mut self,
        sections: &[SectionId],
        subjects: &[Subject],
        teacher_map: &TeacherMap,
    ) -> Result<Vec<TimetableEntry>, SchedulerError> {
        // ── Preconditions ─────────────────────────────────────────────────────
        if sections.is_empty() {
            return Err(SchedulerError::NoSections);
        }
        if subjects.is_empty() {
            return Err(SchedulerError::NoSubjects);
        }
        let plans = Self::build_plans(subjects, teacher_map)?;

        info!(
            section_count = sections.len(),
            subject_count = subjects.len(),
            "=== Scheduler::generate() ==="
        );

        // ── Per-call state ────────────────────────────────────────────────────
        let mut index = ScheduleIndex::new();
        let mut entries = Vec::with_capacity(sections.len() * plans.len());
        let mut unplaced = 0usize;

        for &section in sections {
            for plan in &plans {
                match self.place(section, plan, &mut index) {
                    Some(entry) => {
                        debug!(
                            section = section,
                            subject = %plan.subject.name,
                            teacher = entry.teacher_id,
                            day     = entry.day_of_week,
                            start   = entry.start,
                            end     = entry.end,
                            "✓ placed"
                        );
                        entries.push(entry);
                    }
                    None => {
                        unplaced += 1;
                        warn!(
                            section = section,
                            subject = %plan.subject.name,
                            is_lab  = plan.subject.is_lab,
                            "✗ no free day/slot/teacher, pair left unscheduled"
                        );
                    }
                }
            }
        }

        debug_assert_eq!(index.len(), entries.len());
        info!(
            placed = entries.len(),
            unplaced = unplaced,
            "=== Scheduling complete ==="
        );

        Ok(entries)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Placement
    // ─────────────────────────────────────────────────────────────────────────

    /// Try the shuffled weekdays in turn; commit the first day that has a
    /// candidate.
    fn place(
        &mut self,
        section: SectionId,
        plan: &SubjectPlan<'_>,
        index: &mut ScheduleIndex,
    ) -> Option<TimetableEntry> {
        let mut days = SCHOOL_DAYS;
        days.shuffle(&mut self.rng);

        for day in days {
            let candidates = Self::day_candidates(section, day, plan, index);
            let Some(&(slot, teacher)) = candidates.choose(&mut self.rng) else {
                continue;
            };

            index.commit(teacher, section, day, slot);
            return Some(TimetableEntry::new(
                section,
                plan.subject.id,
                teacher,
                day,
                slot,
            ));
        }

        None
    }

    /// Every `(window, teacher)` pair free for both the teacher and the
    /// section on `day`.
    fn day_candidates(
        section: SectionId,
        day: Day,
        plan: &SubjectPlan<'_>,
        index: &ScheduleIndex,
    ) -> Vec<Candidate> {
        plan.windows
            .iter()
            .flat_map(|&slot| plan.teachers.iter().map(move |&teacher| (slot, teacher)))
            .filter(|&(slot, teacher)| index.is_free(teacher, section, day, slot))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Initialisation helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve every subject's eligible teachers and candidate windows.
    ///
    /// Fails on the first subject (in input order) without a teacher.
    fn build_plans<'a>(
        subjects: &'a [Subject],
        teacher_map: &'a TeacherMap,
    ) -> Result<Vec<SubjectPlan<'a>>, SchedulerError> {
        subjects
            .iter()
            .map(|subject| {
                let teachers = teacher_map
                    .get(&subject.id)
                    .map(Vec::as_slice)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| SchedulerError::NoTeacherAssigned {
                        subject: subject.name.clone(),
                        subject_id: subject.id,
                    })?;

                let windows = if subject.is_lab {
                    lab_windows(subject.duration_minutes)
                } else {
                    fixed_lecture_slots().to_vec()
                };

                if windows.is_empty() {
                    warn!(
                        subject  = %subject.name,
                        duration = subject.duration_minutes,
                        "lab duration fits no window in the teaching day"
                    );
                }

                Ok(SubjectPlan {
                    subject,
                    teachers,
                    windows,
                })
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
