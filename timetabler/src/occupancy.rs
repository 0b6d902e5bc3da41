/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-call schedule index: which intervals each teacher and section already
//! holds on each day.
//!
//! One [`ScheduleIndex`] is allocated at the top of every
//! [`Scheduler::generate`](crate::scheduler::Scheduler::generate) and
//! [`EntryValidator::validate`](crate::validator::EntryValidator::validate)
//! call and dropped when it returns.  Nothing is cached between calls.
//!
//! `BTreeMap` (not `HashMap`) so that debug dumps iterate in a stable order.

use std::collections::BTreeMap;

use crate::model::{Day, SectionId, TeacherId};
use crate::slot::{overlaps, TimeSlot};

// ── DayBook ───────────────────────────────────────────────────────────────────

/// Committed intervals keyed by `(entity, day)`.
#[derive(Debug, Clone)]
pub struct DayBook<K: Ord> {
    busy: BTreeMap<(K, Day), Vec<TimeSlot>>,
}

impl<K: Ord> Default for DayBook<K> {
    fn default() -> Self {
        Self {
            busy: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> DayBook<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `slot` overlaps nothing already committed for `(key, day)`.
    pub fn is_free(&self, key: K, day: Day, slot: TimeSlot) -> bool {
        self.busy
            .get(&(key, day))
            .map_or(true, |held| held.iter().all(|&h| !overlaps(h, slot)))
    }

    /// Record `slot` for `(key, day)`.  Does not check for overlap.
    pub fn commit(&mut self, key: K, day: Day, slot: TimeSlot) {
        self.busy.entry((key, day)).or_default().push(slot);
    }

    /// Total number of committed intervals across all keys and days.
    pub fn len(&self) -> usize {
        self.busy.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.busy.values().all(Vec::is_empty)
    }

    /// Intervals committed for `(key, day)` in commit order.
    #[cfg(test)]
    fn held(&self, key: K, day: Day) -> &[TimeSlot] {
        self.busy.get(&(key, day)).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ── ScheduleIndex ─────────────────────────────────────────────────────────────

/// Why a placement was refused by the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clash {
    Teacher,
    Section,
}

/// Teacher and section day books, always updated together.
#[derive(Debug, Clone, Default)]
pub struct ScheduleIndex {
    teachers: DayBook<TeacherId>,
    sections: DayBook<SectionId>,
}

impl ScheduleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the teacher first, then the section.
    pub fn check(
        &self,
        teacher: TeacherId,
        section: SectionId,
        day: Day,
        slot: TimeSlot,
    ) -> Result<(), Clash> {
        if !self.teachers.is_free(teacher, day, slot) {
            return Err(Clash::Teacher);
        }
        if !self.sections.is_free(section, day, slot) {
            return Err(Clash::Section);
        }
        Ok(())
    }

    pub fn is_free(&self, teacher: TeacherId, section: SectionId, day: Day, slot: TimeSlot) -> bool {
        self.check(teacher, section, day, slot).is_ok()
    }

    /// Commit `slot` into both books.  Callers must have checked it first.
    pub fn commit(&mut self, teacher: TeacherId, section: SectionId, day: Day, slot: TimeSlot) {
        self.teachers.commit(teacher, day, slot);
        self.sections.commit(section, day, slot);
    }

    /// Number of committed sessions.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
