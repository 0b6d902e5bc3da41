/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the timetable scheduler.
//!
//! Only precondition violations are errors.  A `(section, subject)` pair that
//! cannot be placed is *not* an error: it is logged and left out of the
//! result, and the caller sees a timetable shorter than
//! `sections × subjects`.
//!
//! | Variant | Meaning for the caller |
//! |---|---|
//! | `NoSections` | nothing to schedule for; nothing was built |
//! | `NoSubjects` | nothing to schedule; nothing was built |
//! | `NoTeacherAssigned` | fix the teacher mapping for the named subject |

use thiserror::Error;

use crate::model::SubjectId;

/// Top-level error returned by
/// [`Scheduler::generate()`](super::Scheduler::generate).
///
/// Every variant aborts the whole call before any entry is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// `generate()` was called with an empty section list.
    #[error("no sections found: section list is empty")]
    NoSections,

    /// `generate()` was called with an empty subject list.
    #[error("no subjects found: subject list is empty")]
    NoSubjects,

    /// A subject has no entry in the teacher map, or an empty one.
    #[error("no teachers assigned to subject '{subject}' (id {subject_id})")]
    NoTeacherAssigned {
        subject: String,
        subject_id: SubjectId,
    },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
