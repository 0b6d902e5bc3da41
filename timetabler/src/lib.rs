/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Timetabler: weekly class timetable construction and validation
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── slot/         – minute-of-day intervals, fixed grid, lunch, lab windows
//! ├── model         – subjects, sections, teacher eligibility, entries
//! ├── occupancy     – per-call teacher/section busy index
//! ├── scheduler/    – seeded randomized greedy generator
//! ├── validator/    – single-pass filter over untrusted candidates
//! ├── candidate     – candidate sources and generator-text parsing
//! └── config/       – YAML course file
//! ```

pub mod candidate;
pub mod config;
pub mod model;
pub mod occupancy;
pub mod scheduler;
pub mod slot;
pub mod validator;
