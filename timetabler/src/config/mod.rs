/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Course file loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! course: { id: 1, name: "B.Tech CSE" }
//! sections:
//!   - { id: 1, name: "A" }
//!   - { id: 2, name: "B" }
//! subjects:
//!   - { id: 10, name: "Mathematics" }
//!   - { id: 11, name: "Physics Lab", is_lab: true, duration_minutes: 100 }
//! teachers:
//!   10: [100, 101]
//!   11: [102]
//! seed: 42
//! ```
//!
//! `is_lab` defaults to `false`, `duration_minutes` to 60 and `seed` to none.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::model::{CourseId, Section, SectionId, Subject, TeacherMap};
use crate::validator::Catalog;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
struct CourseFile {
    course: CourseEntry,
    #[serde(default)]
    sections: Vec<SectionEntry>,
    #[serde(default)]
    subjects: Vec<Subject>,
    #[serde(default)]
    teachers: TeacherMap,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CourseEntry {
    id: CourseId,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct SectionEntry {
    id: SectionId,
    #[serde(default)]
    name: String,
}

// ── CourseConfig ──────────────────────────────────────────────────────────────

/// One course's scheduling input, checked for internal consistency.
///
/// Empty section or subject lists are accepted here; the scheduler reports
/// them.
#[derive(Debug, Clone)]
pub struct CourseConfig {
    course_id: CourseId,
    course_name: String,
    sections: Vec<Section>,
    subjects: Vec<Subject>,
    teacher_map: TeacherMap,
    seed: Option<u64>,
}

impl CourseConfig {
    /// Read and parse `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is structurally
    /// invalid, or a section or subject id is repeated.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading course configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open course file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid course file: {}", path.display()))
    }

    /// Parse a course from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CourseFile =
            serde_yaml::from_str(content).context("Failed to parse course YAML")?;

        let course_id = file.course.id;

        let mut seen = BTreeSet::new();
        let mut sections = Vec::with_capacity(file.sections.len());
        for entry in file.sections {
            if !seen.insert(entry.id) {
                bail!("duplicate section id {}", entry.id);
            }
            sections.push(Section {
                id: entry.id,
                course_id,
                name: entry.name,
            });
        }

        let mut seen = BTreeSet::new();
        for subject in &file.subjects {
            if !seen.insert(subject.id) {
                bail!("duplicate subject id {}", subject.id);
            }
            if subject.is_lab && subject.duration_minutes == 0 {
                bail!("lab subject '{}' has zero duration", subject.name);
            }
            debug!(
                "  Subject: {} ({}) | lab: {} | {} min",
                subject.name, subject.id, subject.is_lab, subject.duration_minutes
            );
        }

        let mut teacher_map = file.teachers;
        teacher_map.retain(|subject_id, teachers| {
            let known = seen.contains(subject_id);
            if !known {
                warn!(
                    subject_id = *subject_id,
                    teachers = ?teachers,
                    "teacher entry for unknown subject ignored"
                );
            }
            known
        });

        info!(
            "Loaded course {} '{}': {} section(s), {} subject(s)",
            course_id,
            file.course.name,
            sections.len(),
            file.subjects.len()
        );

        Ok(Self {
            course_id,
            course_name: file.course.name,
            sections,
            subjects: file.subjects,
            teacher_map,
            seed: file.seed,
        })
    }

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    pub fn course_name(&self) -> &str {
        &self.course_name
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section ids in file order, as the scheduler takes them.
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id).collect()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn teacher_map(&self) -> &TeacherMap {
        &self.teacher_map
    }

    /// Catalog for validating candidates against this course.
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.subjects.iter().cloned(), self.teacher_map.clone())
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
