/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use timetabler::candidate::{CandidateSource, TextCandidates};
use timetabler::config::CourseConfig;
use timetabler::model::{sort_for_display, TimetableEntry};
use timetabler::scheduler::Scheduler;
use timetabler::validator::EntryValidator;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Weekly class timetable generator and validator.
///
/// Example:
///   timetabler generate --config demos/course.yaml --seed 7
///   timetabler validate --candidates generated.txt --config demos/course.yaml
#[derive(Debug, Parser)]
#[command(name = "timetabler", about = "Weekly class timetable engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a conflict-free timetable for a course file.
    Generate {
        /// Path to the YAML course file.
        #[arg(short = 'c', long = "config")]
        config: PathBuf,

        /// RNG seed; overrides the course file's `seed`.
        #[arg(short = 's', long = "seed")]
        seed: Option<u64>,
    },

    /// Filter externally generated entries down to a conflict-free set.
    Validate {
        /// File holding the generator output, or `-` for stdin.
        #[arg(short = 'i', long = "candidates")]
        candidates: PathBuf,

        /// Course file; enables subject, teacher and slot-shape checks.
        #[arg(short = 'c', long = "config")]
        config: Option<PathBuf>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Logs go to stderr so stdout stays machine-readable JSON.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate { config, seed } => generate(&config, seed),
        Command::Validate { candidates, config } => validate(&candidates, config.as_deref()),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn generate(config_path: &Path, seed: Option<u64>) -> Result<()> {
    let course = CourseConfig::load_from_file(config_path)?;
    info!(
        course_id = course.course_id(),
        course = course.course_name(),
        "Generating timetable"
    );

    let mut scheduler = match seed.or(course.seed()) {
        Some(seed) => {
            info!(seed, "Using fixed seed");
            Scheduler::seeded(seed)
        }
        None => Scheduler::from_entropy(),
    };

    let mut entries = scheduler.generate(&course.section_ids(), course.subjects(), course.teacher_map())?;

    let expected = course.sections().len() * course.subjects().len();
    if entries.len() < expected {
        warn!(
            placed = entries.len(),
            expected,
            "Timetable is incomplete"
        );
    }

    sort_for_display(&mut entries);
    print_entries(&entries)
}

fn validate(candidates_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let validator = match config_path {
        Some(path) => EntryValidator::with_catalog(CourseConfig::load_from_file(path)?.catalog()),
        None => EntryValidator::new(),
    };

    let text = read_input(candidates_path)?;
    let candidates = TextCandidates::new(text).candidates();
    let report = validator.validate_with_report(&candidates);

    info!(
        candidates = candidates.len(),
        accepted = report.accepted.len(),
        dropped = report.dropped(),
        "Validation summary"
    );
    for (index, reason) in &report.rejected {
        info!("  dropped #{index}: {reason}");
    }

    let mut accepted = report.accepted;
    sort_for_display(&mut accepted);
    print_entries(&accepted)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Cannot read candidates from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open candidates file: {}", path.display()))
}

fn print_entries(entries: &[TimetableEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries).context("Failed to encode timetable")?;
    println!("{json}");
    Ok(())
}
