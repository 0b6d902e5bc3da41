/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Slot model: the time grid every other module agrees on.
//!
//! All times are minutes since midnight ([`Minute`]) and every interval is
//! half-open, `[start, end)`, so two sessions that merely touch
//! (`10:00–10:50` followed by `10:50–11:40`) do not overlap.
//!
//! ```text
//!  09:10      10:00      10:50      11:40      12:30 ── lunch ── 13:30      14:30      15:20      16:10      17:00
//!    |  slot 0  |  slot 1  |  slot 2  |  slot 3  |                  |  slot 4  |  slot 5  |  slot 6  |  slot 7  |
//! ```
//!
//! [`FIXED_LECTURE_SLOTS`] is the single source of truth for lecture
//! placement: the scheduler draws from it and the validator compares against
//! it, so both always agree on what a "grid slot" is.

pub mod clock;

use thiserror::Error;

pub use clock::{format_minutes, to_minutes};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Minutes since midnight.
pub type Minute = u16;

/// Length of a day.
pub const MINUTES_PER_DAY: Minute = 24 * 60;

/// Largest minute of day (23:59); the largest value an interval end may take.
pub const LAST_MINUTE: Minute = MINUTES_PER_DAY - 1;

/// First teaching minute of the day (09:10).
pub const DAY_START: Minute = 9 * 60 + 10;

/// Last teaching minute of the day (17:00).
pub const DAY_END: Minute = 17 * 60;

/// Protected lunch window, 12:30–13:30.
pub const LUNCH: TimeSlot = TimeSlot::new(12 * 60 + 30, 13 * 60 + 30);

/// The canonical lecture grid, in day order.
pub const FIXED_LECTURE_SLOTS: [TimeSlot; 8] = [
    TimeSlot::new(550, 600),  // 09:10–10:00
    TimeSlot::new(600, 650),  // 10:00–10:50
    TimeSlot::new(650, 700),  // 10:50–11:40
    TimeSlot::new(700, 750),  // 11:40–12:30
    TimeSlot::new(810, 870),  // 13:30–14:30
    TimeSlot::new(870, 920),  // 14:30–15:20
    TimeSlot::new(920, 970),  // 15:20–16:10
    TimeSlot::new(970, 1020), // 16:10–17:00
];

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors raised while building times and intervals from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    /// The string is not `HH:MM` or `HH:MM:SS`.
    #[error("malformed time '{input}' (expected HH:MM or HH:MM:SS)")]
    Format { input: String },

    /// `start >= end`, or the interval runs past 23:59.
    #[error("invalid interval {start}..{end} (need start < end <= 1439)")]
    InvalidInterval { start: Minute, end: Minute },
}

// ── TimeSlot ──────────────────────────────────────────────────────────────────

/// An immutable half-open interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot {
    start: Minute,
    end: Minute,
}

impl TimeSlot {
    /// Build a slot from trusted constants.
    ///
    /// # Panics
    /// Panics if `start >= end` or `end > LAST_MINUTE`.  Use
    /// [`try_new`](Self::try_new) for values that come from outside the crate.
    pub const fn new(start: Minute, end: Minute) -> Self {
        assert!(start < end && end <= LAST_MINUTE, "invalid TimeSlot");
        Self { start, end }
    }

    /// Checked constructor for untrusted values.
    pub fn try_new(start: Minute, end: Minute) -> Result<Self, SlotError> {
        if start < end && end <= LAST_MINUTE {
            Ok(Self { start, end })
        } else {
            Err(SlotError::InvalidInterval { start, end })
        }
    }

    /// Parse both ends from wall-clock strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, SlotError> {
        Self::try_new(to_minutes(start)?, to_minutes(end)?)
    }

    pub fn start(&self) -> Minute {
        self.start
    }

    pub fn end(&self) -> Minute {
        self.end
    }

    /// Length in minutes.
    pub fn duration(&self) -> Minute {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        overlaps(*self, *other)
    }

    pub fn intersects_lunch(&self) -> bool {
        intersects_lunch(self.start, self.end)
    }

    /// `true` if this slot is exactly one of [`FIXED_LECTURE_SLOTS`].
    pub fn is_grid_slot(&self) -> bool {
        FIXED_LECTURE_SLOTS.contains(self)
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            format_minutes(self.start),
            format_minutes(self.end)
        )
    }
}

// ── Interval primitives ───────────────────────────────────────────────────────

/// Half-open overlap test: `true` iff `!(a.end <= b.start || a.start >= b.end)`.
pub fn overlaps(a: TimeSlot, b: TimeSlot) -> bool {
    !(a.end <= b.start || a.start >= b.end)
}

/// `true` iff `[start, end)` overlaps the [`LUNCH`] window.
///
/// Takes raw minutes so callers can test intervals before they are known to
/// be well formed; an empty or reversed range never intersects.
pub fn intersects_lunch(start: Minute, end: Minute) -> bool {
    start < end && !(end <= LUNCH.start || start >= LUNCH.end)
}

/// The shared lecture grid.
pub fn fixed_lecture_slots() -> &'static [TimeSlot; 8] {
    &FIXED_LECTURE_SLOTS
}

/// `true` if `slot` lies wholly in the morning band `[09:10, 12:30]` or the
/// afternoon band `[13:30, 17:00]`.
pub fn is_in_teaching_band(slot: TimeSlot) -> bool {
    let morning = slot.start >= DAY_START && slot.end <= LUNCH.start;
    let afternoon = slot.start >= LUNCH.end && slot.end <= DAY_END;
    morning || afternoon
}

/// Every lab block of exactly `duration` minutes the day can hold.
///
/// Windows start on a grid-slot boundary or end flush with lunch or 17:00.
/// None runs past [`DAY_END`] or touches lunch.  Returned in day order
/// without duplicates; empty for `duration == 0` or a block longer than
/// either half-day.
pub fn lab_windows(duration: Minute) -> Vec<TimeSlot> {
    if duration == 0 {
        return Vec::new();
    }

    let bands = [(DAY_START, LUNCH.start), (LUNCH.end, DAY_END)];
    let band_aligned = bands
        .into_iter()
        .filter_map(|(open, close)| close.checked_sub(duration).filter(|&start| start >= open));

    let mut windows: Vec<TimeSlot> = FIXED_LECTURE_SLOTS
        .iter()
        .map(TimeSlot::start)
        .chain(band_aligned)
        .filter_map(|start| {
            let end = start.checked_add(duration)?;
            let window = TimeSlot::try_new(start, end).ok()?;
            (window.start >= DAY_START && window.end <= DAY_END && !window.intersects_lunch())
                .then_some(window)
        })
        .collect();

    windows.sort_unstable();
    windows.dedup();
    windows
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::parse(start, end).unwrap()
    }

    // ── Grid ──────────────────────────────────────────────────────────────────

    #[test]
    fn grid_has_eight_ordered_disjoint_slots() {
        let grid = fixed_lecture_slots();
        assert_eq!(grid.len(), 8);
        for pair in grid.windows(2) {
            assert!(pair[0].end() <= pair[1].start(), "{} / {}", pair[0], pair[1]);
            assert!(!pair[0].overlaps(&pair[1]));
        }
    }

    #[test]
    fn grid_spans_teaching_day_and_skips_lunch() {
        let grid = fixed_lecture_slots();
        assert_eq!(grid[0].start(), DAY_START);
        assert_eq!(grid[7].end(), DAY_END);
        assert_eq!(grid[3].end(), LUNCH.start());
        assert_eq!(grid[4].start(), LUNCH.end());
        assert!(grid.iter().all(|s| !s.intersects_lunch()));
        assert!(!grid.contains(&LUNCH));
    }

    #[test]
    fn grid_matches_wall_clock_table() {
        let expected = [
            ("09:10", "10:00"),
            ("10:00", "10:50"),
            ("10:50", "11:40"),
            ("11:40", "12:30"),
            ("13:30", "14:30"),
            ("14:30", "15:20"),
            ("15:20", "16:10"),
            ("16:10", "17:00"),
        ];
        for (grid, (s, e)) in fixed_lecture_slots().iter().zip(expected) {
            assert_eq!(*grid, slot(s, e));
        }
    }

    #[test]
    fn is_grid_slot_requires_exact_match() {
        assert!(slot("10:00", "10:50").is_grid_slot());
        assert!(!slot("10:00", "10:40").is_grid_slot());
        assert!(!slot("09:10", "10:50").is_grid_slot());
    }

    // ── overlaps ──────────────────────────────────────────────────────────────

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!overlaps(slot("09:10", "10:00"), slot("10:00", "10:50")));
        assert!(!overlaps(slot("10:00", "10:50"), slot("09:10", "10:00")));
    }

    #[test]
    fn nested_and_partial_intervals_overlap() {
        assert!(overlaps(slot("09:00", "12:00"), slot("10:00", "10:50")));
        assert!(overlaps(slot("10:00", "10:50"), slot("10:40", "11:30")));
        assert!(overlaps(slot("10:00", "10:50"), slot("10:00", "10:50")));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = slot("11:00", "12:00");
        let b = slot("11:59", "13:00");
        assert_eq!(overlaps(a, b), overlaps(b, a));
    }

    // ── Lunch ─────────────────────────────────────────────────────────────────

    #[test]
    fn lunch_boundaries_are_half_open() {
        assert!(!intersects_lunch(700, 750)); // ends at 12:30
        assert!(!intersects_lunch(810, 860)); // starts at 13:30
        assert!(intersects_lunch(749, 751));
        assert!(intersects_lunch(809, 811));
        assert!(intersects_lunch(750, 810));
        assert!(intersects_lunch(700, 900));
    }

    #[test]
    fn lab_across_lunch_is_detected() {
        // 12:00–13:40
        assert!(slot("12:00", "13:40").intersects_lunch());
    }

    #[test]
    fn degenerate_ranges_never_intersect_lunch() {
        assert!(!intersects_lunch(780, 780));
        assert!(!intersects_lunch(800, 760));
    }

    // ── TimeSlot construction ─────────────────────────────────────────────────

    #[test]
    fn try_new_rejects_empty_and_reversed() {
        assert!(matches!(
            TimeSlot::try_new(600, 600),
            Err(SlotError::InvalidInterval { .. })
        ));
        assert!(TimeSlot::try_new(650, 600).is_err());
        assert!(TimeSlot::try_new(1400, 1441).is_err());
        assert!(TimeSlot::try_new(1400, MINUTES_PER_DAY).is_err());
        assert!(TimeSlot::try_new(1400, LAST_MINUTE).is_ok());
    }

    #[test]
    fn parse_propagates_format_error() {
        assert!(matches!(
            TimeSlot::parse("nine", "10:00"),
            Err(SlotError::Format { .. })
        ));
    }

    #[test]
    fn display_uses_wall_clock() {
        assert_eq!(slot("09:10", "10:00").to_string(), "09:10-10:00");
        assert_eq!(slot("09:10", "10:00").duration(), 50);
    }

    // ── Teaching bands ────────────────────────────────────────────────────────

    #[test]
    fn teaching_band_accepts_half_day_blocks() {
        assert!(is_in_teaching_band(slot("09:10", "12:30")));
        assert!(is_in_teaching_band(slot("13:30", "17:00")));
        assert!(!is_in_teaching_band(slot("09:00", "10:00")));
        assert!(!is_in_teaching_band(slot("16:00", "17:10")));
        assert!(!is_in_teaching_band(slot("12:00", "13:40")));
    }

    // ── Lab windows ───────────────────────────────────────────────────────────

    #[test]
    fn lab_windows_for_100_minutes() {
        let windows: Vec<String> = lab_windows(100).iter().map(|w| w.to_string()).collect();
        assert_eq!(
            windows,
            vec![
                "09:10-10:50",
                "10:00-11:40",
                "10:50-12:30",
                "13:30-15:10",
                "14:30-16:10",
                "15:20-17:00",
            ]
        );
    }

    #[test]
    fn lab_windows_for_120_minutes() {
        let windows: Vec<String> = lab_windows(120).iter().map(|w| w.to_string()).collect();
        assert_eq!(
            windows,
            vec![
                "09:10-11:10",
                "10:00-12:00",
                "10:30-12:30",
                "13:30-15:30",
                "14:30-16:30",
                "15:00-17:00",
            ]
        );
    }

    #[test]
    fn lab_windows_include_blocks_flush_with_band_ends() {
        let windows = lab_windows(90);
        assert!(windows.contains(&slot("11:00", "12:30")));
        assert!(windows.contains(&slot("15:30", "17:00")));

        // A whole half-day fits exactly once.
        assert_eq!(lab_windows(210), vec![slot("13:30", "17:00")]);
        assert_eq!(
            lab_windows(200),
            vec![slot("09:10", "12:30"), slot("13:30", "16:50"), slot("13:40", "17:00")]
        );
    }

    #[test]
    fn lab_windows_respect_every_rule() {
        for duration in [50, 60, 90, 100, 110, 120, 150, 200] {
            for w in lab_windows(duration) {
                assert_eq!(w.duration(), duration);
                assert!(w.start() >= DAY_START);
                assert!(w.end() <= DAY_END);
                assert!(!w.intersects_lunch());
                assert!(is_in_teaching_band(w));
            }
        }
    }

    #[test]
    fn lab_windows_empty_for_impossible_durations() {
        assert!(lab_windows(0).is_empty());
        assert!(lab_windows(211).is_empty());
        assert!(lab_windows(Minute::MAX).is_empty());
    }
}
