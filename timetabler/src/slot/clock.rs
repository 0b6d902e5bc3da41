/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Minute-of-day clock helpers: parsing and formatting wall-clock strings.
//!
//! These are free functions rather than methods so they can be used and tested
//! independently of [`TimeSlot`](super::TimeSlot).

use super::{Minute, SlotError};

/// Parse `HH:MM` or `HH:MM:SS` into minutes since midnight.
///
/// Surrounding whitespace is ignored and each field may have one or two
/// digits (`9:10` is accepted).  Seconds are validated and then discarded.
///
/// # Errors
/// [`SlotError::Format`] for anything else: wrong number of fields, signs,
/// non-digit characters, hours above 23, minutes or seconds above 59.
pub fn to_minutes(input: &str) -> Result<Minute, SlotError> {
    let format_err = || SlotError::Format {
        input: input.to_string(),
    };

    let fields: Vec<&str> = input.trim().split(':').collect();
    if !(2..=3).contains(&fields.len()) {
        return Err(format_err());
    }

    let mut values = [0u16; 3];
    for (slot, field) in values.iter_mut().zip(&fields) {
        if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format_err());
        }
        *slot = field.parse().map_err(|_| format_err())?;
    }

    let [hours, minutes, seconds] = values;
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(format_err());
    }

    Ok(hours * 60 + minutes)
}

/// Format minutes since midnight as zero-padded `HH:MM`.
///
/// Every value up to [`LAST_MINUTE`](super::LAST_MINUTE) reads back through
/// [`to_minutes`] unchanged.
pub fn format_minutes(minute: Minute) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Serde adapter: minutes in memory, `"HH:MM"` on the wire.
///
/// Deserialisation is lenient: it takes `HH:MM`, `HH:MM:SS` or a bare
/// integer minute count.
pub mod hhmm {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::{format_minutes, to_minutes, Minute};
    use crate::slot::LAST_MINUTE;

    pub fn serialize<S: Serializer>(minute: &Minute, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_minutes(*minute))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Minute, D::Error> {
        struct ClockVisitor;

        impl<'de> Visitor<'de> for ClockVisitor {
            type Value = Minute;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an HH:MM[:SS] string or a minute-of-day integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Minute, E> {
                to_minutes(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Minute, E> {
                match Minute::try_from(v) {
                    Ok(m) if m <= LAST_MINUTE => Ok(m),
                    _ => Err(E::custom(format!("minute {v} is outside the day"))),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Minute, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("minute {v} is negative")))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(ClockVisitor)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MINUTES_PER_DAY;

    // ── to_minutes ────────────────────────────────────────────────────────────

    #[test]
    fn parses_hh_mm() {
        assert_eq!(to_minutes("09:10").unwrap(), 550);
        assert_eq!(to_minutes("12:30").unwrap(), 750);
        assert_eq!(to_minutes("00:00").unwrap(), 0);
        assert_eq!(to_minutes("23:59").unwrap(), 1439);
    }

    #[test]
    fn parses_hh_mm_ss_and_drops_seconds() {
        assert_eq!(to_minutes("13:30:00").unwrap(), 810);
        assert_eq!(to_minutes("13:30:59").unwrap(), 810);
    }

    #[test]
    fn accepts_single_digit_hour_and_whitespace() {
        assert_eq!(to_minutes("9:10").unwrap(), 550);
        assert_eq!(to_minutes("  10:00 ").unwrap(), 600);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in [
            "", "10", "10:", ":10", "1000", "10:00:00:00", "ab:cd", "10:5x", "-1:00", "+9:00",
            "24:00", "10:60", "10:00:60", "100:00", "10:000",
        ] {
            assert!(
                matches!(to_minutes(bad), Err(SlotError::Format { .. })),
                "expected FormatError for {bad:?}"
            );
        }
    }

    #[test]
    fn format_error_carries_input() {
        let err = to_minutes("noon").unwrap_err();
        assert_eq!(
            err,
            SlotError::Format {
                input: "noon".to_string()
            }
        );
        assert!(err.to_string().contains("noon"));
    }

    // ── format_minutes ────────────────────────────────────────────────────────

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_minutes(550), "09:10");
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(1020), "17:00");
    }

    #[test]
    fn format_is_inverse_of_parse_for_every_minute() {
        for m in 0..MINUTES_PER_DAY {
            assert_eq!(to_minutes(&format_minutes(m)).unwrap(), m);
        }
    }

    // ── hhmm serde adapter ────────────────────────────────────────────────────

    #[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
    struct Wrapper {
        #[serde(with = "hhmm")]
        at: Minute,
    }

    #[test]
    fn hhmm_serialises_as_string() {
        let json = serde_json::to_string(&Wrapper { at: 810 }).unwrap();
        assert_eq!(json, r#"{"at":"13:30"}"#);
    }

    #[test]
    fn hhmm_accepts_strings_and_integers() {
        let a: Wrapper = serde_json::from_str(r#"{"at":"13:30:00"}"#).unwrap();
        let b: Wrapper = serde_json::from_str(r#"{"at":810}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hhmm_rejects_out_of_day_integers() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"at":1440}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"at":1441}"#).is_err());
        assert_eq!(
            serde_json::from_str::<Wrapper>(r#"{"at":1439}"#).unwrap(),
            Wrapper { at: 1439 }
        );
        assert!(serde_json::from_str::<Wrapper>(r#"{"at":-5}"#).is_err());
    }
}
