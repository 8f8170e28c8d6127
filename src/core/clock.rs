//! Clock parsing and synchronization analysis
//!
//! Town clocks are compared against a single reference reading. Readings
//! that fail to parse are kept in the report as invalid entries so that one
//! bad clock never hides the rest.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::{OrreryError, Result};
use super::models::{ClockStatus, TimeOfDay};

lazy_static! {
    static ref TIME_PATTERN: Regex = Regex::new(r"^([01]?\d|2[0-3]):([0-5]\d)$").unwrap();
}

/// Parse `H:MM` or `HH:MM` (hour 0-23, minute 0-59).
pub fn parse_time(s: &str) -> Result<TimeOfDay> {
    let caps = TIME_PATTERN
        .captures(s)
        .ok_or_else(|| OrreryError::invalid_time(s))?;

    // The pattern bounds both groups, so these parses cannot overflow.
    let hour: u8 = caps[1].parse().map_err(|_| OrreryError::invalid_time(s))?;
    let minute: u8 = caps[2].parse().map_err(|_| OrreryError::invalid_time(s))?;

    TimeOfDay::new(hour, minute).ok_or_else(|| OrreryError::invalid_time(s))
}

impl FromStr for TimeOfDay {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self> {
        parse_time(s)
    }
}

/// Signed minutes between two clock strings, positive when `a` is ahead of `b`.
///
/// `a` is parsed first, so when both are malformed the error names `a`.
pub fn time_difference(a: &str, b: &str) -> Result<i32> {
    let a = parse_time(a)?;
    let b = parse_time(b)?;
    Ok(a.minutes_since_midnight() - b.minutes_since_midnight())
}

// =============================================================================
// Synchronization Report
// =============================================================================

/// Result of comparing one reading with the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClockOutcome {
    /// The reading parsed; `diff` is signed minutes relative to the reference
    Measured {
        time: TimeOfDay,
        diff: i32,
        status: ClockStatus,
    },
    /// The reading (or the reference) was malformed
    Invalid { error: String },
}

/// One analysed reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockReading {
    /// 1-based position in the input list
    pub index: usize,
    /// The raw reading as supplied
    pub reading: String,
    #[serde(flatten)]
    pub outcome: ClockOutcome,
}

impl ClockReading {
    /// Signed minute difference, if the reading parsed.
    pub fn diff(&self) -> Option<i32> {
        match self.outcome {
            ClockOutcome::Measured { diff, .. } => Some(diff),
            ClockOutcome::Invalid { .. } => None,
        }
    }

    /// Parsed time, if the reading parsed.
    pub fn time(&self) -> Option<TimeOfDay> {
        match self.outcome {
            ClockOutcome::Measured { time, .. } => Some(time),
            ClockOutcome::Invalid { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, ClockOutcome::Measured { .. })
    }
}

/// All readings compared against one reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub reference: String,
    pub readings: Vec<ClockReading>,
    /// Readings that parsed but differ from the reference
    pub adjustments_needed: usize,
}

impl SyncReport {
    /// Readings that could not be parsed.
    pub fn invalid_count(&self) -> usize {
        self.readings.iter().filter(|r| !r.is_valid()).count()
    }

    /// Signed differences in input order, `None` for invalid readings.
    pub fn diffs(&self) -> Vec<Option<i32>> {
        self.readings.iter().map(ClockReading::diff).collect()
    }
}

/// Compare every reading with `reference`.
///
/// Format errors are recorded per reading; processing always continues.
/// Each reading is checked before the reference, as in [`time_difference`].
pub fn analyze<S: AsRef<str>>(reference: &str, readings: &[S]) -> SyncReport {
    let base = parse_time(reference).ok();
    let readings: Vec<ClockReading> = readings
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let raw = raw.as_ref();
            let measured = parse_time(raw).and_then(|time| {
                let base = base.ok_or_else(|| OrreryError::invalid_time(reference))?;
                Ok((time, time.minutes_since_midnight() - base.minutes_since_midnight()))
            });
            let outcome = match measured {
                Ok((time, diff)) => {
                    debug!(index = i + 1, reading = raw, diff, "clock measured");
                    ClockOutcome::Measured {
                        time,
                        diff,
                        status: ClockStatus::from_diff(diff),
                    }
                }
                Err(e) => {
                    warn!(index = i + 1, reading = raw, error = %e, "skipping invalid clock");
                    ClockOutcome::Invalid {
                        error: e.to_string(),
                    }
                }
            };
            ClockReading {
                index: i + 1,
                reading: raw.to_string(),
                outcome,
            }
        })
        .collect();

    let adjustments_needed = readings
        .iter()
        .filter(|r| matches!(r.diff(), Some(d) if d != 0))
        .count();

    SyncReport {
        reference: reference.to_string(),
        readings,
        adjustments_needed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_times() {
        assert_eq!(parse_time("15:00").unwrap(), TimeOfDay { hour: 15, minute: 0 });
        assert_eq!(parse_time("9:05").unwrap(), TimeOfDay { hour: 9, minute: 5 });
        assert_eq!(parse_time("0:00").unwrap(), TimeOfDay { hour: 0, minute: 0 });
        assert_eq!(parse_time("09:30").unwrap(), TimeOfDay { hour: 9, minute: 30 });
        assert_eq!(parse_time("23:59").unwrap(), TimeOfDay { hour: 23, minute: 59 });
    }

    #[test]
    fn test_parse_invalid_times() {
        for input in ["24:00", "15:60", "3pm", "", "15:5", " 15:00", "15:00 ", "1500", "-1:00", "123:00"] {
            let err = parse_time(input).unwrap_err();
            assert!(err.is_format_error(), "expected format error for {:?}", input);
        }
    }

    #[test]
    fn test_from_str() {
        let t: TimeOfDay = "7:45".parse().unwrap();
        assert_eq!(t.to_string(), "07:45");
        assert!("25:00".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_time_difference_sign() {
        assert_eq!(time_difference("15:05", "15:00").unwrap(), 5);
        assert_eq!(time_difference("14:45", "15:00").unwrap(), -15);
        assert_eq!(time_difference("15:00", "15:00").unwrap(), 0);
        assert_eq!(time_difference("0:00", "23:59").unwrap(), -1439);
    }

    #[test]
    fn test_time_difference_propagates_first_error() {
        let err = time_difference("bad", "worse").unwrap_err();
        assert!(err.to_string().contains("bad"));
        let err = time_difference("15:00", "worse").unwrap_err();
        assert!(err.to_string().contains("worse"));
    }

    #[test]
    fn test_analyze_continues_past_invalid() {
        let report = analyze("15:00", &["14:45", "bad", "15:05"]);
        assert_eq!(report.readings.len(), 3);
        assert_eq!(report.diffs(), vec![Some(-15), None, Some(5)]);
        assert_eq!(report.invalid_count(), 1);
        assert_eq!(report.adjustments_needed, 2);
        assert_eq!(report.readings[1].index, 2);
        assert!(matches!(
            &report.readings[1].outcome,
            ClockOutcome::Invalid { error } if error.contains("bad")
        ));
    }

    #[test]
    fn test_analyze_statuses() {
        let report = analyze("12:00", &["12:10", "11:50", "12:00"]);
        let statuses: Vec<_> = report
            .readings
            .iter()
            .map(|r| match &r.outcome {
                ClockOutcome::Measured { status, .. } => Some(*status),
                ClockOutcome::Invalid { .. } => None,
            })
            .collect();
        assert_eq!(
            statuses,
            vec![
                Some(ClockStatus::Ahead(10)),
                Some(ClockStatus::Behind(10)),
                Some(ClockStatus::Synchronized),
            ]
        );
        assert_eq!(report.adjustments_needed, 2);
    }

    #[test]
    fn test_analyze_agrees_with_time_difference() {
        let readings = ["0:00", "23:59", "9:05", "12:30"];
        let report = analyze("12:30", &readings);
        for (reading, raw) in report.readings.iter().zip(readings) {
            assert_eq!(reading.diff(), Some(time_difference(raw, "12:30").unwrap()));
            assert_eq!(reading.time(), Some(parse_time(raw).unwrap()));
        }
        assert_eq!(report.adjustments_needed, 3);
    }

    #[test]
    fn test_analyze_with_bad_reference() {
        let report = analyze("noon", &["12:00", "nope"]);
        assert_eq!(report.invalid_count(), 2);
        assert_eq!(report.adjustments_needed, 0);
        assert!(matches!(
            &report.readings[0].outcome,
            ClockOutcome::Invalid { error } if error.contains("noon")
        ));
        assert!(matches!(
            &report.readings[1].outcome,
            ClockOutcome::Invalid { error } if error.contains("nope")
        ));
    }

    #[test]
    fn test_analyze_empty() {
        let readings: [&str; 0] = [];
        let report = analyze("15:00", &readings);
        assert!(report.readings.is_empty());
        assert_eq!(report.adjustments_needed, 0);
    }

    #[test]
    fn test_report_serializes_outcomes() {
        let report = analyze("15:00", &["15:05", "x"]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["readings"][0]["outcome"], "measured");
        assert_eq!(json["readings"][0]["diff"], 5);
        assert_eq!(json["readings"][1]["outcome"], "invalid");
        assert_eq!(json["adjustments_needed"], 1);
    }
}
