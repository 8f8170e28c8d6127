//! Plain-text renderers
//!
//! Human-readable reports for alignments, clock analyses and animation
//! frames, including a small ASCII clock face.

use crate::core::clock::{ClockOutcome, ClockReading, SyncReport};
use crate::core::models::{ClassificationResult, ClockStatus, StarSystem, TimeOfDay};
use crate::core::physics::{survey, Frame};

/// Table of light labels, one row per body.
pub fn alignment_table(system_name: &str, results: &[ClassificationResult]) -> String {
    let width = results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = String::new();
    out.push_str(&format!("Light Intensity: {}\n", system_name));
    out.push_str(&format!("{}\n", "=".repeat(width + 30)));
    for result in results {
        out.push_str(&format!(
            "{:<width$}  {:<24} shadows: {}\n",
            result.name,
            result.light.label(),
            result.shadow_count,
            width = width
        ));
    }
    if results.is_empty() {
        out.push_str("(no bodies)\n");
    }
    out
}

/// Status text for a measured reading.
pub fn status_text(status: ClockStatus) -> String {
    match status {
        ClockStatus::Ahead(m) => format!("+{} minutes (ahead)", m),
        ClockStatus::Behind(m) => format!("-{} minutes (behind)", m),
        ClockStatus::Synchronized => "0 minutes (synchronized)".to_string(),
    }
}

/// One analysis line, e.g. `Clock 2 (15:05): +5 minutes (ahead)`.
pub fn clock_line(reading: &ClockReading) -> String {
    let detail = match &reading.outcome {
        ClockOutcome::Measured { status, .. } => status_text(*status),
        ClockOutcome::Invalid { error } => format!("invalid - {}", error),
    };
    format!("Clock {} ({}): {}", reading.index, reading.reading, detail)
}

/// Full synchronization report with the adjustment summary.
pub fn sync_report(report: &SyncReport) -> String {
    let mut out = String::new();
    out.push_str("Tempora Clock Synchronization\n");
    out.push_str(&format!("Reference Time: {}\n\n", report.reference));
    out.push_str("Clock Analysis Results:\n");
    for reading in &report.readings {
        out.push_str(&clock_line(reading));
        out.push('\n');
    }
    let noun = if report.adjustments_needed == 1 { "clock needs" } else { "clocks need" };
    out.push_str(&format!(
        "\nSummary: {} {} adjustment\n",
        report.adjustments_needed, noun
    ));
    out
}

/// Multi-line clock face for `time`.
pub fn ascii_clock(time: TimeOfDay) -> String {
    format!(
        "    ⏰ {}\n     12\n   9  |  3\n     6\n  ({}:{:02})",
        time, time.hour, time.minute
    )
}

/// Clock faces for the reference and every reading.
pub fn ascii_report(reference: TimeOfDay, report: &SyncReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Reference Clock:\n{}\n\n", ascii_clock(reference)));
    out.push_str("Town Clocks:\n");
    for reading in &report.readings {
        out.push_str(&format!("--- Clock {} ---\n", reading.index));
        match &reading.outcome {
            ClockOutcome::Measured { time, status, .. } => {
                let verdict = match status {
                    ClockStatus::Ahead(m) => format!("⏰ {} min AHEAD", m),
                    ClockStatus::Behind(m) => format!("⏰ {} min BEHIND", m),
                    ClockStatus::Synchronized => "⏰ Synchronized".to_string(),
                };
                out.push_str(&format!("{}\n{}\n", ascii_clock(*time), verdict));
            }
            ClockOutcome::Invalid { .. } => {
                out.push_str(&format!("invalid time format ({})\n", reading.reading));
            }
        }
    }
    out
}

/// Celestial report: stars, then each body's orbit, size, light and shadow.
pub fn celestial_report(system: &StarSystem) -> String {
    let names: Vec<&str> = system.stars.iter().map(|s| s.name.as_str()).collect();
    let stars = if names.is_empty() { "(none)".to_string() } else { names.join(", ") };

    let mut out = String::new();
    out.push_str("Celestial Alignment Report\n");
    out.push_str(&format!("Star System: {}\n", system.name));
    out.push_str(&format!("Stars: {}\n", stars));
    for row in survey(system) {
        out.push_str(&format!("Planet: {}\n", row.name));
        out.push_str(&format!("  Orbit Distance: {}\n", row.distance));
        out.push_str(&format!("  Size: {}\n", row.size));
        out.push_str(&format!("  Light: {}\n", row.light));
        match row.shadow_length {
            Some(length) => out.push_str(&format!("  Shadow Length: {:.2}\n", length)),
            None => out.push_str("  Shadow Length: n/a\n"),
        }
        if let Some(flux) = row.irradiance {
            out.push_str(&format!("  Irradiance: {:.4}\n", flux));
        }
    }
    out
}

/// Positions and shadows for each animation frame.
pub fn frames_text(frames: &[Frame]) -> String {
    let mut out = String::new();
    for (t, frame) in frames.iter().enumerate() {
        out.push_str(&format!("Frame {}:\n", t));
        for point in frame {
            out.push_str(&format!(
                "  {:<12} x={:>8.2} y={:>8.2} shadow={:.2}\n",
                point.name, point.x, point.y, point.shadow
            ));
        }
    }
    out
}
