//! Core data models for orrery
//!
//! This module contains the fundamental data structures shared by the
//! alignment classifier, the clock analyzer and the renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Bodies & Stars
// =============================================================================

/// A body orbiting a star.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Body {
    /// Display name
    pub name: String,
    /// Orbital distance, only used for ordering
    pub distance: f64,
    /// Diameter (any consistent unit)
    pub size: f64,
    /// Fill colour for graphical output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Body {
    /// Create a new body.
    pub fn new(name: impl Into<String>, distance: f64, size: f64) -> Self {
        Self {
            name: name.into(),
            distance,
            size,
            color: None,
        }
    }

    /// Set the display colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Half the size.
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}

/// A star in render-space coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Star {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub luminosity: f64,
}

impl Star {
    /// Create a new star.
    pub fn new(name: impl Into<String>, x: f64, y: f64, radius: f64, luminosity: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            radius,
            luminosity,
        }
    }
}

/// A named system of stars and the bodies orbiting the primary.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StarSystem {
    #[serde(default = "default_system_name")]
    pub name: String,
    /// First entry is the primary star
    #[serde(default)]
    pub stars: Vec<Star>,
    #[serde(default)]
    pub bodies: Vec<Body>,
}

fn default_system_name() -> String {
    "Unnamed System".to_string()
}

impl StarSystem {
    /// Create a new star system.
    pub fn new(name: impl Into<String>, stars: Vec<Star>, bodies: Vec<Body>) -> Self {
        Self {
            name: name.into(),
            stars,
            bodies,
        }
    }

    /// The primary star, if the system has any.
    pub fn primary(&self) -> Option<&Star> {
        self.stars.first()
    }

    /// The Lumoria system used when no configuration is supplied.
    pub fn lumoria() -> Self {
        Self::new(
            "Lumoria System",
            vec![
                Star::new("Lumoria", 100.0, 150.0, 30.0, 1200.0),
                Star::new("Altaris", 700.0, 150.0, 20.0, 800.0),
            ],
            vec![
                Body::new("Mercuria", 0.4, 4879.0).with_color("#8ecae6"),
                Body::new("Earthia", 1.0, 12742.0).with_color("#219ebc"),
                Body::new("Venusia", 0.7, 12104.0).with_color("#ffb703"),
                Body::new("Marsia", 1.5, 6779.0).with_color("#fb8500"),
            ],
        )
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Light received by a body given the shadows cast by closer bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LightIntensity {
    /// Nothing orbits closer to the star
    Full,
    /// No closer body is larger
    Partial,
    /// Exactly one closer body is larger
    None,
    /// Two or more closer bodies are larger
    #[serde(rename = "None (Multiple Shadows)")]
    NoneMultipleShadows,
}

impl LightIntensity {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            LightIntensity::Full => "Full",
            LightIntensity::Partial => "Partial",
            LightIntensity::None => "None",
            LightIntensity::NoneMultipleShadows => "None (Multiple Shadows)",
        }
    }

    /// True for both shadowed variants.
    pub fn is_shadowed(&self) -> bool {
        matches!(self, LightIntensity::None | LightIntensity::NoneMultipleShadows)
    }
}

impl fmt::Display for LightIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of a single body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub name: String,
    pub light: LightIntensity,
    /// Number of closer, strictly larger bodies
    pub shadow_count: usize,
}

// =============================================================================
// Clocks
// =============================================================================

/// A wall-clock time with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    /// Build a time, returning `None` when out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Minutes elapsed since 00:00.
    pub fn minutes_since_midnight(&self) -> i32 {
        i32::from(self.hour) * 60 + i32::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// How a reading compares with the reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "minutes", rename_all = "snake_case")]
pub enum ClockStatus {
    Ahead(u32),
    Behind(u32),
    Synchronized,
}

impl ClockStatus {
    /// Status from a signed minute difference.
    pub fn from_diff(diff: i32) -> Self {
        match diff {
            d if d > 0 => ClockStatus::Ahead(d.unsigned_abs()),
            d if d < 0 => ClockStatus::Behind(d.unsigned_abs()),
            _ => ClockStatus::Synchronized,
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON
    Json,
    /// SVG drawing (alignment only)
    Svg,
}

impl OutputFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Svg => "svg",
        }
    }

    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_intensity_labels() {
        assert_eq!(LightIntensity::Full.to_string(), "Full");
        assert_eq!(LightIntensity::Partial.to_string(), "Partial");
        assert_eq!(LightIntensity::None.to_string(), "None");
        assert_eq!(
            LightIntensity::NoneMultipleShadows.to_string(),
            "None (Multiple Shadows)"
        );
        assert!(LightIntensity::NoneMultipleShadows.is_shadowed());
        assert!(!LightIntensity::Partial.is_shadowed());
    }

    #[test]
    fn test_light_intensity_serializes_as_label() {
        let json = serde_json::to_string(&LightIntensity::NoneMultipleShadows).unwrap();
        assert_eq!(json, "\"None (Multiple Shadows)\"");
    }

    #[test]
    fn test_time_of_day_bounds() {
        assert!(TimeOfDay::new(23, 59).is_some());
        assert!(TimeOfDay::new(24, 0).is_none());
        assert!(TimeOfDay::new(0, 60).is_none());
    }

    #[test]
    fn test_time_of_day_display_is_padded() {
        let t = TimeOfDay::new(9, 5).unwrap();
        assert_eq!(t.to_string(), "09:05");
        assert_eq!(t.minutes_since_midnight(), 545);
    }

    #[test]
    fn test_clock_status_from_diff() {
        assert_eq!(ClockStatus::from_diff(5), ClockStatus::Ahead(5));
        assert_eq!(ClockStatus::from_diff(-15), ClockStatus::Behind(15));
        assert_eq!(ClockStatus::from_diff(0), ClockStatus::Synchronized);
    }

    #[test]
    fn test_body_deserialize_without_color() {
        let body: Body =
            serde_json::from_str(r#"{"name": "Marsia", "distance": 1.5, "size": 6779}"#).unwrap();
        assert_eq!(body, Body::new("Marsia", 1.5, 6779.0));
    }

    #[test]
    fn test_lumoria_defaults() {
        let system = StarSystem::lumoria();
        assert_eq!(system.primary().map(|s| s.name.as_str()), Some("Lumoria"));
        assert_eq!(system.bodies.len(), 4);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("SVG"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::parse("txt"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(OutputFormat::Json.extension(), "json");
    }
}
