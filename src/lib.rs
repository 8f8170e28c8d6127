//! orrery - Shadow alignment and clock synchronization analysis
//!
//! Two small, stateless analyses:
//! - **Alignment**: how much light each body receives given the larger
//!   bodies orbiting closer to its star
//! - **Clocks**: signed minute offsets of clock readings against a
//!   reference time, tolerating malformed readings
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **core**: pure logic, models, errors and configuration
//! - **formats**: text, ASCII and SVG renderers
//! - **bin/orrery.rs**: thin CLI wrapper that calls the library
//!
//! # Example
//!
//! ```
//! use orrery::{analyze, classify_system, Body, LightIntensity};
//!
//! let bodies = vec![Body::new("Inner", 0.4, 4879.0), Body::new("Outer", 1.5, 1000.0)];
//! let (_, results) = classify_system(&bodies);
//! assert_eq!(results[1].light, LightIntensity::None);
//!
//! let report = analyze("15:00", &["14:45", "bad"]);
//! assert_eq!(report.diffs(), vec![Some(-15), None]);
//! ```

pub mod core;
pub mod formats;

/// Crate version, shown by `orrery --version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{
    alignment::{classify, classify_system, light_intensity, shadow_count, sort_by_distance},
    clock::{analyze, parse_time, time_difference, ClockOutcome, ClockReading, SyncReport},
    config::{Config, ConfigSource},
    error::{OrreryError, Result},
    models::{Body, ClassificationResult, ClockStatus, LightIntensity, OutputFormat, Star, StarSystem, TimeOfDay},
};
