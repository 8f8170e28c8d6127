//! Core module for orrery
//!
//! # Architecture
//!
//! - `models`: Core data structures (Body, StarSystem, TimeOfDay, LightIntensity)
//! - `error`: Error types using thiserror
//! - `alignment`: Shadow counting and light classification
//! - `clock`: Time parsing and the clock synchronization report
//! - `physics`: Shadow geometry, irradiance and animation frames
//! - `config`: JSON configuration discovery and validation

pub mod alignment;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod physics;

// Re-export commonly used types
pub use alignment::{classify, classify_system};
pub use clock::{analyze, parse_time, time_difference, ClockOutcome, ClockReading, SyncReport};
pub use config::{ClockConfig, Config, ConfigSource, RenderConfig};
pub use error::{OrreryError, Result, ResultExt};
pub use models::{Body, ClassificationResult, ClockStatus, LightIntensity, OutputFormat, Star, StarSystem, TimeOfDay};
pub use physics::{animate_shadows, irradiance, shadow_length, survey, BodySurvey, Frame, FramePoint};
