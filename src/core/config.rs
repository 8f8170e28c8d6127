//! Configuration loading
//!
//! A JSON file describes the star system, the clock readings and render
//! settings. Every section is optional; anything missing falls back to the
//! built-in Lumoria system and Tempora clocks.
//!
//! # Resolution Order
//!
//! 1. An explicit `--config` path (must exist)
//! 2. `./.orrery.json`
//! 3. `<user config dir>/orrery/config.json`
//! 4. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::parse_time;
use super::error::{OrreryError, Result, ResultExt};
use super::models::StarSystem;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = ".orrery.json";

/// Complete configuration file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub system: StarSystem,
    pub clocks: ClockConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            system: StarSystem::lumoria(),
            clocks: ClockConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

/// Reference time and readings to compare against it
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClockConfig {
    pub reference: String,
    pub readings: Vec<String>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            reference: "15:00".to_string(),
            readings: ["14:45", "15:05", "15:00", "14:40"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Drawing settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// SVG canvas width
    pub width: u32,
    /// SVG canvas height
    pub height: u32,
    /// Animation frames per orbit
    pub frames: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 300,
            frames: 5,
        }
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl Config {
    /// Parse and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(OrreryError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content).context(format!("loading {}", path.display()))
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Default lookup locations, most specific first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(LOCAL_CONFIG_FILE));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("orrery").join("config.json"));
        }
        paths
    }

    /// Resolve the active configuration using [`Config::search_paths`].
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        Self::resolve_in(explicit, &Self::search_paths())
    }

    /// Resolve against a custom list of candidate paths.
    pub fn resolve_in(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            info!(path = %path.display(), "using config");
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        for path in candidates {
            if path.is_file() {
                let config = Self::from_file(path)?;
                info!(path = %path.display(), "using discovered config");
                return Ok((config, ConfigSource::File(path.clone())));
            }
            debug!(path = %path.display(), "no config here");
        }

        info!("using built-in defaults");
        Ok((Self::default(), ConfigSource::Defaults))
    }

    /// Check bodies and the reference time.
    ///
    /// Readings are not checked; invalid readings are reported, not rejected.
    pub fn validate(&self) -> Result<()> {
        for body in &self.system.bodies {
            if !body.size.is_finite() || body.size <= 0.0 {
                return Err(OrreryError::invalid_config(format!(
                    "body {:?} must have a positive size, got {}",
                    body.name, body.size
                )));
            }
            if !body.distance.is_finite() || body.distance < 0.0 {
                return Err(OrreryError::invalid_config(format!(
                    "body {:?} must have a non-negative distance, got {}",
                    body.name, body.distance
                )));
            }
        }

        parse_time(&self.clocks.reference)
            .map(|_| ())
            .context("clocks.reference")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.system.name, "Lumoria System");
        assert_eq!(config.clocks.reference, "15:00");
        assert_eq!(config.clocks.readings.len(), 4);
        assert_eq!(config.render.width, 800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{"clocks": {"readings": ["1:00"]}}"#).unwrap();
        assert_eq!(config.clocks.reference, "15:00");
        assert_eq!(config.clocks.readings, vec!["1:00".to_string()]);
        assert_eq!(config.system, StarSystem::lumoria());
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let json = r#"{"system": {"name": "S", "bodies": [{"name": "Dust", "distance": 1, "size": 0}]}}"#;
        let err = Config::from_json(json).unwrap_err();
        assert!(matches!(err, OrreryError::InvalidConfig { .. }));
        assert!(err.to_string().contains("Dust"));
    }

    #[test]
    fn test_rejects_negative_distance() {
        let json = r#"{"system": {"name": "S", "bodies": [{"name": "Void", "distance": -1, "size": 3}]}}"#;
        assert!(Config::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_bad_reference() {
        let err = Config::from_json(r#"{"clocks": {"reference": "25:00"}}"#).unwrap_err();
        assert!(err.is_format_error());
        assert!(err.to_string().contains("clocks.reference"));
    }

    #[test]
    fn test_system_name_is_optional() {
        let config = Config::from_json(
            r#"{"system": {"bodies": [{"name": "Solo", "distance": 1, "size": 2}]}}"#,
        )
        .unwrap();
        assert_eq!(config.system.name, "Unnamed System");
        assert_eq!(config.system.bodies.len(), 1);
        assert!(config.system.stars.is_empty());
    }

    #[test]
    fn test_reference_must_be_a_clock_time() {
        // "now" is a command-line shorthand only
        let err = Config::from_json(r#"{"clocks": {"reference": "now"}}"#).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_invalid_readings_are_allowed() {
        let config = Config::from_json(r#"{"clocks": {"readings": ["bad"]}}"#).unwrap();
        assert_eq!(config.clocks.readings, vec!["bad".to_string()]);
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = Config::resolve_in(Some(Path::new("/nonexistent/orrery.json")), &[]).unwrap_err();
        assert!(matches!(err, OrreryError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_resolve_discovers_candidate() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        let present = dir.path().join("present.json");
        fs::write(&present, r#"{"render": {"frames": 2}}"#).unwrap();

        let (config, source) = Config::resolve_in(None, &[missing, present.clone()]).unwrap();
        assert_eq!(config.render.frames, 2);
        assert_eq!(source, ConfigSource::File(present));
    }

    #[test]
    fn test_resolve_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, source) = Config::resolve_in(None, &[dir.path().join("none.json")]).unwrap();
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_json_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
