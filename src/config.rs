use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

fn default_driver() -> String {
    "synthetic".to_string()
}

fn default_resolution() -> String {
    "hd720".to_string()
}

fn default_fps() -> u32 {
    60
}

fn default_confidence() -> f32 {
    40.0
}

/// Device settings, passed through to the capture driver uninterpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_driver")]
    pub driver: String,
    #[serde(default = "default_resolution")]
    pub resolution: String,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_confidence")]
    pub confidence_threshold: f32,
    /// Forces the object-tracking capability on even when no feature needs it.
    #[serde(default)]
    pub tracking: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            resolution: default_resolution(),
            fps: default_fps(),
            confidence_threshold: default_confidence(),
            tracking: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_record_path() -> String {
    "values.jsonl".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_record_path")]
    pub path: String,
    /// Object labels to record; empty records everything.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_record_path(),
            labels: Vec::new(),
        }
    }
}

fn default_min_distance() -> f32 {
    1.5
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Warn when the closest detected object comes nearer than this, in meters.
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_distance: default_min_distance(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub record: RecordConfig,
    #[serde(default)]
    pub alert: AlertConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from(DEFAULT_CONFIG_PATH)
        } else {
            tracing::debug!("no config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.camera.driver, "synthetic");
        assert_eq!(config.camera.fps, 60);
        assert!(!config.camera.tracking);
        assert!(config.overlay.enabled);
        assert!(!config.record.enabled);
        assert_eq!(config.alert.min_distance, 1.5);
    }

    #[test]
    fn sections_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            [camera]
            fps = 30
            tracking = true

            [record]
            enabled = true
            path = "out.jsonl"
            labels = ["person"]

            [alert]
            min_distance = 0.8
            "#,
        )
        .unwrap();

        assert_eq!(config.camera.fps, 30);
        assert!(config.camera.tracking);
        assert!(config.record.enabled);
        assert_eq!(config.record.path, "out.jsonl");
        assert_eq!(config.record.labels, vec!["person"]);
        assert_eq!(config.alert.min_distance, 0.8);
    }
}
