//! Editor configuration, loaded from JSON

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::{Error, Result};
use crate::animation::clip::{DEFAULT_INTERVAL, DEFAULT_NAME};
use crate::export::ExportNaming;

/// Preview refresh rate used when none is configured
pub const DEFAULT_REFRESH_RATE_HZ: f32 = 60.0;

const MAX_REFRESH_PERIOD: Duration = Duration::from_secs(3600);

/// Editor session settings. Missing fields fall back to defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Name given to a fresh animation
    pub default_name: String,
    /// Interval given to a fresh animation, in ticks
    pub default_interval: f64,
    /// Display refresh rate driving preview playback (Hz)
    pub refresh_rate_hz: f32,
    /// Naming of exported files
    pub export_naming: ExportNaming,
    /// Directory exports are written to
    pub export_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_NAME.to_string(),
            default_interval: DEFAULT_INTERVAL,
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            export_naming: ExportNaming::AnimationName,
            export_dir: PathBuf::from("."),
        }
    }
}

impl EditorConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: EditorConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.refresh_rate_hz.is_finite() && self.refresh_rate_hz > 0.0) {
            return Err(Error::Config(format!(
                "refresh_rate_hz must be positive, got {}",
                self.refresh_rate_hz
            )));
        }
        if !self.default_interval.is_finite() {
            return Err(Error::Config("default_interval must be finite".into()));
        }
        Ok(())
    }

    /// Time between two preview refreshes, between 1us and one hour
    pub fn refresh_period(&self) -> Duration {
        let hz = if self.refresh_rate_hz.is_finite() && self.refresh_rate_hz > 0.0 {
            self.refresh_rate_hz
        } else {
            DEFAULT_REFRESH_RATE_HZ
        };
        Duration::try_from_secs_f64(1.0 / f64::from(hz))
            .unwrap_or(MAX_REFRESH_PERIOD)
            .clamp(Duration::from_micros(1), MAX_REFRESH_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.default_name, "animation");
        assert_eq!(config.default_interval, 10.0);
        assert_eq!(config.export_naming, ExportNaming::AnimationName);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"default_name": "wave", "export_naming": {"fixed": "stand"}}"#)
                .unwrap();
        assert_eq!(config.default_name, "wave");
        assert_eq!(config.export_naming, ExportNaming::Fixed("stand".into()));
        assert_eq!(config.refresh_rate_hz, DEFAULT_REFRESH_RATE_HZ);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("nested").join("editor.json");

        let config = EditorConfig {
            default_interval: 4.0,
            refresh_rate_hz: 30.0,
            ..Default::default()
        };
        config.save(&path).expect("save failed");

        let loaded = EditorConfig::load(&path).expect("load failed");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_rejects_zero_refresh_rate() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("editor.json");
        std::fs::write(&path, r#"{"refresh_rate_hz": 0}"#).unwrap();

        assert!(matches!(EditorConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_refresh_period() {
        let config = EditorConfig {
            refresh_rate_hz: 50.0,
            ..Default::default()
        };
        assert_eq!(config.refresh_period(), Duration::from_millis(20));
    }
}
