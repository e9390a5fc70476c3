//! Prediction engine configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/acre/config/predictions.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../../config/predictions.toml");

/// Tunables for the prediction engine
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionConfig {
    /// Minimum observed events of a type before a forecast is made
    pub min_events: usize,
    /// Event count at which the sample score reaches 1.0
    pub sample_saturation: usize,
    /// Weight of the sample score in the blended confidence
    pub sample_weight: f64,
    /// Weight of the regularity score in the blended confidence
    pub regularity_weight: f64,
    pub confidence_floor: u8,
    pub confidence_ceiling: u8,
    /// Smallest gap (days) used when extrapolating the next date
    pub min_interval_days: i64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            min_events: 2,
            sample_saturation: 5,
            sample_weight: 0.5,
            regularity_weight: 0.5,
            confidence_floor: 5,
            confidence_ceiling: 95,
            min_interval_days: 1,
        }
    }
}

impl PredictionConfig {
    /// Load from an explicit path, the default override location, or the embedded defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) => {
                if path.exists() {
                    read_config(path)?
                } else {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
            }
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => read_config(&default_path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::from_toml(&content)
    }

    /// Parse config from TOML content, keeping defaults for missing keys
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(evidence) = raw.evidence {
            if let Some(min_events) = evidence.min_events {
                config.min_events = min_events;
            }
            if let Some(saturation) = evidence.sample_saturation {
                config.sample_saturation = saturation;
            }
        }

        if let Some(confidence) = raw.confidence {
            if let Some(w) = confidence.sample_weight {
                config.sample_weight = w;
            }
            if let Some(w) = confidence.regularity_weight {
                config.regularity_weight = w;
            }
            if let Some(floor) = confidence.floor {
                config.confidence_floor = floor;
            }
            if let Some(ceiling) = confidence.ceiling {
                config.confidence_ceiling = ceiling;
            }
        }

        if let Some(interval) = raw.interval {
            if let Some(days) = interval.min_interval_days {
                config.min_interval_days = days;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.min_events < 2 {
            return Err(Error::Config(
                "evidence.min_events must be at least 2".to_string(),
            ));
        }
        if self.sample_saturation < 2 {
            return Err(Error::Config(
                "evidence.sample_saturation must be at least 2".to_string(),
            ));
        }
        if self.sample_weight < 0.0 || self.regularity_weight < 0.0 {
            return Err(Error::Config(
                "confidence weights cannot be negative".to_string(),
            ));
        }
        if self.sample_weight + self.regularity_weight <= 0.0 {
            return Err(Error::Config(
                "confidence weights must sum to a positive value".to_string(),
            ));
        }
        if self.confidence_ceiling > 100 || self.confidence_floor > self.confidence_ceiling {
            return Err(Error::Config(format!(
                "confidence bounds must satisfy floor <= ceiling <= 100 (got {}..{})",
                self.confidence_floor, self.confidence_ceiling
            )));
        }
        if self.min_interval_days < 1 {
            return Err(Error::Config(
                "interval.min_interval_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("acre").join("config").join("predictions.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config {}: {}", path.display(), e))
    })
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    evidence: Option<RawEvidence>,
    confidence: Option<RawConfidence>,
    interval: Option<RawInterval>,
}

#[derive(Debug, Deserialize)]
struct RawEvidence {
    min_events: Option<usize>,
    sample_saturation: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawConfidence {
    sample_weight: Option<f64>,
    regularity_weight: Option<f64>,
    floor: Option<u8>,
    ceiling: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct RawInterval {
    min_interval_days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let config = PredictionConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, PredictionConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = PredictionConfig::from_toml(
            r#"
            [confidence]
            ceiling = 90
            "#,
        )
        .unwrap();
        assert_eq!(config.confidence_ceiling, 90);
        assert_eq!(config.confidence_floor, 5);
        assert_eq!(config.min_events, 2);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = PredictionConfig::from_toml("").unwrap();
        assert_eq!(config, PredictionConfig::default());
    }

    #[test]
    fn test_unknown_sections_ignored() {
        let config = PredictionConfig::from_toml(
            r#"
            [display]
            theme = "dark"
            "#,
        )
        .unwrap();
        assert_eq!(config, PredictionConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = PredictionConfig::from_toml("[evidence\nmin_events = ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let result = PredictionConfig::from_toml(
            r#"
            [confidence]
            floor = 80
            ceiling = 20
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_single_event_minimum() {
        let result = PredictionConfig::from_toml(
            r#"
            [evidence]
            min_events = 1
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = PredictionConfig::load(Some(Path::new("/nonexistent/acre/predictions.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.toml");
        fs::write(&path, "[evidence]\nmin_events = 3\n").unwrap();

        let config = PredictionConfig::load(Some(&path)).unwrap();
        assert_eq!(config.min_events, 3);
    }
}
