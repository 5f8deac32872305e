//! CLI configuration management

use anyhow::{Context, Result};
use percentile_engine::{MAX_METRICS, MIN_METRICS};
use receiving_stats::Metric;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for the radar CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Stats file location
    pub data: DataConfig,

    /// Comparison defaults
    pub comparison: ComparisonConfig,

    /// Leaderboard defaults
    pub leaders: LeadersConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the Next Gen receiving stats CSV
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/nextgen_receiving_stats.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Metrics used when `compare` is given none (column names or labels)
    pub default_metrics: Vec<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            default_metrics: [
                Metric::Yards,
                Metric::Targets,
                Metric::Receptions,
                Metric::ReceivingTouchdowns,
                Metric::CatchPercentage,
            ]
            .iter()
            .map(|m| m.column().to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadersConfig {
    /// Rows shown by `leaders` when `--limit` is absent
    pub limit: usize,
}

impl Default for LeadersConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    pub level: String,

    /// Log format (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl RadarConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;
        let config: RadarConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {path:?}"))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {path:?}"))?;
        Ok(())
    }

    /// Apply `RADAR_*` overrides from a variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("RADAR_DATA_PATH") {
            self.data.path = PathBuf::from(path);
        }

        if let Some(level) = lookup("RADAR_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("RADAR_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Some(limit) = lookup("RADAR_LEADERS_LIMIT") {
            self.leaders.limit = limit.parse().unwrap_or(self.leaders.limit);
        }
    }

    /// Check that defaults can actually drive a comparison
    pub fn validate(&self) -> Result<()> {
        match self.logging.format.as_str() {
            "pretty" | "json" | "compact" => {}
            other => anyhow::bail!("Invalid log format: {other}"),
        }

        let count = self.comparison.default_metrics.len();
        if !(MIN_METRICS..=MAX_METRICS).contains(&count) {
            anyhow::bail!(
                "default_metrics must list {MIN_METRICS}-{MAX_METRICS} metrics (got {count})"
            );
        }
        for name in &self.comparison.default_metrics {
            name.parse::<Metric>().with_context(|| format!("Invalid default metric: {name}"))?;
        }

        if self.leaders.limit == 0 {
            anyhow::bail!("leaders.limit must be at least 1");
        }

        Ok(())
    }
}

/// Load configuration: file (when given), then environment, then validate
pub fn load_config(path: Option<&Path>) -> Result<RadarConfig> {
    let mut config = match path {
        Some(path) => RadarConfig::load_from_file(path)?,
        None => RadarConfig::default(),
    };

    config.apply_overrides(|key| std::env::var(key).ok());
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = RadarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.comparison.default_metrics.len(), 5);
        assert_eq!(config.comparison.default_metrics[3], "Receiving Touchdowns");
        assert_eq!(config.leaders.limit, 10);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("radar.toml");

        let mut config = RadarConfig::default();
        config.data.path = PathBuf::from("/tmp/stats.csv");
        config.leaders.limit = 25;
        config.save_to_file(&path).unwrap();

        assert_eq!(RadarConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("radar.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = RadarConfig::load_from_file(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");
        assert_eq!(config.data, DataConfig::default());
    }

    #[test]
    fn overrides_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RADAR_DATA_PATH", "week.csv"),
            ("RADAR_LOG_FORMAT", "json"),
            ("RADAR_LEADERS_LIMIT", "not-a-number"),
        ]);

        let mut config = RadarConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data.path, PathBuf::from("week.csv"));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.leaders.limit, 10);
    }

    #[test]
    fn rejects_bad_defaults() {
        let mut config = RadarConfig::default();
        config.comparison.default_metrics = vec!["Yards".to_string(), "Targets".to_string()];
        assert!(config.validate().is_err());

        let mut config = RadarConfig::default();
        config.comparison.default_metrics[0] = "Fantasy Points".to_string();
        assert!(config.validate().is_err());

        let mut config = RadarConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = RadarConfig::default();
        config.leaders.limit = 0;
        assert!(config.validate().is_err());
    }
}
