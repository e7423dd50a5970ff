//! Configuration loading for planner-analytics.
//!
//! Supports loading configuration from TOML files, with sensible defaults
//! for all settings.

use anyhow::{Context, Result};
use chrono::{FixedOffset, Local, Offset};
use planner_analytics_core::report::DEFAULT_ANOMALY_THRESHOLD;
use planner_analytics_core::{Period, WeekStart};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for planner-analytics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for transaction statistics.
    pub statistics: StatisticsConfig,
    /// Settings for task analytics.
    pub analytics: AnalyticsConfig,
    /// Where records are read from.
    pub data: DataConfig,
}

/// Configuration for transaction statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Decimal places reported averages and deviations are rounded to.
    pub decimal_places: u32,
    /// Deviation (in percent) above which a transaction is flagged.
    pub anomaly_threshold_percent: f64,
}

/// Configuration for task analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Period used when a command does not name one.
    pub default_period: Period,
    /// First day of a calendar week.
    pub week_start: WeekStart,
    /// Offset of the time zone days are taken in. The system offset is used if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

/// Configuration for the record source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON snapshot of planner records.
    pub snapshot: PathBuf,
    /// User queried when `--user` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            anomaly_threshold_percent: DEFAULT_ANOMALY_THRESHOLD,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_period: Period::All,
            week_start: WeekStart::Monday,
            utc_offset_minutes: None,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("planner-data.json"),
            user: None,
        }
    }
}

impl AnalyticsConfig {
    /// Offset days are bucketed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured offset is out of range.
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        match self.utc_offset_minutes {
            Some(minutes) => minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .with_context(|| format!("UTC offset out of range: {minutes} minutes")),
            None => Ok(Local::now().offset().fix()),
        }
    }
}

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".planner-analytics.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `.planner-analytics.toml` in the current
    /// directory, or use defaults if there is no such file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load_or_default() -> Result<Config> {
        let path = Path::new(DEFAULT_CONFIG_FILE);

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from the specified path, or try the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the specified file cannot be read or parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load_or_default(),
        }
    }
}
