//! Analytics configuration file support.
//!
//! Configuration is read from an `analytics.toml` file with a single
//! `[analytics]` table:
//!
//! ```toml
//! [analytics]
//! parse_policy = "strict"
//! month_time_zone = "local"
//! share_multiplier = 500.0
//! goal_rate = 70.0
//! ```
//!
//! Every key is optional; missing keys take the values of
//! [`AnalyticsConfig::default`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::time::MonthZone;

/// How aggregations react to a malformed time or date in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Fail the whole call with the first parse error.
    #[default]
    Strict,
    /// Let a bad time become a `NaN` duration and a bad date match no month.
    Lenient,
}

/// Settings shared by every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub parse_policy: ParsePolicy,
    /// Zone used to read the month of a treatment date.
    pub month_time_zone: MonthZone,
    /// Factor applied to a patient's fraction of total time. The dashboards
    /// were built against 500; 100 gives a true percentage.
    pub share_multiplier: f64,
    /// Income credited for each visit in the `20+ min` bucket.
    pub goal_rate: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            parse_policy: ParsePolicy::Strict,
            month_time_zone: MonthZone::Local,
            share_multiplier: 500.0,
            goal_rate: 70.0,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    analytics: AnalyticsConfig,
}

impl AnalyticsConfig {
    /// Default settings with the lenient parse policy.
    pub fn lenient() -> Self {
        Self {
            parse_policy: ParsePolicy::Lenient,
            ..Self::default()
        }
    }

    pub fn with_parse_policy(mut self, policy: ParsePolicy) -> Self {
        self.parse_policy = policy;
        self
    }

    pub fn with_month_time_zone(mut self, zone: MonthZone) -> Self {
        self.month_time_zone = zone;
        self
    }

    pub fn with_share_multiplier(mut self, multiplier: f64) -> Self {
        self.share_multiplier = multiplier;
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(AnalyticsConfig)` if the file was read, parsed and validated
    /// * `Err(AnalyticsError::ConfigurationError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AnalyticsError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AnalyticsResult<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| {
            AnalyticsError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;

        file.analytics.validate()?;
        Ok(file.analytics)
    }

    /// Load configuration from the first `analytics.toml` found in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> AnalyticsResult<Self> {
        let search_paths = [
            PathBuf::from("analytics.toml"),
            PathBuf::from("rust_backend/analytics.toml"),
            PathBuf::from("../analytics.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading analytics configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(AnalyticsError::ConfigurationError(
            "No analytics.toml found in standard locations".to_string(),
        ))
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if !self.share_multiplier.is_finite() {
            return Err(AnalyticsError::ConfigurationError(format!(
                "share_multiplier must be finite, got {}",
                self.share_multiplier
            )));
        }
        if !self.goal_rate.is_finite() {
            return Err(AnalyticsError::ConfigurationError(format!(
                "goal_rate must be finite, got {}",
                self.goal_rate
            )));
        }
        Ok(())
    }

    /// Render as TOML in the file layout [`from_toml_str`](Self::from_toml_str) reads.
    pub fn to_toml_string(&self) -> AnalyticsResult<String> {
        toml::to_string(&ConfigFile {
            analytics: self.clone(),
        })
        .map_err(|e| AnalyticsError::ConfigurationError(format!("Failed to render config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.parse_policy, ParsePolicy::Strict);
        assert_eq!(config.month_time_zone, MonthZone::Local);
        assert_eq!(config.share_multiplier, 500.0);
        assert_eq!(config.goal_rate, 70.0);
    }

    #[test]
    fn test_full_file() {
        let config = AnalyticsConfig::from_toml_str(
            r#"
            [analytics]
            parse_policy = "lenient"
            month_time_zone = "+02:00"
            share_multiplier = 100.0
            goal_rate = 85.5
            "#,
        )
        .unwrap();

        assert_eq!(config.parse_policy, ParsePolicy::Lenient);
        assert_eq!(
            config.month_time_zone,
            MonthZone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap())
        );
        assert_eq!(config.share_multiplier, 100.0);
        assert_eq!(config.goal_rate, 85.5);
    }

    #[test]
    fn test_partial_and_empty_files() {
        let config = AnalyticsConfig::from_toml_str("[analytics]\nmonth_time_zone = \"utc\"\n").unwrap();
        assert_eq!(config.month_time_zone, MonthZone::Utc);
        assert_eq!(config.share_multiplier, 500.0);

        assert_eq!(AnalyticsConfig::from_toml_str("").unwrap(), AnalyticsConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            "[analytics]\nparse_policy = \"sloppy\"\n",
            "[analytics]\nmonth_time_zone = \"moon\"\n",
            "[analytics]\nshare_multiplier = nan\n",
            "[analytics]\ngoal_rate = inf\n",
        ];
        for content in bad {
            assert!(
                matches!(
                    AnalyticsConfig::from_toml_str(content),
                    Err(AnalyticsError::ConfigurationError(_))
                ),
                "{content:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalyticsConfig::lenient()
            .with_month_time_zone(MonthZone::Utc)
            .with_share_multiplier(100.0);
        let text = config.to_toml_string().unwrap();
        assert_eq!(AnalyticsConfig::from_toml_str(&text).unwrap(), config);
    }
}
