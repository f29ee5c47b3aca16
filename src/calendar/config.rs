use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Events shown per day before the rest are folded into an overflow count.
pub const DEFAULT_OVERFLOW_THRESHOLD: usize = 6;
/// Seconds between background refreshes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

fn default_overflow_threshold() -> usize {
    DEFAULT_OVERFLOW_THRESHOLD
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_refresh_on_focus() -> bool {
    true
}

/// Calendar display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_overflow_threshold")]
    pub overflow_threshold: usize,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            overflow_threshold: default_overflow_threshold(),
            refresh: RefreshConfig::default(),
        }
    }
}

impl CalendarConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overflow_threshold == 0 {
            return Err(ConfigError::InvalidOverflowThreshold { value: 0 });
        }
        self.refresh.validate()
    }
}

/// Background refresh settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_refresh_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_refresh_on_focus")]
    pub refresh_on_focus: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_refresh_interval_secs(),
            refresh_on_focus: default_refresh_on_focus(),
        }
    }
}

impl RefreshConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::InvalidRefreshInterval { value: 0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalendarConfig::default();
        assert_eq!(config.overflow_threshold, 6);
        assert_eq!(config.refresh.interval_secs, 30);
        assert!(config.refresh.refresh_on_focus);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: CalendarConfig = serde_json::from_str(r#"{"refresh": {"interval_secs": 10}}"#).unwrap();
        assert_eq!(config.overflow_threshold, 6);
        assert_eq!(config.refresh.interval_secs, 10);
        assert!(config.refresh.refresh_on_focus);

        let config: CalendarConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CalendarConfig::default());
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = CalendarConfig {
            overflow_threshold: 0,
            ..CalendarConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidOverflowThreshold { value: 0 })
        );

        let config = CalendarConfig {
            refresh: RefreshConfig {
                interval_secs: 0,
                refresh_on_focus: false,
            },
            ..CalendarConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRefreshInterval { value: 0 })
        );
    }
}
