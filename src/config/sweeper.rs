//! Auto-delete sweeper configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Background sweeper that removes ideas past their retention window
#[derive(Debug, Clone, Deserialize)]
pub struct SweeperConfig {
    /// Run the sweeper at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between passes
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

impl SweeperConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_secs: default_interval(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_interval() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_hourly() {
        let config = SweeperConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval(), Duration::from_secs(3600));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config = SweeperConfig {
            interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSweepInterval));
    }
}
