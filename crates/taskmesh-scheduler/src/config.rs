//! Configuration types for the registry.

use serde::Deserialize;
use std::time::Duration;

/// Worker registry configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Startup period during which new placements must be withheld, so
    /// tasks surviving a scheduler restart are not launched twice.
    #[serde(with = "serde_duration_secs")]
    pub initial_wait: Duration,
    /// Silence after which a worker is suspected lost.
    #[serde(with = "serde_duration_secs")]
    pub suspect_timeout: Duration,
    /// Silence after which a worker is declared lost.
    #[serde(with = "serde_duration_secs")]
    pub lost_timeout: Duration,
    /// Configuration generation workers are expected to run; older
    /// heartbeats get a stale-config directive.
    pub config_version: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_wait: Duration::from_secs(60),
            suspect_timeout: Duration::from_secs(15),
            lost_timeout: Duration::from_secs(60),
            config_version: 0,
        }
    }
}

/// Serde helper for Duration as seconds.
mod serde_duration_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.initial_wait, Duration::from_secs(60));
        assert_eq!(config.suspect_timeout, Duration::from_secs(15));
        assert_eq!(config.lost_timeout, Duration::from_secs(60));
        assert_eq!(config.config_version, 0);
    }

    #[test]
    fn suspect_precedes_lost() {
        let config = RegistryConfig::default();
        assert!(config.suspect_timeout < config.lost_timeout);
    }
}
