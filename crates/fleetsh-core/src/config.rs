//! Configuration types for fleetsh.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Console configuration loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Lifecycle wait settings
    pub lifecycle: LifecycleSettings,
    /// Tunnel settings
    pub tunnel: TunnelSettings,
    /// Session settings
    pub session: SessionSettings,
}

impl ConsoleConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: ConsoleConfig =
            serde_yaml::from_str(yaml).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        if self.lifecycle.start_timeout_secs == 0 {
            return Err(crate::Error::Config(
                "lifecycle.start_timeout_secs must be > 0".to_string(),
            ));
        }
        if self.lifecycle.poll_interval_ms == 0 {
            return Err(crate::Error::Config(
                "lifecycle.poll_interval_ms must be > 0".to_string(),
            ));
        }
        if self.tunnel.dns_wait_timeout_secs == 0 {
            return Err(crate::Error::Config(
                "tunnel.dns_wait_timeout_secs must be > 0".to_string(),
            ));
        }
        if self.session.username.is_empty() {
            return Err(crate::Error::Config(
                "session.username must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the lifecycle ensurer's bounded start wait.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleSettings {
    /// Maximum time to wait for an instance to reach started state, seconds
    pub start_timeout_secs: u64,
    /// Interval between state polls, milliseconds
    pub poll_interval_ms: u64,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            start_timeout_secs: 60,
            poll_interval_ms: 500,
        }
    }
}

impl LifecycleSettings {
    /// Start timeout as a duration.
    pub fn start_timeout(&self) -> Duration {
        Duration::from_secs(self.start_timeout_secs)
    }

    /// Poll interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Settings for the tunnel's DNS readiness wait.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelSettings {
    /// Maximum time to wait for a name to become resolvable, seconds
    pub dns_wait_timeout_secs: u64,
}

impl Default for TunnelSettings {
    fn default() -> Self {
        Self {
            dns_wait_timeout_secs: 30,
        }
    }
}

impl TunnelSettings {
    /// DNS wait timeout as a duration.
    pub fn dns_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.dns_wait_timeout_secs)
    }
}

/// Settings for the remote session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Unix username to connect as
    pub username: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            username: "root".to_string(),
        }
    }
}
