//! Fleet instance types: identity, lifecycle state, health checks, containers.

use serde::{Deserialize, Serialize};

/// Opaque, fleet-unique identifier for an instance.
///
/// Ids are minted by the fleet API; fleetsh never generates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InstanceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for InstanceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse lifecycle state of an instance, independent of reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    /// Not running; a start request is required before connecting
    Stopped,
    /// Start requested, not yet connectable
    Starting,
    /// Running and connectable
    Started,
}

/// Outcome of a single named health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Check is passing
    Passing,
    /// Check is failing
    Failing,
    /// Check has not reported yet
    Unknown,
}

/// A named health check result reported for an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Check name, unique within the instance
    pub name: String,
    /// Current status
    pub status: CheckStatus,
    /// Free-text check output
    #[serde(default)]
    pub output: String,
}

/// One named process unit declared inside an instance's configuration.
///
/// Containers are ordered by declaration order; that order is what
/// non-interactive container resolution falls back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubContainer {
    /// Container name, unique within the instance
    pub name: String,
}

/// A point-in-time view of one workload instance within a fleet.
///
/// Owned by the fleet query client's snapshot; the resolution pipeline holds
/// a read-only copy for the duration of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Fleet-unique identity
    pub id: InstanceId,
    /// Display name
    pub name: String,
    /// Region code
    pub region: String,
    /// Private network address inside the fleet's network
    pub private_ip: String,
    /// Lifecycle state
    pub state: InstanceState,
    /// The controlling supervisor cannot currently observe this instance.
    /// Orthogonal to `state`; does not block resolution.
    #[serde(default)]
    pub unreachable: bool,
    /// Declared sub-containers, in declaration order
    #[serde(default)]
    pub containers: Vec<SubContainer>,
    /// Health check results
    #[serde(default)]
    pub checks: Vec<HealthCheck>,
    /// Process-group label, when the fleet is split into groups
    #[serde(default)]
    pub process_group: Option<String>,
}

impl Instance {
    /// Derive the role token from a health check named "role".
    ///
    /// Returns the check's output when it is passing, the literal `"error"`
    /// when it is failing or unknown, and `None` when no such check exists.
    pub fn role(&self) -> Option<String> {
        self.checks.iter().find(|c| c.name == "role").map(|check| {
            if check.status == CheckStatus::Passing {
                check.output.clone()
            } else {
                "error".to_string()
            }
        })
    }

    /// Process-group label, defaulting to empty when the fleet is ungrouped.
    pub fn process_group(&self) -> &str {
        self.process_group.as_deref().unwrap_or("")
    }

    /// Whether the instance is connectable right now.
    pub fn is_started(&self) -> bool {
        self.state == InstanceState::Started
    }
}
