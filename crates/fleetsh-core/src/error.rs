//! Error types for fleetsh.

use std::time::Duration;

use thiserror::Error;

use crate::InstanceId;

/// A filter dimension that eliminated every candidate instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDimension {
    /// The fleet snapshot itself was empty
    Fleet,
    /// The region filter matched nothing
    Region(String),
    /// The process-group filter matched nothing
    ProcessGroup(String),
}

impl std::fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterDimension::Fleet => write!(f, "no instances"),
            FilterDimension::Region(region) => write!(f, "no instances in region {region}"),
            FilterDimension::ProcessGroup(group) => {
                write!(f, "no instances in process group {group}")
            }
        }
    }
}

/// Main error type for fleetsh operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A filter eliminated all candidate instances
    #[error("app {app} has {dimension}")]
    NoMatch {
        /// Application the fleet belongs to
        app: String,
        /// Which filter emptied the candidate set
        dimension: FilterDimension,
    },

    /// An explicit instance id was combined with interactive selection
    #[error("an explicit instance id can't be combined with interactive selection")]
    ConflictingSelection,

    /// A named container or instance is absent
    #[error("{name} is not present in instance {instance}")]
    NotFound {
        /// The requested container or instance name
        name: String,
        /// The instance it was looked up in (or the fleet-wide id lookup)
        instance: String,
    },

    /// Bounded start wait exceeded
    #[error("instance {instance} did not reach started state within {elapsed:?}")]
    StartupTimeout {
        /// Instance that was being started
        instance: InstanceId,
        /// How long the ensurer waited
        elapsed: Duration,
    },

    /// Tunnel DNS wait or dial failed
    #[error("host unavailable at {addr}: {reason}")]
    Unreachable {
        /// Address that could not be reached
        addr: String,
        /// Underlying cause
        reason: String,
    },

    /// Remote session failed after establishment
    #[error("remote session: {0}")]
    Session(String),

    /// The invocation was cancelled; converted to a clean abort at the
    /// entry point, never shown to the operator as a failure
    #[error("operation cancelled")]
    Cancelled,

    /// Fleet query or lifecycle controller transport failure
    #[error("fleet api: {0}")]
    Api(String),

    /// Interactive prompt failure
    #[error("prompt: {0}")]
    Prompt(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error represents cancellation rather than failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
