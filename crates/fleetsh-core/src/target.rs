//! Connection target resolved by the pipeline.

use serde::{Deserialize, Serialize};

/// Everything the session driver needs to dial and run one session.
///
/// Produced by the resolution pipeline, consumed by the session driver;
/// bound to exactly one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTarget {
    /// Resolved address to dial: IP literal or DNS name
    pub address: String,
    /// Container to attach to; `None` means the whole instance
    pub container: Option<String>,
    /// Whether to allocate a pseudo-terminal
    pub alloc_pty: bool,
    /// Remote command; `None` means an interactive shell
    pub command: Option<String>,
}

impl ConnectionTarget {
    /// An interactive whole-instance shell target for `address`.
    pub fn shell(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            container: None,
            alloc_pty: true,
            command: None,
        }
    }
}
