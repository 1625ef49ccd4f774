//! Selection criteria supplied once per invocation.

use serde::{Deserialize, Serialize};

use crate::InstanceId;

/// Filters and selectors narrowing the fleet to one instance.
///
/// Supplied once per invocation and immutable for its duration. All fields
/// are optional; an empty criteria set resolves to the first instance in
/// snapshot order (non-interactive) or a one-of-N prompt (interactive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCriteria {
    /// Explicit instance id; takes priority over every other selector and
    /// is mutually exclusive with interactive selection
    pub instance_id: Option<InstanceId>,
    /// Hard region filter
    pub region: Option<String>,
    /// Hard process-group filter
    pub process_group: Option<String>,
}

impl SelectionCriteria {
    /// Criteria selecting one instance by id.
    pub fn by_id(id: impl Into<InstanceId>) -> Self {
        Self {
            instance_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Restrict candidates to a region.
    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Restrict candidates to a process group.
    pub fn in_process_group(mut self, group: impl Into<String>) -> Self {
        self.process_group = Some(group.into());
        self
    }
}
