//! Consumed fleet and lifecycle interfaces.
//!
//! These traits are the narrow contracts through which the resolution
//! pipeline talks to the surrounding tool's API clients. fleetsh consumes
//! them; it never implements a wire transport.

use async_trait::async_trait;

use fleetsh_core::{Instance, InstanceId, InstanceState, Result};

/// Fleet query client: one application identity in, a snapshot out.
///
/// The returned order is meaningful: non-interactive resolution picks the
/// first remaining candidate in snapshot order.
#[async_trait]
pub trait FleetQuery: Send + Sync {
    /// List the current instances of `app` with their metadata.
    async fn list_instances(&self, app: &str) -> Result<Vec<Instance>>;
}

/// Lifecycle controller for a single instance.
#[async_trait]
pub trait LifecycleControl: Send + Sync {
    /// Issue a start request. Must be safe to call at most once per
    /// invocation; the ensurer never issues it against a starting instance.
    async fn start(&self, id: &InstanceId) -> Result<()>;

    /// Observe the instance's current lifecycle state.
    async fn state(&self, id: &InstanceId) -> Result<InstanceState>;
}
