//! Lifecycle ensurer: guarantee an instance is started before it is dialed.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use fleetsh_core::{Error, Instance, InstanceState, Result};

use crate::api::LifecycleControl;

/// Bounds for the start wait.
#[derive(Debug, Clone)]
pub struct EnsureOptions {
    /// Maximum time to wait for started state
    pub timeout: Duration,
    /// Interval between state polls
    pub poll_interval: Duration,
}

impl Default for EnsureOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Ensure `instance` is in started state, starting it if necessary.
///
/// A started instance is a no-op: no start request, no polling. A stopped
/// instance gets exactly one start request; a starting instance gets none
/// (the request is idempotent by omission). Either way the ensurer then
/// polls the controller until the state becomes started, the timeout
/// elapses ([`Error::StartupTimeout`]), or the invocation is cancelled
/// ([`Error::Cancelled`], rechecked on every poll tick).
///
/// This is a precondition gate for the session driver; it is never invoked
/// again mid-session.
pub async fn ensure_started<L: LifecycleControl + ?Sized>(
    controller: &L,
    instance: &Instance,
    options: &EnsureOptions,
    cancel: &CancellationToken,
) -> Result<()> {
    if instance.is_started() {
        debug!("instance {} already started", instance.id);
        return Ok(());
    }

    if instance.state == InstanceState::Stopped {
        info!("Starting instance {}..", instance.id);
        controller.start(&instance.id).await?;
    } else {
        debug!(
            "instance {} already starting, waiting for started state",
            instance.id
        );
    }

    let start = Instant::now();
    loop {
        let elapsed = start.elapsed();
        if elapsed >= options.timeout {
            return Err(Error::StartupTimeout {
                instance: instance.id.clone(),
                elapsed,
            });
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            _ = tokio::time::sleep(options.poll_interval) => {}
        }

        if controller.state(&instance.id).await? == InstanceState::Started {
            debug!("instance {} reached started state", instance.id);
            return Ok(());
        }
    }
}
