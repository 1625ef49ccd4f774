//! Interrupt-to-cancellation wiring.

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Cancel `token` when the process receives Ctrl-C.
///
/// The returned handle can be aborted once the invocation has finished,
/// restoring default interrupt behavior for the host.
pub fn cancel_on_interrupt(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling invocation");
            token.cancel();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_watcher_can_be_detached_without_cancelling() {
        let token = CancellationToken::new();
        let handle = cancel_on_interrupt(token.clone());
        handle.abort();
        assert!(!token.is_cancelled());
    }
}
