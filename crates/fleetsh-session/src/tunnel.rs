//! Consumed tunnel provider interface.
//!
//! The tunnel itself (key exchange, transport crypto) lives in the
//! surrounding tool; fleetsh only dials through it and waits for names to
//! become resolvable inside the fleet's private network.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

use fleetsh_core::Result;

/// Byte stream opened through the tunnel.
pub trait TunnelIo: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> TunnelIo for T {}

/// Boxed tunnel connection handed to the remote-shell layer.
pub type TunnelStream = Box<dyn TunnelIo>;

/// An authenticated path into the fleet's private address space.
///
/// Shared, read-only infrastructure: fleetsh uses it, never mutates it.
#[async_trait]
pub trait TunnelDialer: Send + Sync {
    /// Block until `host` resolves through the tunnel's DNS, bounded by
    /// `timeout`.
    async fn wait_for_dns(&self, org: &str, host: &str, timeout: Duration) -> Result<()>;

    /// Open a connection to `addr` inside the fleet's network.
    async fn dial(&self, addr: &str) -> Result<TunnelStream>;
}

/// Whether `addr` is a raw IPv6 literal, which skips the DNS wait.
pub fn is_ipv6_literal(addr: &str) -> bool {
    addr.parse::<std::net::Ipv6Addr>().is_ok()
}
