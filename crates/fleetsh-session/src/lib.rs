//! # fleetsh-session
//!
//! Session driver for fleetsh.
//!
//! This crate provides:
//! - The consumed tunnel dialer and remote-shell session interfaces
//! - Address precedence and PTY allocation policy
//! - Scoped local terminal (raw mode) ownership
//! - The full-duplex I/O pump loop driving one interactive session
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on fleetsh-core and is
//! consumed by the fleetsh entry point. The tunnel and wire protocol
//! themselves are external collaborators; only their contracts live here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
pub mod policy;
pub mod shell;
pub mod terminal;
pub mod tunnel;

pub use driver::{connect, run, ConnectOptions, SessionIo};
pub use policy::{decide_pty, resolve_address, PtyDecision, SHELL_PTY_ADVISORY};
pub use shell::{PtyRequest, RemoteShell, SessionChannels, SessionRequest, ShellSession};
pub use terminal::{term_env, RawModeGuard};
pub use tunnel::{is_ipv6_literal, TunnelDialer, TunnelIo, TunnelStream};
