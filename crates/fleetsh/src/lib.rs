//! # fleetsh
//!
//! Attach an interactive console session to one running workload instance
//! inside a fleet, over an authenticated tunnel.
//!
//! ## Overview
//!
//! The crate exposes a single entry point, [`console::run_console`], that
//! runs the whole pipeline for one operator invocation:
//!
//! - Filter the fleet snapshot down to exactly one instance
//! - Ensure that instance is started, triggering a start when needed
//! - Pick the sub-container to attach to
//! - Dial the target through the tunnel and pump terminal I/O until the
//!   remote session ends
//!
//! The CLI surface, the fleet API transport, the tunnel and the wire-level
//! shell protocol are external collaborators, consumed through the traits
//! in [`fleetsh_resolve`] and [`fleetsh_session`].
//!
//! ## Architecture
//!
//! This is Layer 2 - the thin orchestration layer that ties together:
//! - fleetsh-core: core types, errors, configuration
//! - fleetsh-resolve: target, lifecycle and container resolution
//! - fleetsh-session: the session driver

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod console;
pub mod signal;

pub use console::{run_console, Collaborators, ConsoleOutcome, ConsoleParams};
pub use signal::cancel_on_interrupt;
