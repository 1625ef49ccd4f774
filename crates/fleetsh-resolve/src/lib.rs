//! # fleetsh-resolve
//!
//! Target, lifecycle and container resolution for fleetsh.
//!
//! This crate provides:
//! - Fleet filtering and disambiguation down to exactly one instance
//! - The lifecycle ensurer (start + bounded, cancel-aware wait)
//! - Container resolution within an instance
//! - The interactive selection capability and the consumed fleet/lifecycle
//!   traits
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on fleetsh-core and is
//! consumed by the fleetsh entry point.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod container;
pub mod lifecycle;
pub mod prompt;
pub mod resolver;

pub use api::{FleetQuery, LifecycleControl};
pub use container::resolve_container;
pub use lifecycle::{ensure_started, EnsureOptions};
pub use prompt::{Prompter, ScriptedPrompter, TermPrompter};
pub use resolver::resolve_instance;
