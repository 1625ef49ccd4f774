//! # fleetsh-core
//!
//! Core types for fleetsh.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other fleetsh crates. It provides:
//!
//! - Instance types (identity, lifecycle state, health checks, containers)
//! - Selection criteria and connection targets
//! - Configuration
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other fleetsh crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod criteria;
pub mod error;
pub mod instance;
pub mod target;

pub use config::{ConsoleConfig, LifecycleSettings, SessionSettings, TunnelSettings};
pub use criteria::SelectionCriteria;
pub use error::{Error, FilterDimension, Result};
pub use instance::{CheckStatus, HealthCheck, Instance, InstanceId, InstanceState, SubContainer};
pub use target::ConnectionTarget;
