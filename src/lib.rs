//! Workspace umbrella crate.
//!
//! Host applications can depend on `canta-workspace` with the default
//! `service` feature and reach the whole core through [`service`]
//! (re-exported `core-service`), without wiring each member crate
//! individually.

#[cfg(feature = "service")]
pub use core_service as service;
