//! Phasor Backend - reports identity and health facts of the running process
//!
//! `GET /instance/info` returns version, hostname, uptime, runtime version and timestamp.
//! The dashboard polls it once per tile.

pub mod config;
pub mod http;
pub mod instance;

pub use http::{build_router, AppOptions};
pub use instance::{InstanceInfo, InstanceService, INSTANCE_INFO_PATH};
