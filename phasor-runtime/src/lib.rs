//! Phasor Runtime - service plumbing shared by the backend and the dashboard
//!
//! Provides:
//! - Structured logging setup driven by the `log_config` block of each service
//! - Request logging middleware with W3C trace id propagation
//! - Panic recovery middleware answering 500 instead of dropping the connection
//! - `/health/live` and `/health/ready` endpoints
//! - HTTP serving with graceful, time-bounded shutdown

pub mod health;
pub mod logging;
pub mod middleware;
pub mod server;

pub use health::HealthTracker;
pub use logging::{init_logging, LogConfig, LogFormat, LoggingError};
pub use middleware::{recover_panic, request_logger};
pub use server::{serve, serve_on, shutdown_signal, ServerOptions};
