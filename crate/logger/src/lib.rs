//! # mxlog logger
//!
//! Installs the global `tracing` subscriber that receives records forwarded by
//! `mxlog::TracingBackend`, and the output of the crates themselves.
//!
//! - [`log_init`]: stdout only, for tests and small tools
//! - [`tracing_init`]: full configuration, returning guards to keep alive
mod error;
mod log_utils;
mod tracing;

pub use error::LoggerError;
pub use log_utils::log_init;
pub use tracing::{tracing_init, LoggingGuards, TracingConfig};
