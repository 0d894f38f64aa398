//! # mxlog
//!
//! A severity-tagged logging facade that decouples high-frequency call sites,
//! including foreign ones reached over the C ABI, from a swappable backend.
//!
//! Each call builds one immutable [`LogRecord`] from a message, a
//! [`CallSite`] captured by the caller and, for `error` and `failure` only,
//! optional structured [`Details`]. The record is delivered synchronously to
//! the registered [`LogBackend`]. Logging never fails from the caller's point
//! of view.
//!
//! ```rust-ignore
//! use std::sync::Arc;
//!
//! use mxlog::{call_site, details, log_error, set_backend, TracingBackend};
//!
//! set_backend(Arc::new(TracingBackend));
//! log_error("disk full", Some(details! { "path" => "/tmp/x" }), call_site!());
//! ```
mod backend;
mod call_site;
mod config;
mod details;
mod error;
mod facade;
pub mod ffi;
mod global;
mod record;
mod severity;

pub use backend::{CapturingBackend, LogBackend, TracingBackend, TRACING_TARGET};
pub use call_site::CallSite;
pub use config::{FacadeConfig, UnregisteredPolicy, CONF_ENV_VAR, DEFAULT_BUFFER_CAPACITY};
pub use details::{DetailValue, Details};
pub use error::{result::FacadeResult, FacadeError};
pub use facade::LogFacade;
pub use global::{
    clear_backend, configure, facade, log_debug, log_error, log_failure, log_info, log_verbose,
    log_warning, set_backend,
};
pub use record::LogRecord;
pub use severity::Severity;
