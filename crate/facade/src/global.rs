//! The process-wide facade.
//!
//! Register a backend once during bootstrap, before concurrent logging
//! starts. Until then, records follow the configured
//! [`UnregisteredPolicy`](crate::UnregisteredPolicy).

use std::sync::Arc;

use crate::{CallSite, Details, FacadeConfig, LogBackend, LogFacade};

static FACADE: LogFacade = LogFacade::new();

#[must_use]
pub fn facade() -> &'static LogFacade {
    &FACADE
}

pub fn configure(config: &FacadeConfig) {
    FACADE.configure(config);
}

pub fn set_backend(backend: Arc<dyn LogBackend>) -> Option<Arc<dyn LogBackend>> {
    FACADE.set_backend(backend)
}

pub fn clear_backend() -> Option<Arc<dyn LogBackend>> {
    FACADE.clear_backend()
}

pub fn log_verbose(message: impl Into<String>, site: CallSite) {
    FACADE.verbose(message, site);
}

pub fn log_debug(message: impl Into<String>, site: CallSite) {
    FACADE.debug(message, site);
}

pub fn log_info(message: impl Into<String>, site: CallSite) {
    FACADE.info(message, site);
}

pub fn log_warning(message: impl Into<String>, site: CallSite) {
    FACADE.warning(message, site);
}

pub fn log_error(message: impl Into<String>, details: Option<Details>, site: CallSite) {
    FACADE.error(message, details, site);
}

pub fn log_failure(message: impl Into<String>, details: Option<Details>, site: CallSite) {
    FACADE.failure(message, details, site);
}
