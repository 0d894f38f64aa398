//! Sinks the facade delegates to.
//!
//! A backend owns everything past delivery, including level filtering and
//! output. Failures inside a backend must be swallowed there.

mod capture;
mod tracing_backend;

pub use capture::CapturingBackend;
pub use tracing_backend::{TracingBackend, TRACING_TARGET};

use crate::LogRecord;

/// The single delegation point of the facade.
pub trait LogBackend: Send + Sync {
    fn deliver(&self, record: LogRecord);
}

impl<F> LogBackend for F
where
    F: Fn(LogRecord) + Send + Sync,
{
    fn deliver(&self, record: LogRecord) {
        self(record);
    }
}
