use tracing::{event, Level};

use crate::{LogBackend, LogRecord, Severity};

/// Target of every event emitted by [`TracingBackend`].
pub const TRACING_TARGET: &str = "mxlog";

macro_rules! emit {
    ($level:expr, $record:expr, $details:expr $(, $field:ident = $value:expr)?) => {
        event!(
            target: TRACING_TARGET,
            $level,
            file = $record.site().file.as_str(),
            function = $record.site().function.as_str(),
            line = $record.site().line,
            details = $details,
            $($field = $value,)?
            "{}",
            $record.message()
        )
    };
}

/// Forwards records into the `tracing` ecosystem.
///
/// Failures are mapped to `ERROR` events carrying `failure = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl LogBackend for TracingBackend {
    fn deliver(&self, record: LogRecord) {
        let details = record.details().map(crate::Details::to_json_string);
        let details = details.as_deref();
        match record.severity() {
            Severity::Verbose => emit!(Level::TRACE, record, details),
            Severity::Debug => emit!(Level::DEBUG, record, details),
            Severity::Info => emit!(Level::INFO, record, details),
            Severity::Warning => emit!(Level::WARN, record, details),
            Severity::Error => emit!(Level::ERROR, record, details),
            Severity::Failure => emit!(Level::ERROR, record, details, failure = true),
        }
    }
}
