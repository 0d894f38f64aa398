use crate::{tracing_init, TracingConfig};

/// Initializing the stdout logger only.
///
/// # Arguments
/// * `rust_log` - The log string to set for `RUST_LOG`
///
/// # Notes
/// - calling `log_init(None)` is equivalent to calling
///   `log_init(option_env!("RUST_LOG"))`
/// - writes synchronously so that output from tests is not lost when the
///   test binary exits
pub fn log_init(rust_log: Option<&str>) {
    let config = TracingConfig {
        no_log_to_stdout: false,
        non_blocking: false,
        rust_log: rust_log
            .or(option_env!("RUST_LOG"))
            .map(std::borrow::ToOwned::to_owned),
        with_ansi_colors: false,
    };
    tracing_init(&config);
}

#[cfg(test)]
mod tests {
    use tracing::{debug, info, trace};

    use super::*;

    #[test]
    fn test_log_init() {
        log_init(Some("debug"));
        info!("This is an INFO test log message");
        debug!("This is a DEBUG test log message");
        // The next message is a TRACE level and should be ignored
        trace!("This is a TRACE test log message");

        // a second initialization is ignored
        log_init(Some("trace"));
    }
}
