use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, span, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::LoggerError;

static TRACING_SET: AtomicBool = AtomicBool::new(false);

/// Filter applied when neither `rust_log` nor `RUST_LOG` is set.
const DEFAULT_DIRECTIVES: &str = "info";

#[derive(Debug, Default, Clone)]
pub struct TracingConfig {
    /// Do not log to stdout
    pub no_log_to_stdout: bool,

    /// Write stdout logs from a dedicated worker thread so that emitting an
    /// event never blocks on the terminal
    pub non_blocking: bool,

    /// Default `RUST_LOG` configuration.
    /// If it is not set, the value of the environment variable `RUST_LOG` will
    /// be used.
    pub rust_log: Option<String>,

    /// Colorize the level and target
    pub with_ansi_colors: bool,
}

/// Keep this alive for as long as logs should be flushed: dropping it stops
/// the non-blocking writer after draining its queue.
#[derive(Default)]
pub struct LoggingGuards {
    stdout_guard: Option<WorkerGuard>,
}

impl LoggingGuards {
    #[must_use]
    pub const fn is_non_blocking(&self) -> bool {
        self.stdout_guard.is_some()
    }
}

/// Initialize the global tracing subscriber
///
/// Only the first successful call installs a subscriber; later calls log a
/// warning and return empty guards. A failed initialization is reported on
/// stderr and never panics.
pub fn tracing_init(tracing_config: &TracingConfig) -> LoggingGuards {
    if TRACING_SET.swap(true, Ordering::Acquire) {
        let span = span!(tracing::Level::INFO, "tracing_init");
        let _guard = span.enter();
        warn!("Tracing already initialized or crashed");
        return LoggingGuards::default();
    }

    match tracing_init_(tracing_config) {
        Ok(guards) => {
            let span = span!(tracing::Level::INFO, "tracing_init");
            let _guard = span.enter();
            info!(
                non_blocking = guards.is_non_blocking(),
                "Tracing initialized with config {tracing_config:#?}"
            );
            guards
        }
        Err(err) => {
            TRACING_SET.store(false, Ordering::Release);
            eprintln!("Failed to initialize tracing: {err:?}");
            LoggingGuards::default()
        }
    }
}

fn env_filter(rust_log: Option<&str>) -> Result<EnvFilter, LoggerError> {
    match rust_log {
        Some(directives) => Ok(EnvFilter::try_new(directives)?),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))),
    }
}

fn tracing_init_(config: &TracingConfig) -> Result<LoggingGuards, LoggerError> {
    let mut guards = LoggingGuards::default();
    let mut layers = vec![];

    let filter = env_filter(config.rust_log.as_deref())?;

    if !config.no_log_to_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_level(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(config.with_ansi_colors)
            .compact();
        if config.non_blocking {
            let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
            guards.stdout_guard = Some(guard);
            layers.push(fmt_layer.with_writer(writer).boxed());
        } else {
            layers.push(fmt_layer.boxed());
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()?;

    Ok(guards)
}
