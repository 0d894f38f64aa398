//! Bootstrap the facade the way an application would
//! cargo run --example bridge_example -p mxlog

use std::{path::PathBuf, sync::Arc};

use mxlog::{
    call_site, configure, details, log_error, log_failure, log_info, log_warning, set_backend,
    FacadeConfig, TracingBackend,
};
use mxlog_logger::{tracing_init, TracingConfig};

fn main() {
    let _guards = tracing_init(&TracingConfig {
        no_log_to_stdout: false,
        non_blocking: true,
        rust_log: Some("trace".to_owned()),
        with_ansi_colors: true,
    });

    // an explicit file argument wins over MXLOG_CONF
    let config = match FacadeConfig::load(std::env::args().nth(1).map(PathBuf::from)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid facade configuration, using defaults: {e}");
            FacadeConfig::default()
        }
    };
    configure(&config);

    // handled by the unregistered policy
    log_info("starting before any backend", call_site!());

    set_backend(Arc::new(TracingBackend));

    log_info("backend registered", call_site!());
    log_warning("sync token is stale", call_site!());
    sync();
}

fn sync() {
    log_error(
        "disk full",
        Some(details! { "path" => "/tmp/x", "free_bytes" => 0_u64 }),
        call_site!(),
    );
    log_failure(
        "unable to decrypt event",
        Some(details! {
            "session" => "m.megolm.v1",
            "retries" => vec![1, 2, 4],
            "fatal" => true,
        }),
        call_site!(),
    );
}
