use std::sync::Arc;

use mxlog::{
    call_site, clear_backend, configure, details, facade, log_debug, log_error, log_failure,
    log_info, log_verbose, log_warning, set_backend, CallSite, CapturingBackend, FacadeConfig,
    Severity, UnregisteredPolicy, CONF_ENV_VAR,
};
use mxlog_logger::log_init;
use serial_test::serial;

fn reset() {
    clear_backend();
    configure(&FacadeConfig::default());
}

#[test]
#[serial]
fn test_free_functions_reach_registered_backend() {
    log_init(None);
    reset();
    let capture = Arc::new(CapturingBackend::new());
    set_backend(capture.clone());

    log_verbose("v", CallSite::new("a.rs", "f", 1));
    log_debug("d", CallSite::new("a.rs", "f", 2));
    log_info("connected", CallSite::new("Net.swift", "open", 10));
    log_warning("w", CallSite::new("a.rs", "f", 4));
    log_error(
        "disk full",
        Some(details! { "path" => "/tmp/x" }),
        CallSite::new("Storage.swift", "write", 120),
    );
    log_failure("f", None, call_site!());

    let records = capture.take();
    let severities: Vec<Severity> = records.iter().map(|r| r.severity()).collect();
    assert_eq!(severities, Severity::ALL.to_vec());
    assert!(records[2].details().is_none());
    assert_eq!(
        records[4].to_json_string(),
        r#"{"severity":"error","message":"disk full","details":{"path":"/tmp/x"},"site":{"file":"Storage.swift","function":"write","line":120}}"#
    );
    assert_eq!(
        records[5].site().function,
        "test_free_functions_reach_registered_backend"
    );
    reset();
}

#[test]
#[serial]
fn test_unregistered_calls_are_noops() {
    reset();
    log_error("lost", Some(details! { "code" => 1 }), call_site!());
    log_info("lost", call_site!());
    assert!(!facade().has_backend());
    assert_eq!(facade().pending_len(), 0);
}

#[test]
#[serial]
fn test_buffered_bootstrap() {
    reset();
    configure(&FacadeConfig {
        unregistered: UnregisteredPolicy::Buffer { capacity: 8 },
    });
    log_info("before the backend", call_site!());

    let capture = Arc::new(CapturingBackend::new());
    set_backend(capture.clone());
    log_info("after the backend", call_site!());

    let messages: Vec<String> = capture
        .take()
        .into_iter()
        .map(|r| r.message().to_owned())
        .collect();
    assert_eq!(messages, vec!["before the backend", "after the backend"]);
    reset();
}

#[test]
#[serial]
fn test_config_from_env_var() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mxlog.toml");
    std::fs::write(&path, "[unregistered]\npolicy = \"buffer\"\ncapacity = 4\n").unwrap();

    std::env::set_var(CONF_ENV_VAR, &path);
    let config = FacadeConfig::load(None);
    std::env::remove_var(CONF_ENV_VAR);

    assert_eq!(
        config.unwrap().unregistered,
        UnregisteredPolicy::Buffer { capacity: 4 }
    );

    std::env::set_var(CONF_ENV_VAR, dir.path().join("missing.toml"));
    let missing = FacadeConfig::load(None);
    std::env::remove_var(CONF_ENV_VAR);
    assert!(missing.is_err());

    assert_eq!(FacadeConfig::load(None).unwrap(), FacadeConfig::default());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn test_logging_from_async_tasks() {
    reset();
    let capture = Arc::new(CapturingBackend::new());
    set_backend(capture.clone());

    let tasks: Vec<_> = (0..16_u32)
        .map(|task| {
            tokio::spawn(async move {
                for i in 0..50_u32 {
                    log_failure(
                        format!("task {task}"),
                        Some(details! { "task" => task, "i" => i }),
                        CallSite::new("Task.swift", format!("task{task}"), i),
                    );
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let records = capture.take();
    assert_eq!(records.len(), 16 * 50);
    for record in &records {
        let details = record.details().unwrap();
        let task = details.get("task").unwrap();
        assert_eq!(record.message(), format!("task {}", json_int(task)));
        assert_eq!(record.site().function, format!("task{}", json_int(task)));
        assert_eq!(i64::from(record.site().line), json_int(details.get("i").unwrap()));
    }
    reset();
}

fn json_int(value: &mxlog::DetailValue) -> i64 {
    match value {
        mxlog::DetailValue::Int(v) => *v,
        other => panic!("expected an integer, got {other:?}"),
    }
}
