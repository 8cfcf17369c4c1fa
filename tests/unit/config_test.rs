//! Tests for configuration defaults, file overrides, and validation

use std::io::Write;
use std::time::Duration;

use podbind::config::SchedulerConfig;
use podbind::core::SchedulerError;

#[test]
fn test_defaults() {
    let cfg = SchedulerConfig::default();
    assert_eq!(cfg.info_name, "podbind");
    assert_eq!(cfg.offer_ttl, Duration::from_secs(5));
    assert_eq!(cfg.offer_linger_ttl, Duration::from_secs(120));
    assert_eq!(cfg.listener_delay, Duration::from_secs(1));
    assert_eq!(cfg.updates_backlog, 2048);
    assert_eq!(cfg.framework_id_refresh_interval, Duration::from_secs(30));
    assert_eq!(
        cfg.initial_implicit_reconciliation_delay,
        Duration::from_secs(15)
    );
    assert_eq!(
        cfg.explicit_reconciliation_max_backoff,
        Duration::from_secs(120)
    );
    assert_eq!(
        cfg.explicit_reconciliation_abort_timeout,
        Duration::from_secs(30)
    );
    assert_eq!(cfg.initial_pod_backoff, Duration::from_secs(1));
    assert_eq!(cfg.max_pod_backoff, Duration::from_secs(60));
    assert_eq!(cfg.http_handler_timeout, Duration::from_secs(10));
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_partial_override_keeps_defaults() {
    let cfg = SchedulerConfig::from_toml_str(
        r#"
[scheduler]
offer-ttl = "7s"
explicit-reconciliation-max-backoff = "5m"
updates-backlog = 64
"#,
    )
    .unwrap();
    assert_eq!(cfg.offer_ttl, Duration::from_secs(7));
    assert_eq!(
        cfg.explicit_reconciliation_max_backoff,
        Duration::from_secs(300)
    );
    assert_eq!(cfg.updates_backlog, 64);
    // everything else stays at its default
    assert_eq!(cfg.offer_linger_ttl, Duration::from_secs(120));
    assert_eq!(cfg.http_handler_timeout, Duration::from_secs(10));
}

#[test]
fn test_empty_input_is_all_defaults() {
    let cfg = SchedulerConfig::from_toml_str("").unwrap();
    assert_eq!(cfg.updates_backlog, 2048);
}

#[test]
fn test_other_sections_ignored() {
    let cfg = SchedulerConfig::from_toml_str(
        r#"
[executor]
proxy-path = "/usr/local/bin/proxy"

[scheduler]
listener-delay = "250ms"
"#,
    )
    .unwrap();
    assert_eq!(cfg.listener_delay, Duration::from_millis(250));
}

#[test]
fn test_malformed_duration_fails_whole_load() {
    let err = SchedulerConfig::from_toml_str(
        r#"
[scheduler]
offer-ttl = "five seconds or so"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, SchedulerError::BadConfig(_)));
}

#[test]
fn test_unknown_key_fails_load() {
    let err = SchedulerConfig::from_toml_str(
        r#"
[scheduler]
offer-ttll = "5s"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, SchedulerError::BadConfig(_)));
}

#[test]
fn test_validation_rejects_zero_backlog() {
    let err = SchedulerConfig::from_toml_str(
        r#"
[scheduler]
updates-backlog = 0
"#,
    )
    .unwrap_err();
    assert!(matches!(err, SchedulerError::BadConfig(msg) if msg.contains("updates-backlog")));
}

#[test]
fn test_validation_rejects_inverted_pod_backoff() {
    let err = SchedulerConfig::from_toml_str(
        r#"
[scheduler]
initial-pod-backoff = "2m"
max-pod-backoff = "30s"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, SchedulerError::BadConfig(msg) if msg.contains("pod-backoff")));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[scheduler]").unwrap();
    writeln!(file, "info-name = \"staging-sched\"").unwrap();
    writeln!(file, "initial-pod-backoff = \"500ms\"").unwrap();
    file.flush().unwrap();

    let cfg = SchedulerConfig::load(file.path()).unwrap();
    assert_eq!(cfg.info_name, "staging-sched");
    assert_eq!(cfg.initial_pod_backoff, Duration::from_millis(500));
}

#[test]
fn test_load_missing_file_is_bad_config() {
    let err = SchedulerConfig::load("/nonexistent/scheduler.conf").unwrap_err();
    assert!(matches!(err, SchedulerError::BadConfig(_)));
}
