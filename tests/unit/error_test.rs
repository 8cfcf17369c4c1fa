//! Tests for error types

use podbind::core::SchedulerError;

#[test]
fn test_invalid_key_error() {
    let err = SchedulerError::InvalidKey("bad/ns".to_string());
    assert_eq!(format!("{}", err), "invalid pod key component: \"bad/ns\"");
}

#[test]
fn test_duplicate_error() {
    let err = SchedulerError::Duplicate("task-1".to_string());
    assert_eq!(format!("{}", err), "duplicate registration: task-1");
}

#[test]
fn test_bad_config_error() {
    let err = SchedulerError::BadConfig("offer-ttl unparsable".to_string());
    assert_eq!(format!("{}", err), "bad configuration: offer-ttl unparsable");
}
