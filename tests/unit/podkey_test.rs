//! Tests for pod-key derivation

use podbind::core::{make_pod_key, SchedulerError, POD_PATH_PREFIX};

#[test]
fn test_prefix_constant() {
    assert_eq!(POD_PATH_PREFIX, "/pods");
}

#[test]
fn test_derivation_is_deterministic() {
    let a = make_pod_key("kube-system", "dns-7f4b").unwrap();
    let b = make_pod_key("kube-system", "dns-7f4b").unwrap();
    assert_eq!(a, b);
    assert_eq!(a, "/pods/kube-system/dns-7f4b");
}

#[test]
fn test_invalid_components() {
    for (ns, id) in [("", "a"), ("ns", ""), ("n/s", "a"), ("ns", "a/b")] {
        let err = make_pod_key(ns, id).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidKey(_)), "{ns}/{id}");
    }
}
