//! Pod-key derivation.
//!
//! The orchestrator namespaces its pods; registry keys honor that by using
//! the same path shape the orchestrator's KV store uses for pod items:
//! `/pods/<namespace>/<pod-id>`.

use crate::core::SchedulerError;

/// Path prefix for pod registry keys.
pub const POD_PATH_PREFIX: &str = "/pods";

/// Constructs the registry key for a pod, enforcing namespace rules.
///
/// Fails with [`SchedulerError::InvalidKey`] if either component is empty
/// or contains the path separator.
pub fn make_pod_key(namespace: &str, pod_id: &str) -> Result<String, SchedulerError> {
    validate_component(namespace)?;
    validate_component(pod_id)?;
    Ok(format!("{POD_PATH_PREFIX}/{namespace}/{pod_id}"))
}

fn validate_component(component: &str) -> Result<(), SchedulerError> {
    if component.is_empty() || component.contains('/') {
        return Err(SchedulerError::InvalidKey(component.to_string()));
    }
    Ok(())
}
