//! Status reducer: applies resource-manager status messages to pod tasks.
//!
//! One handler per remote state, all running under the registry's write
//! lock. The reducer never sleeps and never performs I/O; anomalies are
//! logged and the transition still happens, with one exception: a pending
//! task reported FINISHED is a structural bug (the resource manager is
//! contractually required to send STARTING/RUNNING first) and panics.
//!
//! Out-of-order STARTING after RUNNING is tolerated deliberately: the
//! message is dropped with a warning and no state changes. Whether that
//! should surface as an anomaly instead remains unresolved; this build keeps
//! the tolerant behavior.

use tracing::{debug, error, info, warn};

use crate::core::registry::RegistryInner;
use crate::core::status::{RemoteTaskState, StatusUpdate, NET_CONTAINER_NAME};
use crate::core::task::{PodPhase, PodRuntimeInfo, PodTask, TaskFlag, TaskState};
use crate::util::clock::now_ms;

/// Applies `status` to the registry state, returning the affected task
/// (post-transition clone, pre-removal clone for deleting transitions) and
/// the state observed before the transition.
pub(crate) fn apply(
    inner: &mut RegistryInner,
    status: &StatusUpdate,
) -> (Option<PodTask>, TaskState) {
    let task_id = status.task_id.as_str();
    let before = inner.tasks.get(task_id).cloned();
    let prior = inner.state_of(task_id);

    match status.state {
        RemoteTaskState::Staging => handle_staging(status),
        RemoteTaskState::Starting => handle_starting(inner, task_id, prior),
        RemoteTaskState::Running => handle_running(inner, task_id, prior, status),
        RemoteTaskState::Finished => handle_finished(inner, task_id, prior),
        RemoteTaskState::Failed => handle_failed(inner, prior, status),
        RemoteTaskState::Killed => handle_killed(inner, prior, status),
        RemoteTaskState::Lost => handle_lost(inner, prior, status),
    }

    // deleting transitions leave the caller with the last retained snapshot
    let after = inner.tasks.get(task_id).cloned().or(before);
    (after, prior)
}

fn handle_staging(status: &StatusUpdate) {
    error!(task_id = %status.task_id, "not implemented: task staging");
}

fn handle_starting(inner: &mut RegistryInner, task_id: &str, prior: TaskState) {
    // expected when a launched task is finally bound via the orchestrator
    // API; nothing to do beyond stamping the bind time
    match prior {
        TaskState::Pending => {
            // prior state Pending guarantees the entry exists under this lock
            let Some(task) = inner.tasks.get_mut(task_id) else {
                return;
            };
            let now = now_ms();
            task.updated_time_ms = now;
            task.bind_time_ms = Some(now);
            info!(
                metric = "time_to_bind",
                elapsed_ms = now.saturating_sub(task.launch_time_ms) as u64,
                task_id = %task.id,
                pod = %task.pod.name,
                "task bound"
            );
        }
        _ => {
            warn!(task_id, prior = %prior, "ignoring STARTING because the task is not pending");
        }
    }
}

fn handle_running(
    inner: &mut RegistryInner,
    task_id: &str,
    prior: TaskState,
    status: &StatusUpdate,
) {
    match prior {
        TaskState::Pending => {
            info!(task_id, "received running status for pending task");
            let Some(task) = inner.tasks.get_mut(task_id) else {
                return;
            };
            task.updated_time_ms = now_ms();
            fill_running_pod_info(task, status);
            task.state = TaskState::Running;
        }
        TaskState::Running => {
            let Some(task) = inner.tasks.get_mut(task_id) else {
                return;
            };
            task.updated_time_ms = now_ms();
            debug!(task_id, "ignoring RUNNING because the task is already running");
        }
        TaskState::Finished => {
            warn!(task_id, "ignoring RUNNING because the task is already finished");
        }
        TaskState::Unknown => {
            warn!(task_id, "ignoring RUNNING because the task is discarded");
        }
    }
}

/// Populates the pod status from a RUNNING payload.
///
/// The pod IP comes from the container named [`NET_CONTAINER_NAME`], which
/// holds the pod's network namespace. An absent container or empty IP is
/// logged and skipped; an undecodable payload is logged and leaves the info
/// map untouched. The caller transitions the task either way.
fn fill_running_pod_info(task: &mut PodTask, status: &StatusUpdate) {
    task.pod.status.phase = Some(PodPhase::Running);
    let Some(data) = status.data.as_deref() else {
        error!(task_id = %task.id, "missing status data for running task");
        return;
    };
    match serde_json::from_slice::<PodRuntimeInfo>(data) {
        Ok(info) => {
            task.pod.status.info = info;
            match task.pod.status.info.get(NET_CONTAINER_NAME) {
                Some(net) if !net.pod_ip.is_empty() => {
                    task.pod.status.pod_ip = Some(net.pod_ip.clone());
                }
                Some(_) => {
                    warn!(task_id = %task.id, pod_key = %task.pod_key, "no network settings reported");
                }
                None => {
                    warn!(
                        task_id = %task.id,
                        pod_key = %task.pod_key,
                        container = NET_CONTAINER_NAME,
                        "network container not found in pod info"
                    );
                }
            }
        }
        Err(err) => {
            error!(task_id = %task.id, %err, "invalid status data for running task");
        }
    }
}

fn handle_finished(inner: &mut RegistryInner, task_id: &str, prior: TaskState) {
    match prior {
        TaskState::Pending => {
            // structural bug: STARTING/RUNNING are contractually required first
            panic!("pending task {task_id} finished without running");
        }
        TaskState::Running => {
            debug!(task_id, "received finished status for running task");
            let Some(task) = inner.tasks.get_mut(task_id) else {
                return;
            };
            task.state = TaskState::Finished;
            task.updated_time_ms = now_ms();
            let pod_key = task.pod_key.clone();
            inner.pod_to_task.remove(&pod_key);
            inner.record_finished(task_id.to_string());
        }
        TaskState::Finished => {
            warn!(task_id, "ignoring FINISHED because the task is already finished");
        }
        TaskState::Unknown => {
            warn!(task_id, "ignoring FINISHED because the task is not running");
        }
    }
}

fn handle_failed(inner: &mut RegistryInner, prior: TaskState, status: &StatusUpdate) {
    error!(
        task_id = %status.task_id,
        detail = status.message.as_deref().unwrap_or(""),
        "task failed"
    );
    if matches!(prior, TaskState::Pending | TaskState::Running) {
        remove_active(inner, &status.task_id);
    }
}

fn handle_killed(inner: &mut RegistryInner, prior: TaskState, status: &StatusUpdate) {
    let expected = inner
        .tasks
        .get(&status.task_id)
        .is_some_and(|t| t.has(TaskFlag::Deleted));
    if matches!(prior, TaskState::Pending | TaskState::Running) {
        remove_active(inner, &status.task_id);
    }
    if expected {
        // the operator asked for this pod to go away; nothing out of the ordinary
        info!(task_id = %status.task_id, "task killed");
    } else {
        error!(task_id = %status.task_id, "task killed");
    }
}

fn handle_lost(inner: &mut RegistryInner, prior: TaskState, status: &StatusUpdate) {
    warn!(
        task_id = %status.task_id,
        reason = status.reason.as_deref().unwrap_or(""),
        "task lost"
    );
    if matches!(prior, TaskState::Pending | TaskState::Running) {
        remove_active(inner, &status.task_id);
    }
}

fn remove_active(inner: &mut RegistryInner, task_id: &str) {
    if let Some(task) = inner.tasks.get(task_id) {
        let pod_key = task.pod_key.clone();
        inner.remove_both(task_id, &pod_key);
    }
}
