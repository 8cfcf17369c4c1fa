//! Pod-task entity and lifecycle state.
//!
//! A [`PodTask`] tracks one launched attempt of one pod on the cluster. It
//! is created by the placement path, registered with the task registry in
//! `Pending` state, and mutated only by the status reducer under the
//! registry's write lock.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::podkey::make_pod_key;
use crate::core::SchedulerError;
use crate::util::clock::now_ms;

/// Registry-side lifecycle state of a pod task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Registered, not yet confirmed running by the resource manager.
    Pending,
    /// Confirmed running; pod info has been extracted from the status payload.
    Running,
    /// Terminated normally; retained until aged out of the finished ring.
    Finished,
    /// Not present in the registry.
    Unknown,
}

impl TaskState {
    /// Returns a lowercase label suitable for metrics and logs.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Boolean markers attached to a task.
///
/// `Deleted` records an operator-initiated removal so the reducer can tell
/// an expected kill from an anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskFlag {
    /// The operator requested removal of this task's pod.
    Deleted,
}

/// Phase reported on the pod's status sub-object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PodPhase {
    /// Accepted, containers not all running.
    Pending,
    /// Bound and all containers started.
    Running,
    /// All containers terminated successfully.
    Succeeded,
    /// At least one container terminated in failure.
    Failed,
    /// Phase could not be determined.
    Unknown,
}

/// Per-container record inside the status payload delivered with a RUNNING
/// update. Only the IP is consumed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerReport {
    /// IP assigned to the container; may be empty when networking is not up.
    #[serde(rename = "PodIP", default)]
    pub pod_ip: String,
}

/// Pod-info payload: container name to its runtime report.
pub type PodRuntimeInfo = HashMap<String, ContainerReport>;

/// Mutable status sub-object of the pod snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodStatus {
    /// Current phase, if known.
    pub phase: Option<PodPhase>,
    /// Runtime info keyed by container name, as last reported.
    #[serde(default)]
    pub info: PodRuntimeInfo,
    /// IP of the pod's network-namespace-holder container, once reported.
    pub pod_ip: Option<String>,
}

/// Snapshot of the pod specification carried by a task.
///
/// Only the fields the core reads or writes are modeled; the orchestrator
/// owns the full pod schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodSnapshot {
    /// Pod identifier within its namespace.
    pub name: String,
    /// Namespace the pod belongs to.
    pub namespace: String,
    /// Mutable status written by the status reducer.
    #[serde(default)]
    pub status: PodStatus,
}

impl PodSnapshot {
    /// Creates a snapshot with an empty status.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            status: PodStatus::default(),
        }
    }
}

/// One attempt to run one pod on the cluster.
///
/// Handed out by the registry as a clone; callers must not expect mutations
/// on their copy to be observed. All live-state mutation goes through
/// `update_status` or a sanctioned registry mutator.
#[derive(Debug, Clone)]
pub struct PodTask {
    /// Opaque globally unique task identifier.
    pub id: String,
    /// Registry key derived from (namespace, pod name).
    pub pod_key: String,
    /// Snapshot of the pod this task runs.
    pub pod: PodSnapshot,
    /// Lifecycle state; owned by the registry lock once registered.
    pub state: TaskState,
    /// Instant the task was constructed for launch, ms since the epoch.
    pub launch_time_ms: u128,
    /// Instant the launched task was bound via the orchestrator API.
    pub bind_time_ms: Option<u128>,
    /// Instant of the last status-driven mutation.
    pub updated_time_ms: u128,
    flags: HashSet<TaskFlag>,
}

impl PodTask {
    /// Creates a pending task for `pod`, deriving its registry key.
    ///
    /// The `Result` return slots directly into
    /// [`TaskRegistry::register`](crate::core::TaskRegistry::register),
    /// which pipes a construction error through unchanged.
    pub fn new(id: impl Into<String>, pod: PodSnapshot) -> Result<Self, SchedulerError> {
        let pod_key = make_pod_key(&pod.namespace, &pod.name)?;
        let now = now_ms();
        Ok(Self {
            id: id.into(),
            pod_key,
            pod,
            state: TaskState::Pending,
            launch_time_ms: now,
            bind_time_ms: None,
            updated_time_ms: now,
            flags: HashSet::new(),
        })
    }

    /// Returns true if `flag` is set.
    #[must_use]
    pub fn has(&self, flag: TaskFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Sets `flag`; returns true if it was newly set.
    pub fn set(&mut self, flag: TaskFlag) -> bool {
        self.flags.insert(flag)
    }

    /// Clears `flag`; returns true if it was set.
    pub fn clear(&mut self, flag: TaskFlag) -> bool {
        self.flags.remove(&flag)
    }
}
