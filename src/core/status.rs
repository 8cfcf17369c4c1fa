//! Inbound status-message contract with the resource manager.

use serde::{Deserialize, Serialize};

use crate::core::task::PodRuntimeInfo;

/// Name of the container that holds the pod's network and IPC namespaces.
///
/// The RUNNING payload reports per-container info; the pod IP is read from
/// this entry, per the network-namespace-holder container convention.
pub const NET_CONTAINER_NAME: &str = "net";

/// Task state as reported by the resource manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteTaskState {
    /// Accepted by the resource manager, not yet started.
    Staging,
    /// Launched; for this scheduler, bound via the orchestrator API.
    Starting,
    /// Executor confirmed the task is running.
    Running,
    /// Terminated normally.
    Finished,
    /// Terminated in failure.
    Failed,
    /// Terminated because a kill was requested.
    Killed,
    /// The resource manager lost track of the task.
    Lost,
}

impl std::fmt::Display for RemoteTaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Staging => "STAGING",
            Self::Starting => "STARTING",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
            Self::Failed => "FAILED",
            Self::Killed => "KILLED",
            Self::Lost => "LOST",
        };
        f.write_str(label)
    }
}

/// One status message from the resource manager's status channel.
///
/// The core reads only `task_id`, `state`, and `data`; the remaining fields
/// travel through for logging and diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Identifier of the task the message is about.
    pub task_id: String,
    /// Reported state.
    pub state: RemoteTaskState,
    /// Opaque executor payload; JSON pod-info for RUNNING updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u8>>,
    /// Free-form message from the resource manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine-readable reason code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Component that produced the update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl StatusUpdate {
    /// Creates a status update with no payload.
    #[must_use]
    pub fn new(task_id: impl Into<String>, state: RemoteTaskState) -> Self {
        Self {
            task_id: task_id.into(),
            state,
            data: None,
            message: None,
            reason: None,
            source: None,
        }
    }

    /// Attaches an opaque data payload.
    #[must_use]
    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = Some(data);
        self
    }

    /// Attaches the pod-info payload a well-behaved executor sends with
    /// RUNNING, serialized as JSON.
    #[must_use]
    pub fn with_pod_info(self, info: &PodRuntimeInfo) -> Self {
        let data = serde_json::to_vec(info).unwrap_or_default();
        self.with_data(data)
    }
}
