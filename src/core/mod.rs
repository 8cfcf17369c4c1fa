//! Registry core: task model, status reduction, retention, and timing.

pub mod error;
pub mod podkey;
pub mod reconcile;
mod reducer;
pub mod registry;
pub mod ring;
pub mod status;
pub mod task;

pub use error::{AppResult, SchedulerError};
pub use podkey::{make_pod_key, POD_PATH_PREFIX};
pub use reconcile::{BackoffPolicy, ReconciliationSchedule};
pub use registry::{InMemoryTaskRegistry, TaskRegistry, DEFAULT_FINISHED_TASKS};
pub use ring::FinishedRing;
pub use status::{RemoteTaskState, StatusUpdate, NET_CONTAINER_NAME};
pub use task::{
    ContainerReport, PodPhase, PodRuntimeInfo, PodSnapshot, PodStatus, PodTask, TaskFlag,
    TaskState,
};
