//! # podbind
//!
//! Pod-task registry and status reconciliation core for a two-level
//! scheduler. An orchestrator control plane produces pod specifications; an
//! offer-based resource manager launches tasks and streams status updates.
//! This crate owns the piece in between: the authoritative mapping from pods
//! to the tasks launched to run them, the state machine that advances task
//! lifecycle from status messages, and the bounded retention that keeps
//! memory stable while finished tasks churn.
//!
//! ## Modules
//!
//! - [`core`] - task registry, status reducer, finished-task ring, pod keys,
//!   reconciliation schedule, and the error taxonomy
//! - [`config`] - typed, defaulted, file-overridable scheduler tuning
//! - [`util`] - clock and telemetry helpers
//!
//! ## Examples
//!
//! ### Registering a task and driving it through its lifecycle
//!
//! ```
//! use podbind::core::{
//!     InMemoryTaskRegistry, PodSnapshot, PodTask, RemoteTaskState, StatusUpdate, TaskRegistry,
//!     TaskState,
//! };
//!
//! let registry = InMemoryTaskRegistry::new();
//! let pod = PodSnapshot::new("web-0", "default");
//! let task = registry
//!     .register(PodTask::new("task-1", pod))
//!     .expect("fresh task registers cleanly");
//! assert_eq!(task.state, TaskState::Pending);
//!
//! let (task, prior) =
//!     registry.update_status(&StatusUpdate::new("task-1", RemoteTaskState::Running));
//! assert_eq!(prior, TaskState::Pending);
//! assert_eq!(task.unwrap().state, TaskState::Running);
//! ```
//!
//! ### Loading tuning values from a `[scheduler]` config section
//!
//! ```
//! use podbind::config::SchedulerConfig;
//! use std::time::Duration;
//!
//! let cfg = SchedulerConfig::from_toml_str(
//!     "[scheduler]\noffer-ttl = \"10s\"\nupdates-backlog = 512\n",
//! )
//! .unwrap();
//! assert_eq!(cfg.offer_ttl, Duration::from_secs(10));
//! assert_eq!(cfg.updates_backlog, 512);
//! // untouched keys keep their defaults
//! assert_eq!(cfg.max_pod_backoff, Duration::from_secs(60));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod util;

// Re-export main types for convenience
pub use config::SchedulerConfig;
pub use core::{
    AppResult, FinishedRing, InMemoryTaskRegistry, PodSnapshot, PodTask, ReconciliationSchedule,
    RemoteTaskState, SchedulerError, StatusUpdate, TaskRegistry, TaskState,
};
