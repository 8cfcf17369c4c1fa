//! Concurrent in-memory task registry.
//!
//! Two tables and a retention ring co-owned by one reader/writer lock: task
//! id to [`PodTask`], pod key to task id, and the finished-task ring. Every
//! mutation and every state read serializes through the lock; operations are
//! bounded table work, so nothing blocks while holding it.
//!
//! Tasks handed out by [`get`](TaskRegistry::get) are clones. Mutating a
//! clone is not observed by the registry; all live-state mutation goes
//! through [`update_status`](TaskRegistry::update_status) or
//! [`set_flag`](TaskRegistry::set_flag).

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::core::reducer;
use crate::core::ring::FinishedRing;
use crate::core::status::StatusUpdate;
use crate::core::task::{PodTask, TaskFlag, TaskState};
use crate::core::SchedulerError;

/// Default number of finished tasks retained for introspection.
pub const DEFAULT_FINISHED_TASKS: usize = 1024;

/// Authoritative pod-to-task index consumed by in-process collaborators.
pub trait TaskRegistry: Send + Sync {
    /// Registers a pod task unless the piped-in construction result is
    /// already an error, in which case it is returned unchanged and nothing
    /// is mutated. Fails with [`SchedulerError::Duplicate`] when the task id
    /// or pod key is already live.
    fn register(&self, task: Result<PodTask, SchedulerError>) -> Result<PodTask, SchedulerError>;

    /// Removes the task from both tables. Idempotent; missing entries are
    /// silently tolerated.
    fn unregister(&self, task: &PodTask);

    /// Looks up a task by id, returning a clone and its current state, or
    /// `(None, Unknown)` when absent.
    fn get(&self, task_id: &str) -> (Option<PodTask>, TaskState);

    /// Looks up the active task for a pod key.
    fn task_for_pod(&self, pod_key: &str) -> Option<String>;

    /// Returns the ids of all tasks whose state matches `filter`, or all
    /// task ids when `filter` is `None`. Ordering is unspecified.
    fn list(&self, filter: Option<TaskState>) -> Vec<String>;

    /// Applies a resource-manager status message under the write lock and
    /// returns the task (post-transition clone, `None` if unknown) together
    /// with the state observed before the transition.
    fn update_status(&self, status: &StatusUpdate) -> (Option<PodTask>, TaskState);

    /// Sets a flag on a live task. Returns false when the task is unknown.
    fn set_flag(&self, task_id: &str, flag: TaskFlag) -> bool;
}

pub(crate) struct RegistryInner {
    pub(crate) tasks: HashMap<String, PodTask>,
    pub(crate) pod_to_task: HashMap<String, String>,
    pub(crate) finished: FinishedRing,
}

impl RegistryInner {
    pub(crate) fn state_of(&self, task_id: &str) -> TaskState {
        self.tasks
            .get(task_id)
            .map_or(TaskState::Unknown, |t| t.state)
    }

    /// Records a finished task id in the ring; the evicted occupant, if it
    /// is still retained as `Finished`, is garbage collected from `tasks`.
    pub(crate) fn record_finished(&mut self, task_id: String) {
        if let Some(aged_out) = self.finished.record(task_id) {
            let still_finished = self
                .tasks
                .get(&aged_out)
                .is_some_and(|t| t.state == TaskState::Finished);
            if still_finished {
                self.tasks.remove(&aged_out);
            }
        }
    }

    pub(crate) fn remove_both(&mut self, task_id: &str, pod_key: &str) {
        self.tasks.remove(task_id);
        self.pod_to_task.remove(pod_key);
    }
}

/// Lock-protected registry implementation.
pub struct InMemoryTaskRegistry {
    inner: RwLock<RegistryInner>,
}

impl InMemoryTaskRegistry {
    /// Creates a registry retaining [`DEFAULT_FINISHED_TASKS`] finished
    /// tasks.
    #[must_use]
    pub fn new() -> Self {
        Self::with_finished_capacity(DEFAULT_FINISHED_TASKS)
    }

    /// Creates a registry with a custom finished-task retention capacity.
    #[must_use]
    pub fn with_finished_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                tasks: HashMap::new(),
                pod_to_task: HashMap::new(),
                finished: FinishedRing::new(capacity),
            }),
        }
    }

    /// Ids of recently finished tasks, oldest first. Introspection only;
    /// entries may refer to tasks already aged out of the registry.
    #[must_use]
    pub fn recently_finished(&self) -> Vec<String> {
        self.inner
            .read()
            .finished
            .entries()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl Default for InMemoryTaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRegistry for InMemoryTaskRegistry {
    fn register(&self, task: Result<PodTask, SchedulerError>) -> Result<PodTask, SchedulerError> {
        let task = task?;
        let mut inner = self.inner.write();
        if inner.tasks.contains_key(&task.id) {
            return Err(SchedulerError::Duplicate(task.id));
        }
        if inner.pod_to_task.contains_key(&task.pod_key) {
            return Err(SchedulerError::Duplicate(task.pod_key));
        }
        inner
            .pod_to_task
            .insert(task.pod_key.clone(), task.id.clone());
        inner.tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    fn unregister(&self, task: &PodTask) {
        let mut inner = self.inner.write();
        inner.remove_both(&task.id, &task.pod_key);
    }

    fn get(&self, task_id: &str) -> (Option<PodTask>, TaskState) {
        let inner = self.inner.read();
        let state = inner.state_of(task_id);
        (inner.tasks.get(task_id).cloned(), state)
    }

    fn task_for_pod(&self, pod_key: &str) -> Option<String> {
        self.inner.read().pod_to_task.get(pod_key).cloned()
    }

    fn list(&self, filter: Option<TaskState>) -> Vec<String> {
        self.inner
            .read()
            .tasks
            .values()
            .filter(|t| filter.map_or(true, |f| f == t.state))
            .map(|t| t.id.clone())
            .collect()
    }

    fn update_status(&self, status: &StatusUpdate) -> (Option<PodTask>, TaskState) {
        let mut inner = self.inner.write();
        reducer::apply(&mut inner, status)
    }

    fn set_flag(&self, task_id: &str, flag: TaskFlag) -> bool {
        let mut inner = self.inner.write();
        match inner.tasks.get_mut(task_id) {
            Some(task) => {
                task.set(flag);
                true
            }
            None => false,
        }
    }
}
