//! Error types for registry and configuration operations.

use thiserror::Error;

/// Errors produced by the scheduler core.
///
/// Reducer anomalies (undecodable status payloads, missing pod IPs) are
/// logged rather than returned: the state transition must still happen, so
/// there is no error to propagate. The one structural bug the reducer can
/// detect, a pending task reported finished, panics instead of appearing
/// here.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A pod-key component was empty or contained the path separator.
    #[error("invalid pod key component: {0:?}")]
    InvalidKey(String),
    /// Register was called for a task-id or pod-key already present.
    #[error("duplicate registration: {0}")]
    Duplicate(String),
    /// Configuration parse or validation failure; fatal at startup.
    #[error("bad configuration: {0}")]
    BadConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
