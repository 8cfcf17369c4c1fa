//! Scheduler configuration structure.
//!
//! Every field has a default; a sectioned config file overrides any subset.
//! The file carries a single `[scheduler]` table with kebab-case keys and
//! human-readable duration strings:
//!
//! ```toml
//! [scheduler]
//! info-name        = "podbind"
//! offer-ttl        = "5s"
//! offer-linger-ttl = "2m"
//! ```
//!
//! A malformed duration or unknown key fails the whole load with
//! [`SchedulerError::BadConfig`]; configuration is startup-fatal, never a
//! runtime concern.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::SchedulerError;

/// Duration an offer is viable, prior to being expired.
pub const DEFAULT_OFFER_TTL: Duration = Duration::from_secs(5);
/// Duration an expired offer lingers in history for debugging.
pub const DEFAULT_OFFER_LINGER_TTL: Duration = Duration::from_secs(120);
/// Duration between offer listener notifications.
pub const DEFAULT_LISTENER_DELAY: Duration = Duration::from_secs(1);
/// Size of the buffered pod-updates channel.
pub const DEFAULT_UPDATES_BACKLOG: usize = 2048;
/// Interval at which the framework identifier is re-persisted.
pub const DEFAULT_FRAMEWORK_ID_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
/// Wait after initial registration before implicit reconciliation.
pub const DEFAULT_INITIAL_IMPLICIT_RECONCILIATION_DELAY: Duration = Duration::from_secs(15);
/// Upper bound on the explicit reconciliation cadence.
pub const DEFAULT_EXPLICIT_RECONCILIATION_MAX_BACKOFF: Duration = Duration::from_secs(120);
/// Waiting period for a superseded reconciliation attempt to drain.
pub const DEFAULT_EXPLICIT_RECONCILIATION_ABORT_TIMEOUT: Duration = Duration::from_secs(30);
/// First delay after a failed pod placement.
pub const DEFAULT_INITIAL_POD_BACKOFF: Duration = Duration::from_secs(1);
/// Ceiling for the doubling pod-placement backoff.
pub const DEFAULT_MAX_POD_BACKOFF: Duration = Duration::from_secs(60);
/// Wall-clock limit on operator HTTP endpoints.
pub const DEFAULT_HTTP_HANDLER_TIMEOUT: Duration = Duration::from_secs(10);
/// Framework name registered with the resource manager.
pub const DEFAULT_INFO_NAME: &str = "podbind";

/// Tuning values for the scheduler core and its reconciliation loops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Framework name registered with the resource manager.
    pub info_name: String,
    /// Lifetime of a resource offer before expiry.
    #[serde(with = "humantime_serde")]
    pub offer_ttl: Duration,
    /// Post-expiry offer retention for debugging.
    #[serde(with = "humantime_serde")]
    pub offer_linger_ttl: Duration,
    /// Inter-notification delay to offer listeners.
    #[serde(with = "humantime_serde")]
    pub listener_delay: Duration,
    /// Buffered pod updates.
    pub updates_backlog: usize,
    /// Re-persist interval for the framework identifier.
    #[serde(with = "humantime_serde")]
    pub framework_id_refresh_interval: Duration,
    /// Wait after initial registration before implicit reconciliation.
    #[serde(with = "humantime_serde")]
    pub initial_implicit_reconciliation_delay: Duration,
    /// Upper bound on the explicit reconciliation cadence.
    #[serde(with = "humantime_serde")]
    pub explicit_reconciliation_max_backoff: Duration,
    /// Wait for a superseded reconciliation attempt to drain.
    #[serde(with = "humantime_serde")]
    pub explicit_reconciliation_abort_timeout: Duration,
    /// First delay after a failed pod placement.
    #[serde(with = "humantime_serde")]
    pub initial_pod_backoff: Duration,
    /// Ceiling for the doubling pod-placement backoff.
    #[serde(with = "humantime_serde")]
    pub max_pod_backoff: Duration,
    /// Wall-clock limit on operator HTTP endpoints.
    #[serde(with = "humantime_serde")]
    pub http_handler_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            info_name: DEFAULT_INFO_NAME.to_string(),
            offer_ttl: DEFAULT_OFFER_TTL,
            offer_linger_ttl: DEFAULT_OFFER_LINGER_TTL,
            listener_delay: DEFAULT_LISTENER_DELAY,
            updates_backlog: DEFAULT_UPDATES_BACKLOG,
            framework_id_refresh_interval: DEFAULT_FRAMEWORK_ID_REFRESH_INTERVAL,
            initial_implicit_reconciliation_delay: DEFAULT_INITIAL_IMPLICIT_RECONCILIATION_DELAY,
            explicit_reconciliation_max_backoff: DEFAULT_EXPLICIT_RECONCILIATION_MAX_BACKOFF,
            explicit_reconciliation_abort_timeout: DEFAULT_EXPLICIT_RECONCILIATION_ABORT_TIMEOUT,
            initial_pod_backoff: DEFAULT_INITIAL_POD_BACKOFF,
            max_pod_backoff: DEFAULT_MAX_POD_BACKOFF,
            http_handler_timeout: DEFAULT_HTTP_HANDLER_TIMEOUT,
        }
    }
}

/// File wrapper: the scheduler section plus whatever other sections the
/// deployment keeps in the same file, which are ignored here.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    scheduler: SchedulerConfig,
}

impl SchedulerConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.info_name.is_empty() {
            return Err("info-name must not be empty".into());
        }
        if self.updates_backlog == 0 {
            return Err("updates-backlog must be greater than 0".into());
        }
        if self.offer_ttl.is_zero() {
            return Err("offer-ttl must be greater than 0".into());
        }
        if self.initial_pod_backoff > self.max_pod_backoff {
            return Err("initial-pod-backoff must not exceed max-pod-backoff".into());
        }
        Ok(())
    }

    /// Parse a `[scheduler]` section from sectioned config text and
    /// validate. Keys not set in the file keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, SchedulerError> {
        let file: ConfigFile =
            toml::from_str(input).map_err(|e| SchedulerError::BadConfig(e.to_string()))?;
        file.scheduler.validate().map_err(SchedulerError::BadConfig)?;
        Ok(file.scheduler)
    }

    /// Load configuration from a file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchedulerError> {
        let text = fs::read_to_string(path.as_ref())
            .map_err(|e| SchedulerError::BadConfig(e.to_string()))?;
        Self::from_toml_str(&text)
    }
}
