//! Reconciliation timing policy.
//!
//! Reconciliation asks the resource manager to replay or confirm task states
//! so silent drops are detected. The schedule here is pull-style: an
//! external driver owns the loop and the threads, and consults this module
//! for how long to wait before the next tick. Nothing in this module blocks.

use std::time::Duration;

use crate::config::SchedulerConfig;

/// Doubling backoff with a cap.
///
/// `next()` yields the current delay and doubles it for the following call;
/// `reset()` restores the initial delay. One instance per backoff ladder:
/// the explicit-reconciliation cadence uses one, and the driver keeps one
/// per pod for failed placements.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl BackoffPolicy {
    /// Creates a policy ranging from `initial` to `max`.
    #[must_use]
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max,
            current: initial,
        }
    }

    /// Returns the delay to wait now and advances the ladder.
    pub fn next(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    /// Restarts the ladder at the initial delay.
    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    /// The delay `next()` would return without advancing.
    #[must_use]
    pub fn peek(&self) -> Duration {
        self.current
    }
}

/// Timing policy for implicit and explicit task-status reconciliation.
#[derive(Debug, Clone)]
pub struct ReconciliationSchedule {
    implicit_delay: Duration,
    abort_timeout: Duration,
    explicit: BackoffPolicy,
    pod_backoff_initial: Duration,
    pod_backoff_max: Duration,
}

impl ReconciliationSchedule {
    /// Builds the schedule from scheduler configuration.
    #[must_use]
    pub fn from_config(cfg: &SchedulerConfig) -> Self {
        Self {
            implicit_delay: cfg.initial_implicit_reconciliation_delay,
            abort_timeout: cfg.explicit_reconciliation_abort_timeout,
            explicit: BackoffPolicy::new(
                cfg.initial_implicit_reconciliation_delay,
                cfg.explicit_reconciliation_max_backoff,
            ),
            pod_backoff_initial: cfg.initial_pod_backoff,
            pod_backoff_max: cfg.max_pod_backoff,
        }
    }

    /// How long to wait after initial framework registration before asking
    /// the resource manager to replay the states of all registered tasks.
    #[must_use]
    pub fn initial_implicit_delay(&self) -> Duration {
        self.implicit_delay
    }

    /// How long to wait for a superseded reconciliation attempt to drain
    /// before starting a new one.
    #[must_use]
    pub fn abort_timeout(&self) -> Duration {
        self.abort_timeout
    }

    /// Delay before the next explicit reconciliation round. Doubles per
    /// round up to the configured maximum backoff.
    pub fn next_explicit_tick(&mut self) -> Duration {
        self.explicit.next()
    }

    /// Restarts the explicit cadence, e.g. after a disconnect or an event
    /// that invalidates the current backoff ladder.
    pub fn reset_explicit(&mut self) {
        self.explicit.reset();
    }

    /// A fresh per-pod placement backoff ladder.
    #[must_use]
    pub fn pod_backoff(&self) -> BackoffPolicy {
        BackoffPolicy::new(self.pod_backoff_initial, self.pod_backoff_max)
    }
}
