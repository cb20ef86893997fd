//! Error types used by lifecycle scopes and the confined scheduler.
//!
//! This module defines two error enums:
//!
//! - [`LifecycleError`]: usage errors raised by [`LifecycleScope`](crate::LifecycleScope)
//!   and the observation policies.
//! - [`SchedulerError`]: errors raised by [`ConfinedScheduler`](crate::ConfinedScheduler).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//!
//! Registering for a phase that has already passed is **not** an error; it
//! yields [`Registration::Expired`](crate::Registration::Expired).

use std::thread::ThreadId;
use thiserror::Error;

use crate::lifecycle::LifecycleEvent;

/// # Usage errors produced by lifecycle scopes and policies.
///
/// Every variant means the caller broke a contract (wrong thread, foreign or
/// terminal phase, phases delivered out of order). None of them is retryable.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// A scope was used from a thread other than the one it was built on.
    #[error("scope owned by thread {owner:?} used from thread {caller:?}")]
    WrongThread {
        /// Thread the scope is confined to.
        owner: ThreadId,
        /// Thread that made the call.
        caller: ThreadId,
    },

    /// A policy was asked about a phase that its lifecycle shape does not have.
    #[error("policy '{policy}' does not know phase '{phase}'")]
    ForeignPhase {
        /// Policy name.
        policy: &'static str,
        /// Offending phase.
        phase: LifecycleEvent,
    },

    /// A policy was asked for the teardown phase of a terminal phase.
    #[error("policy '{policy}': nothing follows terminal phase '{phase}'")]
    TerminalPhase {
        /// Policy name.
        policy: &'static str,
        /// Terminal phase.
        phase: LifecycleEvent,
    },

    /// A phase earlier than the current one was delivered.
    #[error("phase '{requested}' delivered after '{current}'")]
    PhaseRegression {
        /// Phase the scope had already reached.
        current: LifecycleEvent,
        /// Phase that was delivered.
        requested: LifecycleEvent,
    },
}

impl LifecycleError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use lifebind::{LifecycleError, LifecycleEvent};
    ///
    /// let err = LifecycleError::PhaseRegression {
    ///     current: LifecycleEvent::Start,
    ///     requested: LifecycleEvent::Create,
    /// };
    /// assert_eq!(err.as_label(), "lifecycle_phase_regression");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LifecycleError::WrongThread { .. } => "lifecycle_wrong_thread",
            LifecycleError::ForeignPhase { .. } => "lifecycle_foreign_phase",
            LifecycleError::TerminalPhase { .. } => "lifecycle_terminal_phase",
            LifecycleError::PhaseRegression { .. } => "lifecycle_phase_regression",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            LifecycleError::WrongThread { owner, caller } => {
                format!("wrong thread: owner={owner:?} caller={caller:?}")
            }
            LifecycleError::ForeignPhase { policy, phase } => {
                format!("foreign phase: policy={policy} phase={phase}")
            }
            LifecycleError::TerminalPhase { policy, phase } => {
                format!("terminal phase: policy={policy} phase={phase}")
            }
            LifecycleError::PhaseRegression { current, requested } => {
                format!("phase regression: current={current} requested={requested}")
            }
        }
    }
}

/// # Errors produced by the confined scheduler.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The scheduler loop has shut down; the work was not queued.
    #[error("scheduler '{name}' is closed")]
    Closed {
        /// Scheduler name.
        name: String,
    },

    /// The dedicated thread could not be started.
    #[error("failed to start scheduler thread: {error}")]
    Spawn {
        /// Underlying OS error message.
        error: String,
    },
}

impl SchedulerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SchedulerError::Closed { .. } => "scheduler_closed",
            SchedulerError::Spawn { .. } => "scheduler_spawn_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SchedulerError::Closed { name } => format!("closed: {name}"),
            SchedulerError::Spawn { error } => format!("spawn: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let err = LifecycleError::TerminalPhase {
            policy: "fragment",
            phase: LifecycleEvent::Detach,
        };
        assert_eq!(err.as_label(), "lifecycle_terminal_phase");
        assert_eq!(err.as_message(), "terminal phase: policy=fragment phase=detach");

        let err = SchedulerError::Closed { name: "ui".into() };
        assert_eq!(err.as_label(), "scheduler_closed");
        assert_eq!(err.to_string(), "scheduler 'ui' is closed");
    }
}
