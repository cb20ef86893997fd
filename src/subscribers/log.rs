//! # LogWriter: tracing-backed event writer
//!
//! A minimal subscriber that renders incoming [`Event`]s through `tracing`.
//! Use it for demos or while debugging lifecycle wiring.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO [phase-reached] scope="main" phase=resume
//! INFO [subscription-bound] scope="main" phase=resume target=pause
//! INFO [bucket-drained] scope="main" phase=pause cancelled=1 recycled=1
//! WARN [subscription-expired] scope="main" phase=stop target=stop
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let label = e.kind.as_label();
        let scope = e.scope.as_deref().unwrap_or("-");
        let phase = e.phase.map(|p| p.as_label()).unwrap_or("-");
        match e.kind {
            EventKind::PhaseReached => {
                tracing::info!(scope, phase, "[{label}]");
            }
            EventKind::BucketDrained => {
                tracing::info!(scope, phase, cancelled = ?e.cancelled, recycled = ?e.recycled, "[{label}]");
            }
            EventKind::SubscriptionBound => {
                tracing::info!(scope, phase, target = ?e.target, "[{label}]");
            }
            EventKind::SubscriptionExpired => {
                tracing::warn!(scope, phase, target = ?e.target, "[{label}]");
            }
            EventKind::UsageError | EventKind::SubscriberPanicked | EventKind::SubscriberOverflow => {
                tracing::warn!(scope, reason = e.reason.as_deref().unwrap_or("unknown"), "[{label}]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
