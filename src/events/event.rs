//! # Lifecycle events emitted by scopes and subscriber workers.
//!
//! The [`EventKind`] enum classifies events in two groups:
//! - **Scope events**: phases reached, buckets drained, registrations bound or expired,
//!   usage errors
//! - **Subscriber events**: overflow and panics inside [`SubscriberSet`](crate::SubscriberSet)
//!
//! The [`Event`] struct carries the metadata: scope name, phases, counters, reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are observed out of order.
//!
//! ## Example
//! ```rust
//! use lifebind::{Event, EventKind, LifecycleEvent};
//!
//! let ev = Event::new(EventKind::SubscriptionBound)
//!     .with_scope("details")
//!     .with_phase(Some(LifecycleEvent::Resume))
//!     .with_target(LifecycleEvent::Pause);
//!
//! assert_eq!(ev.kind, EventKind::SubscriptionBound);
//! assert_eq!(ev.scope.as_deref(), Some("details"));
//! assert_eq!(ev.target, Some(LifecycleEvent::Pause));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::lifecycle::LifecycleEvent;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Scope events ===
    /// Scope reached a new phase (also emitted for a repeated phase).
    ///
    /// Sets:
    /// - `scope`: scope name
    /// - `phase`: reached phase
    PhaseReached,

    /// Delivering a phase cancelled subscriptions or recycled buckets.
    ///
    /// Sets:
    /// - `scope`: scope name
    /// - `phase`: reached phase
    /// - `cancelled`: live subscriptions cancelled
    /// - `recycled`: buckets returned to the pool
    BucketDrained,

    /// Subscription bound until `target`.
    ///
    /// Sets:
    /// - `scope`: scope name
    /// - `phase`: current phase (if any)
    /// - `target`: teardown phase
    SubscriptionBound,

    /// Registration came too late: `target` is not after `phase`.
    ///
    /// Sets:
    /// - `scope`: scope name
    /// - `phase`: current phase
    /// - `target`: requested teardown phase
    SubscriptionExpired,

    /// A caller broke the scope's contract (wrong thread, regression, policy misuse).
    ///
    /// Sets:
    /// - `scope`: scope name
    /// - `reason`: error label
    UsageError,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `scope`: subscriber name
    /// - `reason`: panic message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `scope`: subscriber name
    /// - `reason`: "full" or "closed"
    SubscriberOverflow,
}

impl EventKind {
    /// Returns a short stable label (kebab-case) for use in logs.
    pub fn as_label(self) -> &'static str {
        match self {
            EventKind::PhaseReached => "phase-reached",
            EventKind::BucketDrained => "bucket-drained",
            EventKind::SubscriptionBound => "subscription-bound",
            EventKind::SubscriptionExpired => "subscription-expired",
            EventKind::UsageError => "usage-error",
            EventKind::SubscriberPanicked => "subscriber-panicked",
            EventKind::SubscriberOverflow => "subscriber-overflow",
        }
    }
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Scope (or subscriber) name, if applicable.
    pub scope: Option<Arc<str>>,
    /// Phase the scope is in (or just reached).
    pub phase: Option<LifecycleEvent>,
    /// Teardown phase of a registration.
    pub target: Option<LifecycleEvent>,
    /// Subscriptions cancelled by a drain.
    pub cancelled: Option<u32>,
    /// Buckets recycled by a drain.
    pub recycled: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            scope: None,
            phase: None,
            target: None,
            cancelled: None,
            recycled: None,
            reason: None,
        }
    }

    /// Attaches a scope (or subscriber) name.
    #[inline]
    pub fn with_scope(mut self, scope: impl Into<Arc<str>>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Attaches the current phase.
    #[inline]
    pub fn with_phase(mut self, phase: Option<LifecycleEvent>) -> Self {
        self.phase = phase;
        self
    }

    /// Attaches a teardown phase.
    #[inline]
    pub fn with_target(mut self, target: LifecycleEvent) -> Self {
        self.target = Some(target);
        self
    }

    /// Attaches drain counters (saturating at `u32::MAX`).
    #[inline]
    pub fn with_drain(mut self, cancelled: usize, recycled: usize) -> Self {
        self.cancelled = Some(u32::try_from(cancelled).unwrap_or(u32::MAX));
        self.recycled = Some(u32::try_from(recycled).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_scope(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_scope(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }

    #[inline]
    pub fn is_subscriber_panic(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberPanicked)
    }
}
