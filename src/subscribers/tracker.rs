//! # Phase tracker with sequence-based ordering.
//!
//! Maintains the latest known phase of every named scope from `PhaseReached`
//! events. Useful for observing UI components from outside their thread.
//!
//! ## Architecture
//! ```text
//! LifecycleScope ──► Bus ──► SubscriberSet ──► PhaseTracker::on_event()
//!                                                      │
//!                                                      ▼
//!                                        HashMap<scope, {last_seq, phase}>
//! ```
//!
//! ## Rules
//! - Only `PhaseReached` events change the recorded phase
//! - Events without a scope name are ignored
//! - Events with `seq <= last_seq` are **rejected** (stale)

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::events::{Event, EventKind};
use crate::lifecycle::LifecycleEvent;
use crate::subscribers::Subscribe;

#[derive(Debug, Clone, Copy)]
struct ScopeState {
    last_seq: u64,
    phase: LifecycleEvent,
}

/// Thread-safe view of the latest phase per scope.
#[derive(Default)]
pub struct PhaseTracker {
    state: RwLock<HashMap<String, ScopeState>>,
}

impl PhaseTracker {
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `ev` if it is a newer `PhaseReached` for its scope.
    ///
    /// Returns `true` when the recorded phase changed.
    pub async fn update(&self, ev: &Event) -> bool {
        if ev.kind != EventKind::PhaseReached {
            return false;
        }
        let (Some(name), Some(phase)) = (ev.scope.as_deref(), ev.phase) else {
            return false;
        };

        let mut state = self.state.write().await;
        match state.get_mut(name) {
            Some(entry) if ev.seq <= entry.last_seq => false,
            Some(entry) => {
                entry.last_seq = ev.seq;
                let changed = entry.phase != phase;
                entry.phase = phase;
                changed
            }
            None => {
                state.insert(
                    name.to_string(),
                    ScopeState {
                        last_seq: ev.seq,
                        phase,
                    },
                );
                true
            }
        }
    }

    /// Latest known phase of `scope`.
    pub async fn phase(&self, scope: &str) -> Option<LifecycleEvent> {
        self.state.read().await.get(scope).map(|s| s.phase)
    }

    /// Sorted `(scope, phase)` pairs.
    pub async fn snapshot(&self) -> Vec<(String, LifecycleEvent)> {
        let state = self.state.read().await;
        let mut out: Vec<_> = state
            .iter()
            .map(|(name, s)| (name.clone(), s.phase))
            .collect();
        out.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

#[async_trait]
impl Subscribe for PhaseTracker {
    async fn on_event(&self, event: &Event) {
        self.update(event).await;
    }

    fn name(&self) -> &'static str {
        "phase_tracker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reached(scope: &str, phase: LifecycleEvent) -> Event {
        Event::new(EventKind::PhaseReached)
            .with_scope(scope)
            .with_phase(Some(phase))
    }

    #[tokio::test]
    async fn stale_events_are_rejected() {
        let tracker = PhaseTracker::new();
        let older = reached("main", LifecycleEvent::Start);
        let newer = reached("main", LifecycleEvent::Resume);

        assert!(tracker.update(&newer).await);
        assert!(!tracker.update(&older).await);
        assert_eq!(tracker.phase("main").await, Some(LifecycleEvent::Resume));
    }

    #[tokio::test]
    async fn ignores_other_kinds_and_anonymous_scopes() {
        let tracker = PhaseTracker::new();
        let bound = Event::new(EventKind::SubscriptionBound)
            .with_scope("main")
            .with_phase(Some(LifecycleEvent::Start));
        let anonymous = Event::new(EventKind::PhaseReached).with_phase(Some(LifecycleEvent::Start));

        assert!(!tracker.update(&bound).await);
        assert!(!tracker.update(&anonymous).await);
        assert!(tracker.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn snapshot_is_sorted() {
        let tracker = PhaseTracker::new();
        tracker.on_event(&reached("zeta", LifecycleEvent::Create)).await;
        tracker.on_event(&reached("alpha", LifecycleEvent::Stop)).await;
        assert_eq!(
            tracker.snapshot().await,
            [
                ("alpha".to_string(), LifecycleEvent::Stop),
                ("zeta".to_string(), LifecycleEvent::Create)
            ]
        );
    }
}
