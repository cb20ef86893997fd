//! # LifecycleScope: binds subscriptions to the phases of one component.
//!
//! The scope owns a bucket ledger and an [`ObservationPolicy`]. The host feeds it
//! phases with [`on_phase`](LifecycleScope::on_phase); callers register
//! subscriptions (or bind streams) that are cancelled when a target phase is
//! reached.
//!
//! ## Flow
//! ```text
//! register(target?)
//!   ├─ wrong thread            ─► Err(WrongThread)
//!   ├─ target = target ?: policy.resolve(current)
//!   ├─ target <= current       ─► Registration::Expired   (publish SubscriptionExpired)
//!   └─ ledger.register(target) ─► Registration::Bound     (publish SubscriptionBound)
//!
//! on_phase(P)
//!   ├─ wrong thread            ─► Err(WrongThread)
//!   ├─ P < current             ─► Err(PhaseRegression)    (ledger untouched)
//!   └─ ledger.drain(P)         ─► DrainReport             (publish PhaseReached [+ BucketDrained])
//! ```
//!
//! ## Rules
//! - Confined to the thread that built it; every entry point checks.
//! - Usage errors are returned **and** logged (`tracing::error!`) **and**
//!   published as `UsageError` when a bus is attached.
//! - Dropping the scope cancels all pending subscriptions.
//!
//! ## Example
//! ```rust
//! use lifebind::{LifecycleEvent as E, LifecycleScope};
//!
//! let scope = LifecycleScope::fragment();
//! for phase in [E::Attach, E::Create, E::CreateView, E::Start, E::Resume] {
//!     scope.on_phase(phase)?;
//! }
//!
//! let sub = scope.register(None)?.into_subscription();
//! assert_eq!(sub.target(), Some(E::Pause));
//!
//! scope.on_phase(E::Pause)?;
//! assert!(sub.is_unsubscribed());
//! # Ok::<(), lifebind::LifecycleError>(())
//! ```

use std::cell::RefCell;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use futures::Stream;

use super::ScopeBuilder;
use crate::error::LifecycleError;
use crate::events::{Bus, Event, EventKind};
use crate::ledger::{BucketPool, DrainReport, Ledger};
use crate::lifecycle::LifecycleEvent;
use crate::policies::{ActivityPolicy, FragmentPolicy, ObservationPolicy};
use crate::subscription::{Bound, Registration};

/// Lifecycle-bound subscription coordinator for one UI component.
///
/// `Send` but not `Sync`: it may be handed to the thread it was built on, and
/// it refuses to work anywhere else.
pub struct LifecycleScope {
    name: Arc<str>,
    owner: ThreadId,
    policy: Arc<dyn ObservationPolicy>,
    ledger: RefCell<Ledger>,
    bus: Option<Bus>,
}

impl LifecycleScope {
    /// Starts building a scope driven by `policy`.
    pub fn builder(policy: impl ObservationPolicy) -> ScopeBuilder {
        ScopeBuilder::new(Arc::new(policy))
    }

    /// Scope with [`ActivityPolicy`], shared pool, no bus.
    pub fn activity() -> Self {
        Self::builder(ActivityPolicy).build()
    }

    /// Scope with [`FragmentPolicy`], shared pool, no bus.
    pub fn fragment() -> Self {
        Self::builder(FragmentPolicy).build()
    }

    pub(super) fn new_internal(
        name: Arc<str>,
        policy: Arc<dyn ObservationPolicy>,
        pool: Arc<BucketPool>,
        bus: Option<Bus>,
    ) -> Self {
        Self {
            name,
            owner: thread::current().id(),
            policy,
            ledger: RefCell::new(Ledger::new(pool)),
            bus,
        }
    }

    /// Name used in logs and events.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Thread this scope is confined to.
    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    /// Bus this scope publishes on, if any.
    pub fn bus(&self) -> Option<&Bus> {
        self.bus.as_ref()
    }

    /// Most recently reached phase (`None` before the first one).
    pub fn current_phase(&self) -> Result<Option<LifecycleEvent>, LifecycleError> {
        self.ensure_owner()?;
        Ok(self.ledger.borrow().current())
    }

    /// Teardown phase a subscription registered right now would get by default.
    pub fn observation_target(&self) -> Result<LifecycleEvent, LifecycleError> {
        self.ensure_owner()?;
        let current = self.ledger.borrow().current();
        self.resolve(current)
    }

    /// Pending teardown phases with their live subscription counts.
    pub fn pending(&self) -> Result<Vec<(LifecycleEvent, usize)>, LifecycleError> {
        self.ensure_owner()?;
        Ok(self.ledger.borrow().pending())
    }

    /// Registers a subscription torn down at `target`, or at the policy's
    /// default when `target` is `None`.
    ///
    /// A target that is not after the current phase yields
    /// [`Registration::Expired`]; that is an expected outcome, not an error.
    pub fn register(&self, target: Option<LifecycleEvent>) -> Result<Registration, LifecycleError> {
        self.ensure_owner()?;
        let mut ledger = self.ledger.borrow_mut();
        let current = ledger.current();
        let target = match target {
            Some(t) => t,
            None => self.resolve(current)?,
        };

        match current {
            Some(current) if !target.is_after(Some(current)) => {
                tracing::debug!(scope = %self.name, %current, %target, "registration expired");
                self.publish(|| {
                    Event::new(EventKind::SubscriptionExpired)
                        .with_phase(Some(current))
                        .with_target(target)
                });
                Ok(Registration::Expired { target, current })
            }
            _ => {
                let sub = ledger.register(target);
                tracing::debug!(scope = %self.name, current = ?current, %target, "subscription bound");
                self.publish(|| {
                    Event::new(EventKind::SubscriptionBound)
                        .with_phase(current)
                        .with_target(target)
                });
                Ok(Registration::Bound(sub))
            }
        }
    }

    /// Binds `stream` so that it ends at `target` (or the policy default).
    ///
    /// If the target has already passed the returned stream ends immediately.
    pub fn bind<S: Stream>(
        &self,
        stream: S,
        target: Option<LifecycleEvent>,
    ) -> Result<Bound<S>, LifecycleError> {
        let sub = self.register(target)?.into_subscription();
        Ok(sub.bind(stream))
    }

    /// Feeds a new phase: every subscription bound until this phase or an
    /// earlier one is cancelled.
    ///
    /// Delivering the current phase again is a no-op.
    pub fn on_phase(&self, phase: LifecycleEvent) -> Result<DrainReport, LifecycleError> {
        self.ensure_owner()?;
        let mut ledger = self.ledger.borrow_mut();
        if let Some(current) = ledger.current() {
            if phase < current {
                return Err(self.usage_error(LifecycleError::PhaseRegression {
                    current,
                    requested: phase,
                }));
            }
        }

        let report = ledger.drain(phase);
        drop(ledger);

        tracing::debug!(
            scope = %self.name,
            %phase,
            cancelled = report.cancelled,
            recycled = report.recycled,
            "phase reached"
        );
        self.publish(|| Event::new(EventKind::PhaseReached).with_phase(Some(phase)));
        if report.cancelled > 0 || report.recycled > 0 {
            self.publish(|| {
                Event::new(EventKind::BucketDrained)
                    .with_phase(Some(phase))
                    .with_drain(report.cancelled, report.recycled)
            });
        }
        Ok(report)
    }

    fn resolve(&self, current: Option<LifecycleEvent>) -> Result<LifecycleEvent, LifecycleError> {
        self.policy
            .resolve(current)
            .map_err(|err| self.usage_error(err))
    }

    fn ensure_owner(&self) -> Result<(), LifecycleError> {
        let caller = thread::current().id();
        if caller == self.owner {
            Ok(())
        } else {
            Err(self.usage_error(LifecycleError::WrongThread {
                owner: self.owner,
                caller,
            }))
        }
    }

    fn usage_error(&self, err: LifecycleError) -> LifecycleError {
        tracing::error!(scope = %self.name, error = %err, "lifecycle usage error");
        self.publish(|| Event::new(EventKind::UsageError).with_reason(err.as_label()));
        err
    }

    fn publish(&self, ev: impl FnOnce() -> Event) {
        if let Some(bus) = &self.bus {
            bus.publish(ev().with_scope(Arc::clone(&self.name)));
        }
    }
}

impl std::fmt::Debug for LifecycleScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleScope")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::FixedPolicy;
    use crate::subscription::Subscription;
    use LifecycleEvent as E;

    fn bound(reg: Registration) -> Subscription {
        assert!(reg.is_bound(), "expected bound, got {reg:?}");
        reg.into_subscription()
    }

    #[test]
    fn late_registration_is_expired_not_an_error() {
        let scope = LifecycleScope::activity();
        scope.on_phase(E::Create).unwrap();
        scope.on_phase(E::Start).unwrap();
        scope.on_phase(E::Stop).unwrap();

        let reg = scope.register(Some(E::Stop)).unwrap();
        assert!(matches!(
            reg,
            Registration::Expired {
                target: E::Stop,
                current: E::Stop
            }
        ));
        assert!(reg.into_subscription().is_unsubscribed());

        let reg = scope.register(Some(E::Start)).unwrap();
        assert!(!reg.is_bound());
    }

    #[test]
    fn regression_is_rejected_and_chain_survives() {
        let scope = LifecycleScope::fragment();
        scope.on_phase(E::Start).unwrap();
        let stop = bound(scope.register(Some(E::Stop)).unwrap());

        let err = scope.on_phase(E::Create).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::PhaseRegression {
                current: E::Start,
                requested: E::Create
            }
        );
        assert_eq!(scope.current_phase().unwrap(), Some(E::Start));
        assert_eq!(scope.pending().unwrap(), [(E::Stop, 1)]);

        scope.on_phase(E::Stop).unwrap();
        assert!(stop.is_unsubscribed());
    }

    #[test]
    fn repeated_phase_cancels_nothing_more() {
        let scope = LifecycleScope::fragment();
        scope.on_phase(E::Resume).unwrap();
        let _a = bound(scope.register(None).unwrap());
        let first = scope.on_phase(E::Pause).unwrap();
        let second = scope.on_phase(E::Pause).unwrap();
        assert_eq!(first.cancelled, 1);
        assert_eq!(second.cancelled, 0);
        assert_eq!(second.recycled, 0);
    }

    #[test]
    fn policy_errors_surface_from_register() {
        let scope = LifecycleScope::activity();
        scope.on_phase(E::Destroy).unwrap();
        assert_eq!(
            scope.register(None).unwrap_err().as_label(),
            "lifecycle_terminal_phase"
        );

        let scope = LifecycleScope::activity();
        scope.on_phase(E::Attach).unwrap();
        assert_eq!(
            scope.observation_target().unwrap_err().as_label(),
            "lifecycle_foreign_phase"
        );
    }

    #[test]
    fn use_from_another_thread_is_rejected() {
        let scope = LifecycleScope::fragment();
        let owner = scope.owner();
        let handle = thread::spawn(move || {
            let err = scope.on_phase(E::Attach).unwrap_err();
            (err, scope.register(Some(E::Stop)).unwrap_err())
        });
        let (on_phase, register) = handle.join().unwrap();
        for err in [on_phase, register] {
            match err {
                LifecycleError::WrongThread { owner: o, caller } => {
                    assert_eq!(o, owner);
                    assert_ne!(caller, owner);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn fixed_policy_expires_after_its_phase() {
        let scope = LifecycleScope::builder(FixedPolicy::until_stop()).build();
        scope.on_phase(E::Create).unwrap();
        let sub = bound(scope.register(None).unwrap());
        scope.on_phase(E::Stop).unwrap();
        assert!(sub.is_unsubscribed());
        assert!(!scope.register(None).unwrap().is_bound());
    }

    #[test]
    fn dropping_the_scope_cancels_pending() {
        let scope = LifecycleScope::fragment();
        let sub = bound(scope.register(Some(E::Detach)).unwrap());
        drop(scope);
        assert!(sub.is_unsubscribed());
    }

    #[tokio::test]
    async fn events_are_published_on_the_bus() {
        let scope = LifecycleScope::builder(FragmentPolicy)
            .with_name("details")
            .with_config(crate::ScopeConfig {
                name: "details".into(),
                bus_capacity: 32,
                pool_capacity: 4,
            })
            .build();
        let mut rx = scope.bus().unwrap().subscribe();

        scope.on_phase(E::Resume).unwrap();
        let _sub = scope.register(None).unwrap();
        scope.on_phase(E::Pause).unwrap();
        let _late = scope.register(Some(E::Pause)).unwrap();
        let _ = scope.on_phase(E::Start);

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            assert_eq!(ev.scope.as_deref(), Some("details"));
            kinds.push(ev.kind);
        }
        assert_eq!(
            kinds,
            [
                EventKind::PhaseReached,
                EventKind::SubscriptionBound,
                EventKind::PhaseReached,
                EventKind::BucketDrained,
                EventKind::SubscriptionExpired,
                EventKind::UsageError,
            ]
        );
    }
}
