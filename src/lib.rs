//! # lifebind
//!
//! **Lifebind** ties subscriptions to the lifecycle of a UI component
//! (an Android-style Activity or Fragment).
//!
//! A component holds a [`LifecycleScope`]. The host feeds it lifecycle phases;
//! code that starts an async subscription registers it with the scope and gets
//! it cancelled automatically at the matching teardown phase (bound at
//! `Resume` → ended at `Pause`, bound at `Start` → ended at `Stop`, ...).
//!
//! ## Architecture
//! ### Overview
//! ```text
//!        host (UI thread)                          code binding streams
//!              │ on_phase(P)                                │ register / bind
//!              ▼                                            ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  LifecycleScope (thread-confined)                                 │
//! │  - ObservationPolicy (current phase ─► default teardown phase)    │
//! │  - Ledger (ordered chain of buckets, one per teardown phase)      │
//! │  - Bus (optional, broadcast events)                               │
//! └──────┬──────────────────────────────┬─────────────────────────────┘
//!        ▼                              ▼
//! ┌──────────────────────┐     ┌──────────────────────┐
//! │ Bucket(Stop)         │ ──► │ Bucket(Destroy)      │ ──► ...
//! │ SubscriptionGroup    │     │ SubscriptionGroup    │
//! └──────────────────────┘     └──────────────────────┘
//!        │ drained buckets return to
//!        ▼
//!   BucketPool (bounded free list, shared or per scope)
//!
//!   Bus ──► SubscriberSet::listen ──► PhaseTracker / LogWriter / custom
//! ```
//!
//! ### Phase flow
//! ```text
//! on_phase(P):
//!   ├─ P < current            ─► Err(PhaseRegression), nothing changes
//!   ├─ cancel buckets with event < P, recycle them
//!   ├─ cancel bucket(P) (if present), keep it as the new head
//!   └─ current = P
//!
//! register(target?):
//!   ├─ target = target ?: policy.resolve(current)
//!   ├─ target <= current      ─► Registration::Expired
//!   └─ insert into bucket(target) ─► Registration::Bound(Subscription)
//! ```
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                                  |
//! |-------------------|------------------------------------------------------------------|-----------------------------------------------------|
//! | **Scopes**        | Feed phases, register subscriptions, bind streams.               | [`LifecycleScope`], [`ScopeBuilder`]                |
//! | **Policies**      | Map the current phase to its teardown phase.                     | [`ObservationPolicy`], [`ActivityPolicy`], [`FragmentPolicy`], [`FixedPolicy`] |
//! | **Subscriptions** | Cancellation handles, groups and bound streams.                  | [`Subscription`], [`SubscriptionGroup`], [`Bound`]  |
//! | **Ledger**        | Recycling pool for the scope's phase buckets.                    | [`BucketPool`], [`DrainReport`]                     |
//! | **Scheduling**    | Run work on one confined thread.                                 | [`ConfinedScheduler`]                               |
//! | **Subscriber API**| Observe scope events (logging, tracking, custom).                | [`Subscribe`], [`SubscriberSet`], [`PhaseTracker`]  |
//! | **Errors**        | Typed usage and scheduler errors.                                | [`LifecycleError`], [`SchedulerError`]              |
//! | **Configuration** | Per-scope settings.                                              | [`ScopeConfig`]                                     |
//!
//! The bucket chain is only reachable through a scope:
//! ```compile_fail
//! use lifebind::Ledger;
//! ```
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use futures::StreamExt;
//! use lifebind::{FragmentPolicy, LifecycleEvent as E, LifecycleScope, ScopeConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scope = LifecycleScope::builder(FragmentPolicy)
//!         .with_config(ScopeConfig { name: "details".into(), bus_capacity: 64, pool_capacity: 0 })
//!         .build();
//!
//!     for phase in [E::Attach, E::Create, E::CreateView, E::Start] {
//!         scope.on_phase(phase)?;
//!     }
//!
//!     // Bound at Start: the policy ends it at Stop.
//!     let ticks = futures::stream::iter(0..3);
//!     let bound = scope.bind(ticks, None)?;
//!     scope.on_phase(E::Resume)?;
//!
//!     // Still live at Resume.
//!     let items: Vec<i32> = bound.collect().await;
//!     assert_eq!(items, [0, 1, 2]);
//!
//!     let late = scope.bind(futures::stream::iter(0..3), Some(E::Start))?;
//!     assert_eq!(late.collect::<Vec<_>>().await.len(), 0);
//!     Ok(())
//! }
//! ```
mod error;
mod events;
mod ledger;
mod lifecycle;
mod policies;
mod scheduler;
mod scope;
mod subscribers;
mod subscription;

// ---- Public re-exports ----

pub use error::{LifecycleError, SchedulerError};
pub use events::{Bus, Event, EventKind};
pub use ledger::{Bucket, BucketPool, DrainReport, PoolStats, DEFAULT_POOL_CAPACITY};
pub use lifecycle::{LifecycleEvent, LifecycleShape};
pub use policies::{ActivityPolicy, FixedPolicy, FragmentPolicy, ObservationPolicy};
pub use scheduler::ConfinedScheduler;
pub use scope::{LifecycleScope, ScopeBuilder, ScopeConfig};
pub use subscribers::{PhaseTracker, Subscribe, SubscriberSet};
pub use subscription::{Bound, Registration, Subscription, SubscriptionGroup};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
