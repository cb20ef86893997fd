//! # Event subscribers for lifecycle scopes.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and built-in implementations for events broadcast through the
//! [`Bus`](crate::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   LifecycleScope ── publish(Event) ──► Bus ──► SubscriberSet::listen
//!                                                       │
//!                                       ┌───────────────┼───────────────┐
//!                                       ▼               ▼               ▼
//!                                   LogWriter     PhaseTracker       Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use lifebind::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct LeakAlarm;
//!
//! #[async_trait]
//! impl Subscribe for LeakAlarm {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::SubscriptionExpired {
//!             // a stream was bound after its teardown phase
//!         }
//!     }
//!     fn name(&self) -> &'static str { "leak_alarm" }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;
mod tracker;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
pub use tracker::PhaseTracker;
