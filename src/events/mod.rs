//! Lifecycle events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by lifecycle scopes and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: [`LifecycleScope`](crate::LifecycleScope) (phases, registrations,
//!   usage errors), `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: [`SubscriberSet::listen`](crate::SubscriberSet::listen) or any
//!   receiver obtained from [`Bus::subscribe`].

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
