//! Lifecycle phases and the shapes they belong to.
//!
//! ## Contents
//! - [`LifecycleEvent`] the totally ordered set of phases a UI component passes through
//! - [`LifecycleShape`] which subset of phases a given component kind emits
//!
//! Only the ordinal of a phase matters: every comparison in the crate goes
//! through [`LifecycleEvent::ordinal`] (or the derived `Ord`, which is the same thing).

mod event;
mod shape;

pub use event::LifecycleEvent;
pub use shape::LifecycleShape;
