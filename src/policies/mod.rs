//! Observation-until policies.
//!
//! A policy answers one question: *given the phase a component is in right
//! now, at which phase should a subscription opened now be torn down?*
//!
//! ## Contents
//! - [`ObservationPolicy`] the open trait; implement it for custom pairings
//! - [`ActivityPolicy`] symmetric pairing over the activity shape
//! - [`FragmentPolicy`] symmetric pairing over the fragment shape
//! - [`FixedPolicy`] ignores the current phase (e.g. always until `Stop`)
//!
//! ## Quick reference
//! ```text
//! current        Activity      Fragment
//! (none)         Destroy       Detach
//! Attach         foreign       Detach
//! Create         Destroy       Destroy
//! CreateView     foreign       DestroyView
//! Start          Stop          Stop
//! Resume         Pause         Pause
//! Pause          Stop          Stop
//! Stop           Destroy       DestroyView
//! DestroyView    foreign       Destroy
//! Destroy        terminal      Detach
//! Detach         foreign       terminal
//! ```
//!
//! Policies are pure and stateless; one instance can be shared by any number of scopes.

mod activity;
mod fixed;
mod fragment;
mod observation;

pub use activity::ActivityPolicy;
pub use fixed::FixedPolicy;
pub use fragment::FragmentPolicy;
pub use observation::ObservationPolicy;

pub(crate) use observation::{resolve_in_table, TeardownTable};
