//! # Lifecycle scopes.
//!
//! A [`LifecycleScope`] is what a UI component holds: it is fed phases by the
//! host and hands out subscriptions bound to future phases. Build one with
//! [`ScopeBuilder`] (via [`LifecycleScope::builder`]) from a [`ScopeConfig`].

mod builder;
mod config;
mod lifecycle_scope;

pub use builder::ScopeBuilder;
pub use config::ScopeConfig;
pub use lifecycle_scope::LifecycleScope;
