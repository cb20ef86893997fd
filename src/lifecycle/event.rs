//! # Ordered lifecycle phases.
//!
//! ```text
//! Attach < Create < CreateView < Start < Resume < Pause < Stop < DestroyView < Destroy < Detach
//! ```
//!
//! The declaration order **is** the ordering. `Ord` is derived from it and
//! [`LifecycleEvent::ordinal`] exposes the same rank as a plain integer, which
//! the policy tables index by.
//!
//! ## Example
//! ```rust
//! use lifebind::LifecycleEvent;
//!
//! assert!(LifecycleEvent::Start < LifecycleEvent::Stop);
//! assert_eq!(LifecycleEvent::Attach.ordinal(), 0);
//! assert_eq!(LifecycleEvent::Resume.as_label(), "resume");
//! ```

use std::fmt;

/// One phase of a component lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LifecycleEvent {
    /// Component attached to its host (fragment only).
    Attach,
    /// Component created.
    Create,
    /// Component view hierarchy created (fragment only).
    CreateView,
    /// Component became visible.
    Start,
    /// Component gained focus / became interactive.
    Resume,
    /// Component lost focus.
    Pause,
    /// Component no longer visible.
    Stop,
    /// Component view hierarchy torn down (fragment only).
    DestroyView,
    /// Component destroyed.
    Destroy,
    /// Component detached from its host (fragment only).
    Detach,
}

impl LifecycleEvent {
    /// Number of distinct phases.
    pub const COUNT: usize = 10;

    /// Every phase, in ascending order.
    pub const ALL: [LifecycleEvent; Self::COUNT] = [
        LifecycleEvent::Attach,
        LifecycleEvent::Create,
        LifecycleEvent::CreateView,
        LifecycleEvent::Start,
        LifecycleEvent::Resume,
        LifecycleEvent::Pause,
        LifecycleEvent::Stop,
        LifecycleEvent::DestroyView,
        LifecycleEvent::Destroy,
        LifecycleEvent::Detach,
    ];

    /// Rank of this phase (0-based).
    #[inline]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Phase with the given rank, if any.
    #[inline]
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// True if `self` is strictly after `current`.
    ///
    /// An absent `current` ("no phase observed yet") sorts before every phase.
    #[inline]
    pub fn is_after(self, current: Option<LifecycleEvent>) -> bool {
        match current {
            Some(c) => self > c,
            None => true,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(self) -> &'static str {
        match self {
            LifecycleEvent::Attach => "attach",
            LifecycleEvent::Create => "create",
            LifecycleEvent::CreateView => "create_view",
            LifecycleEvent::Start => "start",
            LifecycleEvent::Resume => "resume",
            LifecycleEvent::Pause => "pause",
            LifecycleEvent::Stop => "stop",
            LifecycleEvent::DestroyView => "destroy_view",
            LifecycleEvent::Destroy => "destroy",
            LifecycleEvent::Detach => "detach",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
