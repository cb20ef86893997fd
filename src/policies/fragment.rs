//! # Fragment-style observation policy.
//!
//! ```text
//! Attach     → Detach        Create      → Destroy
//! CreateView → DestroyView   Start       → Stop
//! Resume     → Pause         Pause       → Stop
//! Stop       → DestroyView   DestroyView → Destroy
//! Destroy    → Detach
//! ```
//!
//! `Detach` is terminal and yields [`LifecycleError::TerminalPhase`], the same
//! way `Destroy` does for [`ActivityPolicy`](crate::ActivityPolicy).

use crate::error::LifecycleError;
use crate::lifecycle::{LifecycleEvent, LifecycleShape};
use crate::policies::{resolve_in_table, ObservationPolicy, TeardownTable};

use LifecycleEvent as E;

pub(super) const TABLE: TeardownTable = [
    Some(E::Detach),      // Attach
    Some(E::Destroy),     // Create
    Some(E::DestroyView), // CreateView
    Some(E::Stop),        // Start
    Some(E::Pause),       // Resume
    Some(E::Stop),        // Pause
    Some(E::DestroyView), // Stop
    Some(E::Destroy),     // DestroyView
    Some(E::Detach),      // Destroy
    None,                 // Detach (terminal)
];

/// Symmetric teardown pairing for fragment-shaped components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FragmentPolicy;

impl ObservationPolicy for FragmentPolicy {
    fn resolve(&self, current: Option<LifecycleEvent>) -> Result<LifecycleEvent, LifecycleError> {
        resolve_in_table(self.name(), LifecycleShape::Fragment, &TABLE, current)
    }

    fn name(&self) -> &'static str {
        "fragment"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_phases_symmetrically() {
        let p = FragmentPolicy;
        assert_eq!(p.resolve(None), Ok(E::Detach));
        assert_eq!(p.resolve(Some(E::Attach)), Ok(E::Detach));
        assert_eq!(p.resolve(Some(E::Create)), Ok(E::Destroy));
        assert_eq!(p.resolve(Some(E::CreateView)), Ok(E::DestroyView));
        assert_eq!(p.resolve(Some(E::Start)), Ok(E::Stop));
        assert_eq!(p.resolve(Some(E::Resume)), Ok(E::Pause));
        assert_eq!(p.resolve(Some(E::Pause)), Ok(E::Stop));
        assert_eq!(p.resolve(Some(E::Stop)), Ok(E::DestroyView));
        assert_eq!(p.resolve(Some(E::DestroyView)), Ok(E::Destroy));
        assert_eq!(p.resolve(Some(E::Destroy)), Ok(E::Detach));
    }

    #[test]
    fn detach_is_terminal() {
        let err = FragmentPolicy.resolve(Some(E::Detach)).unwrap_err();
        assert_eq!(err.as_label(), "lifecycle_terminal_phase");
    }
}
