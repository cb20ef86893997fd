//! # Activity-style observation policy.
//!
//! Pairs creation phases with their teardown counterparts over the
//! [`LifecycleShape::Activity`] phases:
//!
//! ```text
//! Create → Destroy   Start → Stop   Resume → Pause
//! Pause  → Stop      Stop  → Destroy
//! ```
//!
//! `Destroy` is terminal and yields [`LifecycleError::TerminalPhase`];
//! fragment-only phases yield [`LifecycleError::ForeignPhase`].

use crate::error::LifecycleError;
use crate::lifecycle::{LifecycleEvent, LifecycleShape};
use crate::policies::{resolve_in_table, ObservationPolicy, TeardownTable};

use LifecycleEvent as E;

pub(super) const TABLE: TeardownTable = [
    None,             // Attach (foreign)
    Some(E::Destroy), // Create
    None,             // CreateView (foreign)
    Some(E::Stop),    // Start
    Some(E::Pause),   // Resume
    Some(E::Stop),    // Pause
    Some(E::Destroy), // Stop
    None,             // DestroyView (foreign)
    None,             // Destroy (terminal)
    None,             // Detach (foreign)
];

/// Symmetric teardown pairing for activity-shaped components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityPolicy;

impl ObservationPolicy for ActivityPolicy {
    fn resolve(&self, current: Option<LifecycleEvent>) -> Result<LifecycleEvent, LifecycleError> {
        resolve_in_table(self.name(), LifecycleShape::Activity, &TABLE, current)
    }

    fn name(&self) -> &'static str {
        "activity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_phases_symmetrically() {
        let p = ActivityPolicy;
        assert_eq!(p.resolve(None), Ok(E::Destroy));
        assert_eq!(p.resolve(Some(E::Create)), Ok(E::Destroy));
        assert_eq!(p.resolve(Some(E::Start)), Ok(E::Stop));
        assert_eq!(p.resolve(Some(E::Resume)), Ok(E::Pause));
        assert_eq!(p.resolve(Some(E::Pause)), Ok(E::Stop));
        assert_eq!(p.resolve(Some(E::Stop)), Ok(E::Destroy));
    }

    #[test]
    fn destroy_is_terminal() {
        assert_eq!(
            ActivityPolicy.resolve(Some(E::Destroy)),
            Err(LifecycleError::TerminalPhase {
                policy: "activity",
                phase: E::Destroy
            })
        );
    }

    #[test]
    fn fragment_phases_are_foreign() {
        for phase in [E::Attach, E::CreateView, E::DestroyView, E::Detach] {
            assert_eq!(
                ActivityPolicy.resolve(Some(phase)),
                Err(LifecycleError::ForeignPhase {
                    policy: "activity",
                    phase
                })
            );
        }
    }
}
