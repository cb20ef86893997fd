//! # Core policy trait
//!
//! `ObservationPolicy` is the extension point for deciding the default
//! teardown phase of a subscription. The built-in shapes are table-driven:
//! a constant array indexed by [`LifecycleEvent::ordinal`] where `None`
//! marks a phase with no teardown partner.
//!
//! ## Example (custom policy)
//! ```rust
//! use lifebind::{LifecycleError, LifecycleEvent, ObservationPolicy};
//!
//! /// Everything lives until the view goes away.
//! struct UntilViewGone;
//!
//! impl ObservationPolicy for UntilViewGone {
//!     fn resolve(&self, _current: Option<LifecycleEvent>) -> Result<LifecycleEvent, LifecycleError> {
//!         Ok(LifecycleEvent::DestroyView)
//!     }
//!     fn name(&self) -> &'static str { "until_view_gone" }
//! }
//!
//! assert_eq!(UntilViewGone.resolve(None), Ok(LifecycleEvent::DestroyView));
//! ```

use crate::error::LifecycleError;
use crate::lifecycle::{LifecycleEvent, LifecycleShape};

/// Maps the most recently observed phase to the phase at which a subscription
/// opened now should be torn down.
pub trait ObservationPolicy: Send + Sync + 'static {
    /// Resolves the teardown phase.
    ///
    /// `current` is `None` when no phase has been observed yet.
    ///
    /// # Errors
    /// [`LifecycleError::ForeignPhase`] or [`LifecycleError::TerminalPhase`]
    /// when `current` has no teardown partner under this policy.
    fn resolve(&self, current: Option<LifecycleEvent>) -> Result<LifecycleEvent, LifecycleError>;

    /// Human-readable name (for logs/errors).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Teardown partner per phase, indexed by ordinal.
pub(crate) type TeardownTable = [Option<LifecycleEvent>; LifecycleEvent::COUNT];

/// Looks `current` up in `table`, distinguishing foreign phases from terminal ones.
pub(crate) fn resolve_in_table(
    policy: &'static str,
    shape: LifecycleShape,
    table: &TeardownTable,
    current: Option<LifecycleEvent>,
) -> Result<LifecycleEvent, LifecycleError> {
    let Some(phase) = current else {
        return Ok(shape.terminal());
    };
    if !shape.contains(phase) {
        return Err(LifecycleError::ForeignPhase { policy, phase });
    }
    table[phase.ordinal()].ok_or(LifecycleError::TerminalPhase { policy, phase })
}
