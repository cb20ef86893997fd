use crate::error::LifecycleError;
use crate::lifecycle::LifecycleEvent;
use crate::policies::ObservationPolicy;

/// Always tears down at the same phase, whatever the current one is.
///
/// If the fixed phase has already passed, registrations through a scope using
/// this policy come back [`Expired`](crate::Registration::Expired).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPolicy(pub LifecycleEvent);

impl FixedPolicy {
    /// Tear down at `Stop`.
    pub const fn until_stop() -> Self {
        Self(LifecycleEvent::Stop)
    }
}

impl ObservationPolicy for FixedPolicy {
    fn resolve(&self, _current: Option<LifecycleEvent>) -> Result<LifecycleEvent, LifecycleError> {
        Ok(self.0)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_current_phase() {
        let p = FixedPolicy::until_stop();
        assert_eq!(p.resolve(None), Ok(LifecycleEvent::Stop));
        for ev in LifecycleEvent::ALL {
            assert_eq!(p.resolve(Some(ev)), Ok(LifecycleEvent::Stop));
        }
    }
}
