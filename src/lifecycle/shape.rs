use super::LifecycleEvent;

/// Which phases a component kind goes through.
///
/// - `Activity`: `Create, Start, Resume, Pause, Stop, Destroy`
/// - `Fragment`: all ten phases, `Attach` through `Detach`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleShape {
    Activity,
    Fragment,
}

const ACTIVITY_PHASES: [LifecycleEvent; 6] = [
    LifecycleEvent::Create,
    LifecycleEvent::Start,
    LifecycleEvent::Resume,
    LifecycleEvent::Pause,
    LifecycleEvent::Stop,
    LifecycleEvent::Destroy,
];

impl LifecycleShape {
    /// Phases of this shape in ascending order.
    pub fn phases(self) -> &'static [LifecycleEvent] {
        match self {
            LifecycleShape::Activity => &ACTIVITY_PHASES,
            LifecycleShape::Fragment => &LifecycleEvent::ALL,
        }
    }

    /// True if `event` is part of this shape.
    pub fn contains(self, event: LifecycleEvent) -> bool {
        self.phases().contains(&event)
    }

    /// First phase of this shape.
    pub fn initial(self) -> LifecycleEvent {
        self.phases()[0]
    }

    /// Last phase of this shape; nothing follows it.
    pub fn terminal(self) -> LifecycleEvent {
        self.phases()[self.phases().len() - 1]
    }

    /// Returns a short stable label for use in logs/metrics.
    pub fn as_label(self) -> &'static str {
        match self {
            LifecycleShape::Activity => "activity",
            LifecycleShape::Fragment => "fragment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_is_a_subset_of_fragment() {
        for ev in LifecycleShape::Activity.phases() {
            assert!(LifecycleShape::Fragment.contains(*ev));
        }
        assert!(!LifecycleShape::Activity.contains(LifecycleEvent::Attach));
        assert!(!LifecycleShape::Activity.contains(LifecycleEvent::DestroyView));
    }

    #[test]
    fn boundaries() {
        assert_eq!(LifecycleShape::Activity.initial(), LifecycleEvent::Create);
        assert_eq!(LifecycleShape::Activity.terminal(), LifecycleEvent::Destroy);
        assert_eq!(LifecycleShape::Fragment.initial(), LifecycleEvent::Attach);
        assert_eq!(LifecycleShape::Fragment.terminal(), LifecycleEvent::Detach);
    }

    #[test]
    fn phases_are_ascending() {
        for shape in [LifecycleShape::Activity, LifecycleShape::Fragment] {
            assert!(shape.phases().windows(2).all(|w| w[0] < w[1]));
        }
    }
}
