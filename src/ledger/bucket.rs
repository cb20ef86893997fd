use crate::lifecycle::LifecycleEvent;
use crate::subscription::{Subscription, SubscriptionGroup};

/// All subscriptions that should be torn down when `event` occurs.
///
/// `event` is `None` while the bucket sits in a [`BucketPool`](super::BucketPool).
#[derive(Debug, Default)]
pub struct Bucket {
    event: Option<LifecycleEvent>,
    group: SubscriptionGroup,
}

impl Bucket {
    /// Phase this bucket is keyed on.
    #[inline]
    pub fn event(&self) -> Option<LifecycleEvent> {
        self.event
    }

    /// Number of live subscriptions in the bucket.
    pub fn live(&self) -> usize {
        self.group.live()
    }

    pub(crate) fn key(&mut self, event: LifecycleEvent) {
        self.event = Some(event);
    }

    pub(crate) fn add(&mut self, sub: &Subscription) {
        self.group.add(sub);
    }

    /// Cancels every subscription in the bucket; returns how many were live.
    pub(crate) fn cancel(&mut self) -> usize {
        self.group.cancel()
    }

    /// Forgets the key and the members (without cancelling them).
    pub(crate) fn clear(&mut self) {
        self.event = None;
        self.group.clear();
    }

    /// True if the bucket carries no key and no members.
    pub(crate) fn is_cleared(&self) -> bool {
        self.event.is_none() && self.group.is_empty()
    }
}
