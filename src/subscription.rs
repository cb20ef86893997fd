//! # Cancellation handles and groups.
//!
//! A [`Subscription`] is a thin wrapper over a [`CancellationToken`]: the
//! owner of a stream watches it, the ledger cancels it. A [`SubscriptionGroup`]
//! is the "cancel all at once" primitive each ledger bucket owns.
//!
//! ## Rules
//! - Cancelling a subscription is idempotent and never blocks.
//! - A subscription unsubscribed by its owner stays in its group until the
//!   group is cancelled or the next `add` prunes it.
//! - An [`Registration::Expired`] registration converts into a subscription
//!   that is already cancelled.

use futures::{Stream, StreamExt};
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

use crate::lifecycle::LifecycleEvent;

/// A stream that ends as soon as its subscription is cancelled.
///
/// Not `Unpin`: pin it (`std::pin::pin!`, `Box::pin`) before calling `next()`.
pub type Bound<S> = futures::stream::TakeUntil<S, WaitForCancellationFutureOwned>;

/// Handle to one bound subscription (or one scheduled job).
///
/// Cheap to clone; every clone observes and controls the same cancellation state.
#[derive(Clone, Debug)]
pub struct Subscription {
    token: CancellationToken,
    target: Option<LifecycleEvent>,
}

impl Subscription {
    pub(crate) fn new(target: Option<LifecycleEvent>) -> Self {
        Self {
            token: CancellationToken::new(),
            target,
        }
    }

    pub(crate) fn with_token(token: CancellationToken, target: Option<LifecycleEvent>) -> Self {
        Self { token, target }
    }

    pub(crate) fn cancelled(target: Option<LifecycleEvent>) -> Self {
        let sub = Self::new(target);
        sub.token.cancel();
        sub
    }

    /// Phase at which this subscription is torn down, if it is lifecycle-bound.
    #[inline]
    pub fn target(&self) -> Option<LifecycleEvent> {
        self.target
    }

    /// Cancels this subscription now. Idempotent.
    pub fn unsubscribe(&self) {
        self.token.cancel();
    }

    /// True once the subscription was cancelled by its owner, its group or a drain.
    #[inline]
    pub fn is_unsubscribed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes when the subscription is cancelled.
    pub async fn unsubscribed(&self) {
        self.token.cancelled().await;
    }

    /// Underlying token, for wiring into `tokio::select!` or child tokens.
    #[inline]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Wraps `stream` so it yields nothing once this subscription is cancelled.
    ///
    /// An already-cancelled subscription produces a stream that ends immediately.
    pub fn bind<S: Stream>(&self, stream: S) -> Bound<S> {
        stream.take_until(self.token.clone().cancelled_owned())
    }
}

/// Group of individually cancellable subscriptions that can be cancelled as one unit.
#[derive(Debug, Default)]
pub struct SubscriptionGroup {
    members: Vec<CancellationToken>,
}

impl SubscriptionGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `sub` to the group, pruning members that are already cancelled.
    pub fn add(&mut self, sub: &Subscription) {
        self.members.retain(|t| !t.is_cancelled());
        self.members.push(sub.token.clone());
    }

    /// Cancels every member and empties the group.
    ///
    /// Returns how many members were still live. The backing storage is kept
    /// so a recycled group does not reallocate.
    pub fn cancel(&mut self) -> usize {
        let mut live = 0;
        for token in self.members.drain(..) {
            if !token.is_cancelled() {
                live += 1;
                token.cancel();
            }
        }
        live
    }

    /// Number of members that are still live.
    pub fn live(&self) -> usize {
        self.members.iter().filter(|t| !t.is_cancelled()).count()
    }

    /// True if no member is live.
    pub fn is_empty(&self) -> bool {
        self.live() == 0
    }

    /// Drops all members **without** cancelling them.
    pub(crate) fn clear(&mut self) {
        self.members.clear();
    }
}

/// Outcome of registering a subscription with a [`LifecycleScope`](crate::LifecycleScope).
#[must_use]
#[derive(Clone, Debug)]
pub enum Registration {
    /// Bound; cancelled automatically when the scope reaches `target`.
    Bound(Subscription),
    /// `target` is not after `current`: the subscription is already over.
    Expired {
        /// Requested teardown phase.
        target: LifecycleEvent,
        /// Phase the scope had already reached.
        current: LifecycleEvent,
    },
}

impl Registration {
    /// True if the subscription was bound.
    #[inline]
    pub fn is_bound(&self) -> bool {
        matches!(self, Registration::Bound(_))
    }

    /// Teardown phase of this registration.
    pub fn target(&self) -> Option<LifecycleEvent> {
        match self {
            Registration::Bound(sub) => sub.target(),
            Registration::Expired { target, .. } => Some(*target),
        }
    }

    /// Converts into a handle; an expired registration yields an already-cancelled one.
    pub fn into_subscription(self) -> Subscription {
        match self {
            Registration::Bound(sub) => sub,
            Registration::Expired { target, .. } => Subscription::cancelled(Some(target)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_cancels_live_members_only() {
        let mut group = SubscriptionGroup::new();
        let a = Subscription::new(Some(LifecycleEvent::Stop));
        let b = Subscription::new(Some(LifecycleEvent::Stop));
        group.add(&a);
        group.add(&b);
        assert_eq!(group.live(), 2);

        b.unsubscribe();
        assert_eq!(group.live(), 1);

        assert_eq!(group.cancel(), 1);
        assert!(a.is_unsubscribed());
        assert!(group.is_empty());
        assert_eq!(group.cancel(), 0);
    }

    #[test]
    fn add_prunes_cancelled_members() {
        let mut group = SubscriptionGroup::new();
        for _ in 0..8 {
            let s = Subscription::new(None);
            group.add(&s);
            s.unsubscribe();
        }
        let last = Subscription::new(None);
        group.add(&last);
        assert_eq!(group.members.len(), 1);
    }

    #[test]
    fn expired_registration_is_pre_cancelled() {
        let reg = Registration::Expired {
            target: LifecycleEvent::Stop,
            current: LifecycleEvent::Destroy,
        };
        assert!(!reg.is_bound());
        assert_eq!(reg.target(), Some(LifecycleEvent::Stop));
        assert!(reg.into_subscription().is_unsubscribed());
    }

    #[tokio::test]
    async fn bound_stream_stops_at_cancel() {
        let sub = Subscription::new(Some(LifecycleEvent::Pause));
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<u32>();
        let mut bound = std::pin::pin!(sub.bind(tokio_stream_from(rx)));

        tx.send(1).unwrap();
        assert_eq!(bound.next().await, Some(1));

        sub.unsubscribe();
        tx.send(2).unwrap();
        assert_eq!(bound.next().await, None);
    }

    #[tokio::test]
    async fn cancelled_subscription_binds_an_empty_stream() {
        let sub = Subscription::cancelled(Some(LifecycleEvent::Stop));
        let items: Vec<u32> = sub.bind(futures::stream::iter([1, 2, 3])).collect().await;
        assert!(items.is_empty());
    }

    fn tokio_stream_from<T>(mut rx: tokio::sync::mpsc::UnboundedReceiver<T>) -> impl Stream<Item = T> {
        futures::stream::poll_fn(move |cx| rx.poll_recv(cx))
    }

    #[tokio::test]
    async fn unsubscribed_resolves_after_cancel() {
        let sub = Subscription::new(None);
        let waiter = sub.clone();
        let h = tokio::spawn(async move { waiter.unsubscribed().await });
        sub.unsubscribe();
        h.await.unwrap();
    }
}
