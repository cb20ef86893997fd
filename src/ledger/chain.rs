//! # Ordinally sorted bucket chain.
//!
//! [`Ledger`] stores its buckets in an arena (`Vec<Node>`) and links them with
//! indices. The chain is kept in strictly ascending phase order, with at most
//! one bucket per phase.
//!
//! ## Find-or-insert
//! ```text
//! start at anchor (or head when no phase was reached yet)
//!   target > here → walk next while next <= target
//!   target < here → walk prev while prev >= target
//!   equal         → existing bucket
//!   otherwise     → splice a pooled bucket between the two neighbours
//! ```
//! The number of distinct phases is tiny, so a linear walk from the anchor is
//! all the indexing the ledger needs.
//!
//! ## Drain
//! ```text
//! drain(P):
//!   target = find_or_insert(P)
//!   for bucket in head .. target: cancel group, unlink, release to pool
//!   cancel target's own group (subscriptions bound until exactly P)
//!   head = anchor = target
//! ```
//! Delivering the same phase twice drains an empty prefix and an empty group.
//!
//! ## Rules
//! - Callers must not register a target at or before the current phase, and
//!   must not drain a phase before the current one. The scope enforces both;
//!   the ledger only `debug_assert!`s them.
//! - Dropping the ledger cancels every pending subscription.

use std::cmp::Ordering;
use std::mem;
use std::sync::Arc;

use crate::lifecycle::LifecycleEvent;
use crate::subscription::Subscription;

use super::{Bucket, BucketPool};

/// Arena slot. Vacant slots hold a default (empty, unkeyed) bucket.
#[derive(Debug, Default)]
struct Node {
    bucket: Bucket,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Result of delivering one phase to a [`Ledger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainReport {
    /// Phase that was delivered.
    pub phase: LifecycleEvent,
    /// Buckets unlinked and handed back to the pool.
    pub recycled: usize,
    /// Subscriptions that were live and got cancelled.
    pub cancelled: usize,
}

/// Chain of buckets keyed by teardown phase, anchored at the current phase.
#[derive(Debug)]
pub(crate) struct Ledger {
    nodes: Vec<Node>,
    vacant: Vec<usize>,
    head: Option<usize>,
    anchor: Option<usize>,
    pool: Arc<BucketPool>,
}

impl Ledger {
    /// Creates an empty ledger that draws its buckets from `pool`.
    pub(crate) fn new(pool: Arc<BucketPool>) -> Self {
        Self {
            nodes: Vec::new(),
            vacant: Vec::new(),
            head: None,
            anchor: None,
            pool,
        }
    }

    /// Most recently drained phase, if any.
    pub(crate) fn current(&self) -> Option<LifecycleEvent> {
        self.anchor.and_then(|i| self.key_at(i))
    }

    /// Pool this ledger recycles into.
    #[cfg(test)]
    pub(crate) fn pool(&self) -> &Arc<BucketPool> {
        &self.pool
    }

    /// Number of buckets in the chain, anchor included.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }

    /// Pending teardown phases with their live subscription counts, ascending.
    pub(crate) fn pending(&self) -> Vec<(LifecycleEvent, usize)> {
        let current = self.current();
        self.iter()
            .filter_map(|node| node.bucket.event().map(|ev| (ev, node.bucket.live())))
            .filter(|(ev, _)| ev.is_after(current))
            .collect()
    }

    /// Adds a fresh subscription to the bucket for `target`.
    pub(crate) fn register(&mut self, target: LifecycleEvent) -> Subscription {
        debug_assert!(
            target.is_after(self.current()),
            "target {target} is not after current phase {:?}",
            self.current()
        );
        let i = self.find_or_insert(target);
        let sub = Subscription::new(Some(target));
        self.nodes[i].bucket.add(&sub);
        sub
    }

    /// Moves the anchor to `phase`, cancelling every bucket at or before it.
    pub(crate) fn drain(&mut self, phase: LifecycleEvent) -> DrainReport {
        debug_assert!(
            self.current().map_or(true, |c| phase >= c),
            "phase {phase} delivered after {:?}",
            self.current()
        );
        let target = self.find_or_insert(phase);
        let mut report = DrainReport {
            phase,
            recycled: 0,
            cancelled: 0,
        };

        let mut cursor = self.head;
        while let Some(i) = cursor {
            if i == target {
                break;
            }
            cursor = self.nodes[i].next;
            report.cancelled += self.nodes[i].bucket.cancel();
            report.recycled += 1;
            self.recycle(i);
        }

        report.cancelled += self.nodes[target].bucket.cancel();
        self.nodes[target].prev = None;
        self.head = Some(target);
        self.anchor = Some(target);
        report
    }

    fn key_at(&self, i: usize) -> Option<LifecycleEvent> {
        self.nodes[i].bucket.event()
    }

    fn find_or_insert(&mut self, event: LifecycleEvent) -> usize {
        let Some(mut cur) = self.anchor.or(self.head) else {
            let i = self.alloc(event, None, None);
            self.head = Some(i);
            return i;
        };

        loop {
            match Some(event).cmp(&self.key_at(cur)) {
                Ordering::Equal => return cur,
                Ordering::Greater => match self.nodes[cur].next {
                    Some(n) if self.key_at(n) <= Some(event) => cur = n,
                    next => return self.splice(Some(cur), next, event),
                },
                Ordering::Less => match self.nodes[cur].prev {
                    Some(p) if self.key_at(p) >= Some(event) => cur = p,
                    prev => return self.splice(prev, Some(cur), event),
                },
            }
        }
    }

    fn splice(&mut self, prev: Option<usize>, next: Option<usize>, event: LifecycleEvent) -> usize {
        let i = self.alloc(event, prev, next);
        match prev {
            Some(p) => self.nodes[p].next = Some(i),
            None => self.head = Some(i),
        }
        if let Some(n) = next {
            self.nodes[n].prev = Some(i);
        }
        i
    }

    fn alloc(&mut self, event: LifecycleEvent, prev: Option<usize>, next: Option<usize>) -> usize {
        let mut bucket = self.pool.acquire();
        bucket.key(event);
        let node = Node { bucket, prev, next };
        match self.vacant.pop() {
            Some(i) => {
                self.nodes[i] = node;
                i
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Returns slot `i` to the arena and its bucket to the pool. Links of
    /// neighbours are the caller's business.
    fn recycle(&mut self, i: usize) {
        let node = mem::take(&mut self.nodes[i]);
        self.pool.release(node.bucket);
        self.vacant.push(i);
    }

    fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let i = cursor?;
            cursor = self.nodes[i].next;
            Some(&self.nodes[i])
        })
    }
}

impl Drop for Ledger {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        self.anchor = None;
        while let Some(i) = cursor {
            cursor = self.nodes[i].next;
            self.nodes[i].bucket.cancel();
            self.recycle(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleEvent as E;

    fn ledger() -> Ledger {
        Ledger::new(Arc::new(BucketPool::new(16)))
    }

    fn chain(l: &Ledger) -> Vec<LifecycleEvent> {
        l.iter().filter_map(|n| n.bucket.event()).collect()
    }

    #[test]
    fn inserts_keep_ascending_order() {
        let mut l = ledger();
        for ev in [E::Stop, E::Create, E::Detach, E::Resume, E::Stop, E::Attach] {
            let _ = l.register(ev);
        }
        assert_eq!(
            chain(&l),
            [E::Attach, E::Create, E::Resume, E::Stop, E::Detach]
        );
        assert_eq!(
            l.pending(),
            [
                (E::Attach, 1),
                (E::Create, 1),
                (E::Resume, 1),
                (E::Stop, 2),
                (E::Detach, 1)
            ]
        );
    }

    #[test]
    fn drain_cancels_prefix_and_exact_match() {
        let mut l = ledger();
        let pause = l.register(E::Pause);
        let stop = l.register(E::Stop);
        let destroy = l.register(E::Destroy);

        let report = l.drain(E::Stop);
        assert_eq!(report.cancelled, 2);
        assert_eq!(report.recycled, 1);
        assert!(pause.is_unsubscribed());
        assert!(stop.is_unsubscribed());
        assert!(!destroy.is_unsubscribed());

        assert_eq!(l.current(), Some(E::Stop));
        assert_eq!(chain(&l), [E::Stop, E::Destroy]);
        assert_eq!(l.pending(), [(E::Destroy, 1)]);
    }

    #[test]
    fn drain_between_buckets_inserts_anchor() {
        let mut l = ledger();
        let _ = l.drain(E::Start);
        let destroy = l.register(E::Destroy);

        let report = l.drain(E::DestroyView);
        assert_eq!(report.cancelled, 0);
        assert_eq!(report.recycled, 1);
        assert_eq!(chain(&l), [E::DestroyView, E::Destroy]);
        assert!(!destroy.is_unsubscribed());
    }

    #[test]
    fn repeated_phase_is_a_no_op() {
        let mut l = ledger();
        let _ = l.drain(E::Create);
        let _sub = l.register(E::Destroy);
        let first = l.drain(E::Start);
        let second = l.drain(E::Start);
        assert_eq!(first.recycled, 1);
        assert_eq!(second.recycled, 0);
        assert_eq!(second.cancelled, 0);
        assert_eq!(chain(&l), [E::Start, E::Destroy]);
    }

    #[test]
    fn arena_slots_and_buckets_are_reused() {
        let mut l = ledger();
        for ev in LifecycleEvent::ALL {
            let _ = l.drain(ev);
        }
        assert_eq!(l.len(), 1);
        assert!(l.nodes.len() <= 2, "arena grew to {}", l.nodes.len());
        let stats = l.pool().stats();
        assert!(stats.reused >= 8, "{stats:?}");
    }

    #[test]
    fn dropping_the_ledger_cancels_everything() {
        let pool = Arc::new(BucketPool::new(16));
        let mut l = Ledger::new(Arc::clone(&pool));
        let a = l.register(E::Stop);
        let b = l.register(E::Destroy);
        drop(l);
        assert!(a.is_unsubscribed());
        assert!(b.is_unsubscribed());
        assert_eq!(pool.len(), 2);
    }
}
