//! # Bounded bucket pool.
//!
//! [`BucketPool`] keeps up to `capacity` cleared [`Bucket`]s so that
//! registering against a new phase reuses an old bucket (and its group's
//! storage) instead of allocating.
//!
//! ## Rules
//! - `acquire()` never fails: it pops a pooled bucket or allocates a fresh one.
//! - `release()` never fails: it clears the bucket and keeps it only while the
//!   pool is below capacity; otherwise the bucket is dropped.
//! - The pool is the only state shared between scopes, so it sits behind a
//!   `Mutex`. Each scope holds an `Arc` to the pool it was built with.
//!
//! ## Example
//! ```rust
//! use lifebind::BucketPool;
//!
//! let pool = BucketPool::new(2);
//! let a = pool.acquire();
//! let b = pool.acquire();
//! pool.release(a);
//! pool.release(b);
//!
//! let _again = pool.acquire();
//! let stats = pool.stats();
//! assert_eq!(stats.allocated, 2);
//! assert_eq!(stats.reused, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::Bucket;

/// Capacity of [`BucketPool::shared`] and of pools built from `ScopeConfig::default()`.
pub const DEFAULT_POOL_CAPACITY: usize = 16;

static SHARED: OnceLock<Arc<BucketPool>> = OnceLock::new();

/// Counters describing pool activity since creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Buckets allocated because the free list was empty.
    pub allocated: u64,
    /// Buckets handed out from the free list.
    pub reused: u64,
    /// Buckets accepted back into the free list.
    pub recycled: u64,
    /// Buckets dropped on release because the pool was full.
    pub discarded: u64,
}

/// Free list of cleared buckets with a fixed upper bound.
#[derive(Debug)]
pub struct BucketPool {
    free: Mutex<Vec<Bucket>>,
    capacity: usize,
    allocated: AtomicU64,
    reused: AtomicU64,
    recycled: AtomicU64,
    discarded: AtomicU64,
}

impl BucketPool {
    /// Creates an empty pool that keeps at most `capacity` buckets.
    ///
    /// A capacity of `0` disables recycling.
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            allocated: AtomicU64::new(0),
            reused: AtomicU64::new(0),
            recycled: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    /// Process-wide pool used by scopes that are not given one explicitly.
    pub fn shared() -> Arc<BucketPool> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(BucketPool::new(DEFAULT_POOL_CAPACITY))))
    }

    /// Returns a cleared bucket, reusing a pooled one when available.
    pub fn acquire(&self) -> Bucket {
        let pooled = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        match pooled {
            Some(bucket) => {
                self.reused.fetch_add(1, Ordering::Relaxed);
                bucket
            }
            None => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                Bucket::default()
            }
        }
    }

    /// Clears `bucket` and keeps it if the pool is below capacity.
    ///
    /// Members still in the bucket are forgotten, not cancelled; cancel first.
    pub fn release(&self, mut bucket: Bucket) {
        bucket.clear();
        debug_assert!(bucket.is_cleared());

        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < self.capacity {
            free.push(bucket);
            drop(free);
            self.recycled.fetch_add(1, Ordering::Relaxed);
        } else {
            drop(free);
            self.discarded.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Number of buckets currently pooled.
    pub fn len(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True if no bucket is pooled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upper bound on pooled buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the activity counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            allocated: self.allocated.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            recycled: self.recycled.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }
}

impl Default for BucketPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::LifecycleEvent;
    use crate::subscription::Subscription;

    #[test]
    fn reuse_within_capacity_allocates_nothing() {
        let pool = BucketPool::new(4);
        let buckets: Vec<_> = (0..4).map(|_| pool.acquire()).collect();
        assert_eq!(pool.stats().allocated, 4);

        for b in buckets {
            pool.release(b);
        }
        assert_eq!(pool.len(), 4);

        let again: Vec<_> = (0..4).map(|_| pool.acquire()).collect();
        let stats = pool.stats();
        assert_eq!(stats.allocated, 4, "no new allocation expected");
        assert_eq!(stats.reused, 4);
        assert!(pool.is_empty());
        drop(again);
    }

    #[test]
    fn release_beyond_capacity_is_discarded() {
        let pool = BucketPool::new(2);
        let buckets: Vec<_> = (0..5).map(|_| pool.acquire()).collect();
        for b in buckets {
            pool.release(b);
        }
        assert_eq!(pool.len(), 2);
        let stats = pool.stats();
        assert_eq!(stats.recycled, 2);
        assert_eq!(stats.discarded, 3);
    }

    #[test]
    fn released_buckets_come_back_cleared() {
        let pool = BucketPool::new(1);
        let mut b = pool.acquire();
        b.key(LifecycleEvent::Stop);
        let sub = Subscription::new(Some(LifecycleEvent::Stop));
        b.add(&sub);
        assert_eq!(b.live(), 1);

        pool.release(b);
        let b = pool.acquire();
        assert_eq!(b.event(), None);
        assert_eq!(b.live(), 0);
        assert!(!sub.is_unsubscribed(), "release must not cancel members");
    }

    #[test]
    fn zero_capacity_disables_recycling() {
        let pool = BucketPool::new(0);
        pool.release(pool.acquire());
        assert!(pool.is_empty());
        assert_eq!(pool.stats().discarded, 1);
    }

    #[test]
    fn shared_pool_is_a_singleton() {
        assert!(Arc::ptr_eq(&BucketPool::shared(), &BucketPool::shared()));
    }

    #[test]
    fn concurrent_release_respects_bound() {
        let pool = Arc::new(BucketPool::new(8));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || {
                    for _ in 0..16 {
                        let b = pool.acquire();
                        pool.release(b);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(pool.len() <= pool.capacity());
    }
}
