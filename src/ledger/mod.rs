//! Event-bucket ledger: subscriptions indexed by the phase that tears them down.
//!
//! ## Contents
//! - [`Bucket`] all subscriptions waiting on one phase, plus their group handle
//! - [`BucketPool`] bounded free list of cleared buckets shared across scopes
//! - [`Ledger`] ordinally sorted chain of buckets stored in an arena (index links)
//!
//! ## Shape
//! ```text
//!   head = anchor (current phase)
//!        │
//!    [Resume] ◄──► [Pause] ◄──► [Stop] ◄──► [Destroy]
//!                  pending buckets, strictly ascending
//! ```
//! Between drains the head *is* the anchor; everything behind it has been
//! cancelled and recycled.
//!
//! The ledger itself is crate-private: only a scope may drive it, after its
//! thread, expiry and regression checks.

mod bucket;
mod chain;
mod pool;

pub use bucket::Bucket;
pub use chain::DrainReport;
pub(crate) use chain::Ledger;
pub use pool::{BucketPool, PoolStats, DEFAULT_POOL_CAPACITY};
