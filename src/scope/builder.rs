use std::sync::Arc;

use super::{LifecycleScope, ScopeConfig};
use crate::events::Bus;
use crate::ledger::BucketPool;
use crate::policies::ObservationPolicy;

/// Builder for a [`LifecycleScope`].
///
/// The scope is confined to the thread that calls [`build`](Self::build).
pub struct ScopeBuilder {
    policy: Arc<dyn ObservationPolicy>,
    cfg: ScopeConfig,
    pool: Option<Arc<BucketPool>>,
    bus: Option<Bus>,
}

impl ScopeBuilder {
    /// Creates a builder for a scope driven by `policy`.
    pub fn new(policy: Arc<dyn ObservationPolicy>) -> Self {
        Self {
            policy,
            cfg: ScopeConfig::default(),
            pool: None,
            bus: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: ScopeConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the scope name used in logs and events.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.cfg.name = name.into();
        self
    }

    /// Recycles buckets into `pool` instead of the configured one.
    pub fn with_pool(mut self, pool: Arc<BucketPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Publishes events on `bus` (e.g. one bus shared by several scopes).
    pub fn with_bus(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Builds the scope on the calling thread.
    ///
    /// - pool: explicit → private (`pool_capacity > 0`) → shared
    /// - bus: explicit → private (`bus_capacity > 0`) → none
    pub fn build(self) -> LifecycleScope {
        let pool = self.pool.unwrap_or_else(|| match self.cfg.private_pool_capacity() {
            Some(cap) => Arc::new(BucketPool::new(cap)),
            None => BucketPool::shared(),
        });
        let bus = self.bus.or_else(|| self.cfg.bus_capacity().map(Bus::new));
        let name: Arc<str> = Arc::from(self.cfg.name_or(self.policy.name()));
        LifecycleScope::new_internal(name, self.policy, pool, bus)
    }
}
