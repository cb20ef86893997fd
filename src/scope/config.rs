//! # Scope configuration.
//!
//! Provides [`ScopeConfig`], the settings a [`ScopeBuilder`](crate::ScopeBuilder)
//! starts from.
//!
//! ## Sentinel values
//! - `name = ""` → the policy name is used
//! - `bus_capacity = 0` → no event bus (events are not published)
//! - `pool_capacity = 0` → the process-wide [`BucketPool::shared`](crate::BucketPool::shared)

/// Settings for one lifecycle scope.
///
/// ## Field semantics
/// - `name`: label used in logs and events
/// - `bus_capacity`: ring buffer size of a private event bus (`0` = none)
/// - `pool_capacity`: capacity of a private bucket pool (`0` = shared pool)
///
/// A bus or pool passed to the builder explicitly wins over these fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeConfig {
    /// Label for logs and events.
    pub name: String,

    /// Capacity of a private event bus.
    ///
    /// - `0` = no bus
    /// - `n > 0` = a bus holding the `n` most recent events
    pub bus_capacity: usize,

    /// Capacity of a private bucket pool.
    ///
    /// - `0` = use the process-wide shared pool
    /// - `n > 0` = this scope recycles into its own pool of `n` buckets
    pub pool_capacity: usize,
}

impl ScopeConfig {
    /// Returns the private bus capacity as an `Option`.
    #[inline]
    pub fn bus_capacity(&self) -> Option<usize> {
        match self.bus_capacity {
            0 => None,
            n => Some(n),
        }
    }

    /// Returns the private pool capacity as an `Option`.
    #[inline]
    pub fn private_pool_capacity(&self) -> Option<usize> {
        match self.pool_capacity {
            0 => None,
            n => Some(n),
        }
    }

    /// Returns the configured name, or `fallback` when it is empty.
    #[inline]
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.name.is_empty() {
            fallback
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels() {
        let cfg = ScopeConfig::default();
        assert_eq!(cfg.bus_capacity(), None);
        assert_eq!(cfg.private_pool_capacity(), None);
        assert_eq!(cfg.name_or("fragment"), "fragment");

        let cfg = ScopeConfig {
            name: "details".into(),
            bus_capacity: 64,
            pool_capacity: 4,
        };
        assert_eq!(cfg.bus_capacity(), Some(64));
        assert_eq!(cfg.private_pool_capacity(), Some(4));
        assert_eq!(cfg.name_or("fragment"), "details");
    }
}
