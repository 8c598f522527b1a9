//! Mobility configuration.

use uw_core::{SimDuration, UwError, UwResult};

use crate::TrajectoryCache;

/// Per-pattern timing configuration.
///
/// Defaults: 1 ms between trajectory samples, 5 s of trajectory retained
/// (5 001 samples per node).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MobilityConfig {
    /// Spacing between cached samples, and the period of the update driver.
    pub update_interval: SimDuration,

    /// How much trajectory history the cache retains.
    pub cache_duration: SimDuration,
}

impl MobilityConfig {
    /// # Errors
    ///
    /// [`UwError::Config`] if `update_interval` is zero or the cache would
    /// need more than [`MAX_CACHE_SLOTS`][crate::cache::MAX_CACHE_SLOTS]
    /// samples.
    pub fn validate(&self) -> UwResult<()> {
        if self.update_interval.is_zero() {
            return Err(UwError::Config("mobility update_interval must be positive".into()));
        }
        self.cache_capacity().map(|_| ())
    }

    /// Samples a cache needs to span `cache_duration`: `1 + ceil(duration / interval)`.
    pub fn cache_capacity(&self) -> UwResult<usize> {
        TrajectoryCache::capacity_for(self.cache_duration, self.update_interval)
    }
}

impl Default for MobilityConfig {
    fn default() -> Self {
        Self {
            update_interval: SimDuration::from_millis(1),
            cache_duration:  SimDuration::from_secs(5),
        }
    }
}
