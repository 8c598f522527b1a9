//! `TrajectoryCache` — a fixed-capacity ring of samples indexed by time.
//!
//! # Design
//!
//! Slot `k` in logical order (oldest first) holds the sample for
//! `first_update_time + k * interval`.  The arena is allocated once at
//! `capacity`; appending to a full cache overwrites the oldest slot and slides
//! `first_update_time` forward by one interval, so the time ↔ slot mapping
//! stays exact after any number of wrap-arounds.
//!
//! ```text
//!  samples: [ s3 | s4 | s0 | s1 | s2 ]      capacity 5, full
//!                     ^ base
//!  first_update_time ─► s0,  s0 + interval ─► s1, …
//! ```

use uw_core::{SimDuration, SimTime, UwError, UwResult};

use crate::{LocationSample, MobilityError, MobilityResult};

/// Largest arena a cache may allocate: about 200 MB of samples, or 70 minutes
/// of history at 1 ms spacing.
pub const MAX_CACHE_SLOTS: usize = 1 << 22;

/// A node's recent trajectory: one [`LocationSample`] per `interval`, oldest
/// first, in a ring that never reallocates.
///
/// Appends must be evenly spaced and in time order; the cache derives each
/// sample's time from its slot and never checks it.
#[derive(Clone, Debug)]
pub struct TrajectoryCache {
    /// Ring arena, allocated once at full capacity.
    samples:           Vec<LocationSample>,
    /// Arena slot holding the oldest live sample.
    base:              usize,
    /// Number of live samples, at most `samples.len()`.
    live:              usize,
    /// Spacing between consecutive samples.
    interval:          SimDuration,
    /// Time of the sample in slot `base`.
    first_update_time: SimTime,
}

impl TrajectoryCache {
    /// Slots needed to retain `duration` at `interval` spacing:
    /// `1 + ceil(duration / interval)`.
    ///
    /// # Errors
    ///
    /// [`UwError::Config`] if `interval` is zero or the count exceeds
    /// [`MAX_CACHE_SLOTS`].
    pub fn capacity_for(duration: SimDuration, interval: SimDuration) -> UwResult<usize> {
        if interval.is_zero() {
            return Err(UwError::Config("trajectory interval must be positive".into()));
        }
        duration
            .div_ceil(interval)
            .checked_add(1)
            .and_then(|slots| usize::try_from(slots).ok())
            .filter(|&slots| slots <= MAX_CACHE_SLOTS)
            .ok_or_else(|| {
                UwError::Config(format!(
                    "caching {duration} at {interval} spacing needs more than {MAX_CACHE_SLOTS} samples"
                ))
            })
    }

    /// A cache sized to retain `duration` of trajectory at `interval`
    /// spacing, seeded with `seed` as the sample for `start`.
    ///
    /// Capacity is `1 + ceil(duration / interval)`.
    pub fn new(
        duration: SimDuration,
        interval: SimDuration,
        seed:     LocationSample,
        start:    SimTime,
    ) -> MobilityResult<Self> {
        let capacity = Self::capacity_for(duration, interval)?;
        let mut cache = Self::with_capacity(capacity, interval, start)?;
        cache.append(seed);
        Ok(cache)
    }

    /// An empty cache with an explicit slot count.  The first appended sample
    /// belongs to `start`.
    ///
    /// # Errors
    ///
    /// [`UwError::Config`] if `interval` is zero, `capacity` is zero or above
    /// [`MAX_CACHE_SLOTS`], or the arena cannot be allocated.
    pub fn with_capacity(
        capacity: usize,
        interval: SimDuration,
        start:    SimTime,
    ) -> MobilityResult<Self> {
        if interval.is_zero() {
            return Err(UwError::Config("trajectory interval must be positive".into()).into());
        }
        if capacity == 0 || capacity > MAX_CACHE_SLOTS {
            return Err(UwError::Config(format!(
                "trajectory cache capacity {capacity} is outside 1..={MAX_CACHE_SLOTS}"
            ))
            .into());
        }
        let mut samples = Vec::new();
        samples.try_reserve_exact(capacity).map_err(|e| {
            UwError::Config(format!("cannot allocate {capacity} trajectory samples: {e}"))
        })?;
        samples.resize(capacity, LocationSample::default());
        Ok(Self {
            samples,
            base: 0,
            live: 0,
            interval,
            first_update_time: start,
        })
    }

    // ── Shape ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.live == self.samples.len()
    }

    #[inline]
    pub fn interval(&self) -> SimDuration {
        self.interval
    }

    // ── Time window ───────────────────────────────────────────────────────

    /// Time of the oldest retained sample.
    #[inline]
    pub fn first_update_time(&self) -> SimTime {
        self.first_update_time
    }

    /// Time of the newest sample, or `None` while the cache is empty.
    pub fn last_update_time(&self) -> Option<SimTime> {
        let newest = self.live.checked_sub(1)?;
        Some(self.first_update_time + self.interval * newest as u64)
    }

    /// Exclusive upper bound for [`in_range`](Self::in_range) at clock `now`.
    #[inline]
    pub fn horizon(&self, now: SimTime) -> SimTime {
        now + self.interval * (self.capacity() as u64 - 1)
    }

    /// Whether `t` can be answered by this cache when the clock reads `now`:
    /// `first_update_time <= t < now + interval * (capacity - 1)`.
    ///
    /// The upper bound is relative to the clock, not to the newest sample, so
    /// it admits times that still have to be generated.
    #[inline]
    pub fn in_range(&self, t: SimTime, now: SimTime) -> bool {
        t >= self.first_update_time && t < self.horizon(now)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Append the sample for `last_update_time + interval` (or for the start
    /// time if empty).  When full, the oldest sample is overwritten and
    /// returned.
    pub fn append(&mut self, sample: LocationSample) -> Option<LocationSample> {
        let capacity = self.samples.len();
        let slot = (self.base + self.live) % capacity;
        if self.live == capacity {
            let evicted = std::mem::replace(&mut self.samples[slot], sample);
            self.base = (self.base + 1) % capacity;
            self.first_update_time = self.first_update_time + self.interval;
            Some(evicted)
        } else {
            self.samples[slot] = sample;
            self.live += 1;
            None
        }
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// The sample covering `t`: the one at or immediately before `t`.
    ///
    /// # Errors
    ///
    /// [`MobilityError::OutOfRange`] if `t` precedes the oldest sample or is
    /// past the newest one.
    pub fn get_by_time(&self, t: SimTime) -> MobilityResult<LocationSample> {
        let out_of_range = |horizon| MobilityError::OutOfRange {
            requested: t,
            oldest: self.first_update_time,
            horizon,
        };
        let last = self.last_update_time().ok_or_else(|| out_of_range(self.first_update_time))?;
        if t < self.first_update_time || t > last {
            return Err(out_of_range(last));
        }
        let offset = (t - self.first_update_time).steps_of(self.interval) as usize;
        Ok(self.samples[(self.base + offset) % self.samples.len()])
    }

    /// The most recently appended sample.
    pub fn newest(&self) -> Option<LocationSample> {
        let newest = self.live.checked_sub(1)?;
        Some(self.samples[(self.base + newest) % self.samples.len()])
    }

    /// The oldest retained sample.
    pub fn oldest(&self) -> Option<LocationSample> {
        (self.live > 0).then(|| self.samples[self.base])
    }

    /// Retained samples with their times, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (SimTime, LocationSample)> + '_ {
        let capacity = self.samples.len();
        (0..self.live).map(move |k| {
            (
                self.first_update_time + self.interval * k as u64,
                self.samples[(self.base + k) % capacity],
            )
        })
    }
}
