//! `MobilityPattern` — the engine that turns a strategy into a cached,
//! bounded trajectory and keeps one node's public position current.
//!
//! # Context passing
//!
//! A pattern stores only its own state (cache, strategy, lifecycle).  The
//! node it drives, the spatial index it notifies and the deployment box are
//! borrowed per call, so the embedding simulator keeps ownership of all three
//! and the pattern never holds a back-reference.

use tracing::{debug, trace, warn};

use uw_core::{BoundaryBox, EntityId, SimTime};
use uw_spatial::SpatialIndex;

use crate::{
    restrict_to_bounds, GenerationContext, LocationSample, MobileEntity, MobilityConfig, MobilityError,
    MobilityResult, MovementStrategy, TrajectoryCache,
};

/// Lifecycle of a [`MobilityPattern`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternState {
    /// Constructed, never started.
    Inert,
    /// Started; owns a cache and answers ticks and queries.
    Active,
    /// Stopped; cache released.  `start` may be called again.
    Stopped,
}

/// Drives one node along a trajectory produced by a [`MovementStrategy`].
///
/// Samples are generated lazily, one `update_interval` apart, reflected into
/// the deployment box and kept in a [`TrajectoryCache`].  Ticks write the
/// sample for `now` onto the node; [`location_at`](Self::location_at) answers
/// nearby past and future times from the same cache.
pub struct MobilityPattern<S> {
    /// The node this pattern is bound to; every call checks it.
    entity:    EntityId,
    /// Sample spacing and retained history.
    config:    MobilityConfig,
    /// Produces the next unreflected sample.
    strategy:  S,
    /// Present only while `Active`; replaced on every `start`.
    cache:     Option<TrajectoryCache>,
    state:     PatternState,
    /// Samples cached since the last `start`, seed excluded.
    generated: u64,
}

impl<S: MovementStrategy> MobilityPattern<S> {
    /// A pattern bound to `entity`, driven by `strategy`.
    ///
    /// # Errors
    ///
    /// [`MobilityError::Config`] if `config` fails validation.
    pub fn new(entity: EntityId, config: MobilityConfig, strategy: S) -> MobilityResult<Self> {
        config.validate()?;
        Ok(Self {
            entity,
            config,
            strategy,
            cache: None,
            state: PatternState::Inert,
            generated: 0,
        })
    }

    // ── Introspection ─────────────────────────────────────────────────────

    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[inline]
    pub fn config(&self) -> &MobilityConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> PatternState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == PatternState::Active
    }

    /// The live cache, or `None` unless active.
    #[inline]
    pub fn cache(&self) -> Option<&TrajectoryCache> {
        self.cache.as_ref()
    }

    #[inline]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    #[inline]
    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    /// Generated samples appended to the cache since the last `start`.
    #[inline]
    pub fn generated_samples(&self) -> u64 {
        self.generated
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Begin (or restart) movement at `now`.
    ///
    /// Seeds a fresh cache with the entity's current position and velocity,
    /// initialises the strategy, and runs the first tick.  Restarting an
    /// active pattern discards its old cache.  Returns the sample applied by
    /// the first tick.
    pub fn start<E, I>(
        &mut self,
        now:    SimTime,
        entity: &mut E,
        index:  &mut I,
        bounds: &BoundaryBox,
    ) -> MobilityResult<LocationSample>
    where
        E: MobileEntity + ?Sized,
        I: SpatialIndex + ?Sized,
    {
        self.check_binding(entity.id())?;

        let seed = LocationSample::new(entity.position(), entity.velocity());
        let cache = TrajectoryCache::new(
            self.config.cache_duration,
            self.config.update_interval,
            seed,
            now,
        )?;
        if self.cache.replace(cache).is_some() {
            debug!(entity = %self.entity, %now, "restart discards previous trajectory");
        }
        self.generated = 0;
        self.strategy.init(self.entity, &seed, now);
        self.state = PatternState::Active;

        debug!(
            entity = %self.entity,
            %now,
            strategy = self.strategy.name(),
            position = %seed.position,
            "mobility pattern started"
        );

        self.handle_location_update(now, entity, index, bounds)
    }

    /// Release the cache.  Further ticks and queries fail until the next
    /// `start`.  Has no effect on an inert or already stopped pattern.
    pub fn stop(&mut self) {
        if self.state == PatternState::Active {
            self.cache = None;
            self.state = PatternState::Stopped;
            debug!(entity = %self.entity, generated = self.generated, "mobility pattern stopped");
        }
    }

    // ── Ticks and queries ─────────────────────────────────────────────────

    /// Advance the trajectory to `now` and write the sample for `now` onto
    /// `entity`.  Notifies `index` only when the x-coordinate changed.
    ///
    /// # Errors
    ///
    /// [`MobilityError::InvariantViolation`] if the pattern is not active, is
    /// bound to a different entity, or the strategy fails.
    /// [`MobilityError::OutOfRange`] if `now` precedes the oldest retained
    /// sample.
    pub fn handle_location_update<E, I>(
        &mut self,
        now:    SimTime,
        entity: &mut E,
        index:  &mut I,
        bounds: &BoundaryBox,
    ) -> MobilityResult<LocationSample>
    where
        E: MobileEntity + ?Sized,
        I: SpatialIndex + ?Sized,
    {
        self.check_binding(entity.id())?;
        self.extend_to(now, bounds)?;
        let sample = self.active_cache()?.get_by_time(now)?;

        let previous_x = entity.position().x;
        entity.apply_sample(&sample, now);
        let moved_x = sample.position.x != previous_x;
        if moved_x {
            index.notify_position_changed(self.entity, previous_x, sample.position);
        }

        trace!(entity = %self.entity, %now, position = %sample.position, moved_x, "location update");
        Ok(sample)
    }

    /// The sample covering `t`, generating ahead if `t` is past the newest
    /// cached sample.  Does not touch the node.
    ///
    /// # Errors
    ///
    /// [`MobilityError::OutOfRange`] unless
    /// `first_update_time <= t < now + interval * (capacity - 1)`.
    pub fn location_at(&mut self, t: SimTime, now: SimTime, bounds: &BoundaryBox) -> MobilityResult<LocationSample> {
        let cache = self.active_cache()?;
        if !cache.in_range(t, now) {
            let err = MobilityError::OutOfRange {
                requested: t,
                oldest: cache.first_update_time(),
                horizon: cache.horizon(now),
            };
            warn!(entity = %self.entity, %now, "{err}");
            return Err(err);
        }

        self.extend_to(t, bounds)?;
        self.active_cache()?.get_by_time(t)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Generate, reflect and append until the newest sample is at or past
    /// `target`.
    fn extend_to(&mut self, target: SimTime, bounds: &BoundaryBox) -> MobilityResult<()> {
        let entity = self.entity;
        let Some(cache) = self.cache.as_mut() else {
            return Err(not_active(entity));
        };
        let interval = cache.interval();

        while let Some(last) = cache.last_update_time().filter(|&last| last < target) {
            let previous = cache.newest().ok_or_else(|| not_active(entity))?;
            let ctx = GenerationContext { entity, previous: &previous, at: last + interval, interval };

            let mut sample = self.strategy.next_sample(&ctx)?;
            restrict_to_bounds(&mut sample, bounds)?;
            cache.append(sample);
            self.generated += 1;
        }
        Ok(())
    }

    fn active_cache(&self) -> MobilityResult<&TrajectoryCache> {
        self.cache.as_ref().ok_or_else(|| not_active(self.entity))
    }

    fn check_binding(&self, other: EntityId) -> MobilityResult<()> {
        if other != self.entity {
            return Err(MobilityError::InvariantViolation(format!(
                "pattern bound to {} was handed {}",
                self.entity, other
            )));
        }
        Ok(())
    }
}

fn not_active(entity: EntityId) -> MobilityError {
    MobilityError::InvariantViolation(format!("mobility pattern for {entity} is not active"))
}

impl<S> std::fmt::Debug for MobilityPattern<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MobilityPattern")
            .field("entity", &self.entity)
            .field("state", &self.state)
            .field("cached", &self.cache.as_ref().map_or(0, TrajectoryCache::len))
            .field("generated", &self.generated)
            .finish_non_exhaustive()
    }
}
