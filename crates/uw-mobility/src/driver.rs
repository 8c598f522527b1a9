//! `PeriodicUpdateDriver` — re-arms itself every `update_interval` and ticks
//! the pattern it belongs to.

use tracing::trace;

use uw_core::{BoundaryBox, EntityId, SimDuration, SimTime};
use uw_schedule::{EventHandle, Scheduler};
use uw_spatial::SpatialIndex;

use crate::{LocationSample, MobileEntity, MobilityPattern, MobilityResult, MovementStrategy};

/// Tracks the one pending tick event for an entity.
///
/// The scheduler payload is the `EntityId`; the simulator routes a fired
/// event back to this driver, which drops it unless it is the handle it is
/// waiting for, so an event popped before its cancellation is ignored.
#[derive(Clone, Debug)]
pub struct PeriodicUpdateDriver {
    entity:   EntityId,
    interval: SimDuration,
    pending:  Option<EventHandle>,
}

impl PeriodicUpdateDriver {
    pub fn new(entity: EntityId, interval: SimDuration) -> Self {
        Self { entity, interval, pending: None }
    }

    /// A driver ticking at `pattern`'s configured update interval.
    pub fn for_pattern<S: MovementStrategy>(pattern: &MobilityPattern<S>) -> Self {
        Self::new(pattern.entity(), pattern.config().update_interval)
    }

    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[inline]
    pub fn interval(&self) -> SimDuration {
        self.interval
    }

    #[inline]
    pub fn pending(&self) -> Option<EventHandle> {
        self.pending
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule the next tick at `now + interval`, replacing any pending one.
    pub fn arm<Q>(&mut self, scheduler: &mut Q, now: SimTime) -> EventHandle
    where
        Q: Scheduler<EntityId> + ?Sized,
    {
        if let Some(old) = self.pending.take() {
            scheduler.cancel(old);
        }
        let handle = scheduler.schedule_after(now, self.interval, self.entity);
        self.pending = Some(handle);
        handle
    }

    /// Handle a fired event.
    ///
    /// Returns `Ok(None)` for a stale handle or an inactive pattern (the
    /// driver then stays disarmed).  Otherwise ticks the pattern, re-arms,
    /// and returns the applied sample.  On error the driver is left
    /// disarmed.
    #[allow(clippy::too_many_arguments)]
    pub fn fire<S, E, I, Q>(
        &mut self,
        handle:    EventHandle,
        now:       SimTime,
        pattern:   &mut MobilityPattern<S>,
        entity:    &mut E,
        index:     &mut I,
        bounds:    &BoundaryBox,
        scheduler: &mut Q,
    ) -> MobilityResult<Option<LocationSample>>
    where
        S: MovementStrategy,
        E: MobileEntity + ?Sized,
        I: SpatialIndex + ?Sized,
        Q: Scheduler<EntityId> + ?Sized,
    {
        if self.pending != Some(handle) {
            trace!(entity = %self.entity, %now, "ignoring stale tick");
            return Ok(None);
        }
        self.pending = None;

        if !pattern.is_active() {
            trace!(entity = %self.entity, %now, "pattern inactive, driver disarmed");
            return Ok(None);
        }

        let sample = pattern.handle_location_update(now, entity, index, bounds)?;
        self.arm(scheduler, now);
        Ok(Some(sample))
    }

    /// Deregister the pending tick.  Returns whether one was pending.
    pub fn cancel<Q>(&mut self, scheduler: &mut Q) -> bool
    where
        Q: Scheduler<EntityId> + ?Sized,
    {
        match self.pending.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }
}
