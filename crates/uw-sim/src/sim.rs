//! The `Sim` struct and its event loop.

use tracing::{debug, info};

use uw_core::{BoundaryBox, EntityId, SimClock, SimConfig, SimTime};
use uw_mobility::{
    LocationSample, MobilityPattern, MovementStrategy, NodeKinematics, PatternState, PeriodicUpdateDriver,
};
use uw_schedule::{EventHandle, EventQueue};
use uw_spatial::SpatialIndex;

use crate::{SimError, SimObserver, SimResult};

/// The main simulation runner.
///
/// Per node `i` (`EntityId(i)`), `nodes[i]`, `patterns[i]` and `drivers[i]`
/// belong together.  The sim owns the nodes, the index and the box; patterns
/// borrow them for the duration of each tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<I: SpatialIndex> {
    /// Stop time and global seed.
    pub config: SimConfig,

    /// Simulation clock; jumps to each event's time as it fires.
    pub clock: SimClock,

    /// Deployment volume shared by every pattern.
    pub bounds: BoundaryBox,

    /// Public kinematic state of every node, indexed by `EntityId`.
    pub nodes: Vec<NodeKinematics>,

    pub(crate) patterns: Vec<MobilityPattern<Box<dyn MovementStrategy>>>,
    pub(crate) drivers:  Vec<PeriodicUpdateDriver>,

    /// Spatial index, notified on every x change.
    pub index: I,

    /// Pending tick events; the payload routes each event to its node.
    pub(crate) queue: EventQueue<EntityId>,

    pub(crate) started: bool,
}

impl<I: SpatialIndex> Sim<I> {
    // ── Public API ────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn node(&self, entity: EntityId) -> Option<&NodeKinematics> {
        self.nodes.get(entity.index())
    }

    pub fn pattern(&self, entity: EntityId) -> Option<&MobilityPattern<Box<dyn MovementStrategy>>> {
        self.patterns.get(entity.index())
    }

    /// Number of tick events waiting in the queue.
    #[inline]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Start every node's pattern at the current time and arm its driver.
    /// Called by [`run`](Self::run) if not done explicitly; a second call is a
    /// no-op.
    pub fn start<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if self.started {
            return Ok(());
        }
        let now = self.clock.now();
        for ((pattern, node), driver) in self.patterns.iter_mut().zip(&mut self.nodes).zip(&mut self.drivers) {
            pattern.start(now, node, &mut self.index, &self.bounds)?;
            driver.arm(&mut self.queue, now);
        }
        self.started = true;
        info!(nodes = self.nodes.len(), %now, stop = %self.config.stop_time, "simulation started");
        observer.on_start(now, &self.nodes);
        Ok(())
    }

    /// Start if needed, process every event up to and including
    /// `config.stop_time`, then leave the clock at the stop time.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.start(observer)?;
        let fired = self.run_until(self.config.stop_time, observer)?;
        info!(end = %self.clock.now(), fired, "simulation finished");
        observer.on_sim_end(self.clock.now(), &self.nodes);
        Ok(())
    }

    /// Process events up to and including `limit`, then advance the clock to
    /// `limit`.  Returns the number of events dispatched.  Does not start
    /// patterns; call [`start`](Self::start) first.
    pub fn run_until<O: SimObserver>(&mut self, limit: SimTime, observer: &mut O) -> SimResult<u64> {
        let mut fired = 0;
        while let Some((handle, entity)) = self.queue.pop_due(limit) {
            self.dispatch(handle, entity, observer)?;
            fired += 1;
        }
        if limit > self.clock.now() {
            self.clock.advance_to(limit);
        }
        Ok(fired)
    }

    /// Dispatch the single earliest event if it is due at or before the stop
    /// time.  Returns its time, or `None` when nothing is left to do.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Option<SimTime>> {
        let Some((handle, entity)) = self.queue.pop_due(self.config.stop_time) else {
            return Ok(None);
        };
        self.dispatch(handle, entity, observer)?;
        Ok(Some(handle.time()))
    }

    /// Where `entity` is (or will be) at `t`, judged from the current clock.
    /// Past times must still be cached; future times must lie within one
    /// cache depth of now.
    pub fn location_at(&mut self, entity: EntityId, t: SimTime) -> SimResult<LocationSample> {
        let now = self.clock.now();
        let pattern = self.patterns.get_mut(entity.index()).ok_or(SimError::UnknownEntity(entity))?;
        Ok(pattern.location_at(t, now, &self.bounds)?)
    }

    /// Stop moving `entity`: cancel its pending tick, release its trajectory,
    /// and drop it from the spatial index.  The node keeps its last position.
    pub fn teardown(&mut self, entity: EntityId) -> SimResult<()> {
        let i = entity.index();
        let (Some(pattern), Some(driver)) = (self.patterns.get_mut(i), self.drivers.get_mut(i)) else {
            return Err(SimError::UnknownEntity(entity));
        };
        if pattern.state() != PatternState::Active {
            return Ok(());
        }
        driver.cancel(&mut self.queue);
        pattern.stop();
        self.index.remove(entity)?;
        debug!(%entity, now = %self.clock.now(), "node torn down");
        Ok(())
    }

    /// Start `entity` again from its current position with a fresh
    /// trajectory.  Works on active nodes too (the old trajectory is
    /// discarded).  Returns the sample applied at the current time.
    pub fn restart(&mut self, entity: EntityId) -> SimResult<LocationSample> {
        let i = entity.index();
        let now = self.clock.now();
        let (Some(pattern), Some(node), Some(driver)) =
            (self.patterns.get_mut(i), self.nodes.get_mut(i), self.drivers.get_mut(i))
        else {
            return Err(SimError::UnknownEntity(entity));
        };
        if pattern.state() == PatternState::Stopped {
            self.index.insert(entity, node.position)?;
        }
        let sample = pattern.start(now, node, &mut self.index, &self.bounds)?;
        driver.arm(&mut self.queue, now);
        debug!(%entity, %now, "node restarted");
        Ok(sample)
    }

    // ── Event dispatch ────────────────────────────────────────────────────

    fn dispatch<O: SimObserver>(&mut self, handle: EventHandle, entity: EntityId, observer: &mut O) -> SimResult<()> {
        let now = handle.time();
        self.clock.advance_to(now);

        let i = entity.index();
        let (Some(pattern), Some(node), Some(driver)) =
            (self.patterns.get_mut(i), self.nodes.get_mut(i), self.drivers.get_mut(i))
        else {
            return Err(SimError::UnknownEntity(entity));
        };

        if let Some(sample) =
            driver.fire(handle, now, pattern, node, &mut self.index, &self.bounds, &mut self.queue)?
        {
            observer.on_position_update(now, entity, &sample);
        }
        Ok(())
    }
}
