//! Simulation observer trait for progress reporting and data collection.

use uw_core::{EntityId, SimTime};
use uw_mobility::{LocationSample, NodeKinematics};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// event loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — surfacing alarm
///
/// ```rust,ignore
/// struct DepthAlarm { floor: f64 }
///
/// impl SimObserver for DepthAlarm {
///     fn on_position_update(&mut self, now: SimTime, entity: EntityId, sample: &LocationSample) {
///         if sample.position.z < self.floor {
///             println!("{now}: {entity} below {}", self.floor);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once after every pattern has started, before the first event.
    fn on_start(&mut self, _now: SimTime, _nodes: &[NodeKinematics]) {}

    /// Called after each periodic update has been written onto a node.
    fn on_position_update(&mut self, _now: SimTime, _entity: EntityId, _sample: &LocationSample) {}

    /// Called once when the run reaches its stop time.
    fn on_sim_end(&mut self, _end: SimTime, _nodes: &[NodeKinematics]) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
