//! The node-side view the mobility engine reads from and writes to.

use uw_core::{EntityId, SimTime, Vec3};

use crate::LocationSample;

/// Kinematic state a mobility pattern drives.
///
/// Implemented by whatever owns a node's public position in the embedding
/// simulator.  The pattern reads the current state once at start (to seed its
/// cache) and writes every tick's sample back through
/// [`apply_sample`](Self::apply_sample).
pub trait MobileEntity {
    fn id(&self) -> EntityId;

    fn position(&self) -> Vec3;

    fn velocity(&self) -> Vec3;

    fn speed(&self) -> f64;

    /// Simulated time of the last write-back.
    fn position_update_time(&self) -> SimTime;

    /// Overwrite position, velocity and speed from `sample`, stamped `at`.
    fn apply_sample(&mut self, sample: &LocationSample, at: SimTime);
}

/// Plain-data `MobileEntity`: what a simulator that has no richer node type
/// stores per node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeKinematics {
    pub id:                   EntityId,
    pub position:             Vec3,
    pub velocity:             Vec3,
    pub speed:                f64,
    pub position_update_time: SimTime,
}

impl NodeKinematics {
    pub fn new(id: EntityId, position: Vec3, velocity: Vec3) -> Self {
        Self {
            id,
            position,
            velocity,
            speed: velocity.norm(),
            position_update_time: SimTime::ZERO,
        }
    }

    pub fn stationary(id: EntityId, position: Vec3) -> Self {
        Self::new(id, position, Vec3::ZERO)
    }
}

impl MobileEntity for NodeKinematics {
    #[inline]
    fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    fn position_update_time(&self) -> SimTime {
        self.position_update_time
    }

    fn apply_sample(&mut self, sample: &LocationSample, at: SimTime) {
        self.position = sample.position;
        self.velocity = sample.velocity;
        self.speed = sample.speed();
        self.position_update_time = at;
    }
}
