//! A single point on a trajectory.

use uw_core::{SimDuration, Vec3};

/// Position (m) and velocity (m/s) of a node at one simulated instant.
///
/// The instant itself is not stored: a sample's time is implied by its slot
/// in the [`TrajectoryCache`][crate::TrajectoryCache].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct LocationSample {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl LocationSample {
    #[inline]
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    /// A sample at rest at `position`.
    #[inline]
    pub fn stationary(position: Vec3) -> Self {
        Self { position, velocity: Vec3::ZERO }
    }

    /// Scalar speed — the magnitude of `velocity`.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// The sample reached by coasting at the current velocity for `dt`.
    #[inline]
    pub fn advanced(&self, dt: SimDuration) -> Self {
        Self {
            position: self.position + self.velocity * dt.as_secs_f64(),
            velocity: self.velocity,
        }
    }
}
