//! Follow a list of waypoints at constant speed.

use uw_core::{EntityId, SimTime, UwError, Vec3};

use crate::{GenerationContext, LocationSample, MobilityResult, MovementStrategy};

/// Travel waypoint to waypoint in straight lines at `speed` m/s.
///
/// When one interval's travel budget overshoots a waypoint, the remainder is
/// spent on the next leg.  A non-cyclic path parks the node at the last
/// waypoint with zero velocity; a cyclic path loops back to the first.
#[derive(Clone, Debug)]
pub struct WaypointPath {
    waypoints: Vec<Vec3>,
    speed:     f64,
    cyclic:    bool,
    next:      usize,
}

impl WaypointPath {
    /// # Errors
    ///
    /// Config error if `waypoints` is empty or contains non-finite points, or
    /// if `speed` is not a positive finite number.
    pub fn new(waypoints: Vec<Vec3>, speed: f64, cyclic: bool) -> MobilityResult<Self> {
        if waypoints.is_empty() {
            return Err(UwError::Config("waypoint path needs at least one waypoint".into()).into());
        }
        if let Some(bad) = waypoints.iter().find(|w| !w.is_finite()) {
            return Err(UwError::Config(format!("waypoint {bad} is not finite")).into());
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(UwError::Config(format!("waypoint speed {speed} must be positive")).into());
        }
        Ok(Self { waypoints, speed, cyclic, next: 0 })
    }

    /// Index of the waypoint currently being approached, or `None` once a
    /// non-cyclic path is finished.
    #[inline]
    pub fn next_index(&self) -> Option<usize> {
        (self.next < self.waypoints.len()).then_some(self.next)
    }

    fn advance(&mut self) {
        self.next += 1;
        if self.next == self.waypoints.len() && self.cyclic {
            self.next = 0;
        }
    }
}

impl MovementStrategy for WaypointPath {
    fn init(&mut self, _entity: EntityId, _seed: &LocationSample, _at: SimTime) {
        self.next = 0;
    }

    fn next_sample(&mut self, ctx: &GenerationContext<'_>) -> MobilityResult<LocationSample> {
        let mut position = ctx.previous.position;
        let mut budget = self.speed * ctx.interval.as_secs_f64();

        // Each waypoint is visited at most once per call; a cycle of
        // coincident waypoints would otherwise never consume budget.
        for _ in 0..=self.waypoints.len() {
            let Some(target) = self.waypoints.get(self.next).copied() else {
                break;
            };
            let to_target = target - position;
            let distance = to_target.norm();
            if distance <= budget {
                position = target;
                budget -= distance;
                self.advance();
                continue;
            }
            let heading = to_target * (1.0 / distance);
            return Ok(LocationSample::new(position + heading * budget, heading * self.speed));
        }

        Ok(LocationSample::stationary(position))
    }

    fn name(&self) -> &'static str {
        "waypoint"
    }
}
