//! Piecewise-straight random walk.

use std::f64::consts::TAU;

use uw_core::{EntityId, EntityRng, SimTime, UwError, Vec3};

use crate::{GenerationContext, LocationSample, MobilityError, MobilityResult, MovementStrategy};

/// Random walk in legs: every `leg_steps` samples a fresh heading and speed
/// are drawn; in between, the node coasts.
///
/// Heading azimuth is uniform in `[0, 2π)`; pitch is uniform in
/// `[-max_pitch, max_pitch]` radians, so `max_pitch = 0` keeps the node at
/// constant depth.  Draws come from an [`EntityRng`] keyed on
/// `(seed, entity)`, so runs are reproducible per node and restarts replay
/// the same walk.
#[derive(Debug)]
pub struct RandomWalk {
    speed_min:  f64,
    speed_max:  f64,
    max_pitch:  f64,
    leg_steps:  u32,
    seed:       u64,
    rng:        Option<EntityRng>,
    steps_left: u32,
}

impl RandomWalk {
    /// # Errors
    ///
    /// Config error if the speed range is empty, negative or non-finite, if
    /// `max_pitch` is outside `[0, π/2]`, or if `leg_steps` is zero.
    pub fn new(speed_min: f64, speed_max: f64, max_pitch: f64, leg_steps: u32, seed: u64) -> MobilityResult<Self> {
        if !(speed_min.is_finite() && speed_max.is_finite()) || speed_min < 0.0 || speed_max < speed_min {
            return Err(UwError::Config(format!(
                "random walk speed range [{speed_min}, {speed_max}] is invalid"
            ))
            .into());
        }
        if !(0.0..=std::f64::consts::FRAC_PI_2).contains(&max_pitch) {
            return Err(UwError::Config(format!("random walk max_pitch {max_pitch} is outside [0, pi/2]")).into());
        }
        if leg_steps == 0 {
            return Err(UwError::Config("random walk leg_steps must be at least 1".into()).into());
        }
        Ok(Self {
            speed_min,
            speed_max,
            max_pitch,
            leg_steps,
            seed,
            rng: None,
            steps_left: 0,
        })
    }

    fn draw_velocity(rng: &mut EntityRng, speed_min: f64, speed_max: f64, max_pitch: f64) -> Vec3 {
        let speed = rng.gen_range(speed_min..=speed_max);
        let azimuth = rng.gen_range(0.0..TAU);
        let pitch = rng.gen_range(-max_pitch..=max_pitch);
        Vec3::new(
            speed * pitch.cos() * azimuth.cos(),
            speed * pitch.cos() * azimuth.sin(),
            speed * pitch.sin(),
        )
    }
}

impl MovementStrategy for RandomWalk {
    fn init(&mut self, entity: EntityId, _seed: &LocationSample, _at: SimTime) {
        self.rng = Some(EntityRng::new(self.seed, entity));
        self.steps_left = 0;
    }

    fn next_sample(&mut self, ctx: &GenerationContext<'_>) -> MobilityResult<LocationSample> {
        let rng = self.rng.as_mut().ok_or_else(|| {
            MobilityError::InvariantViolation(format!("random walk for {} used before init", ctx.entity))
        })?;

        let velocity = if self.steps_left == 0 {
            self.steps_left = self.leg_steps;
            Self::draw_velocity(rng, self.speed_min, self.speed_max, self.max_pitch)
        } else {
            ctx.previous.velocity
        };
        self.steps_left -= 1;

        Ok(LocationSample::new(
            ctx.previous.position + velocity * ctx.interval.as_secs_f64(),
            velocity,
        ))
    }

    fn name(&self) -> &'static str {
        "random-walk"
    }
}
