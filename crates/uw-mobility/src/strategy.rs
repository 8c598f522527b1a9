//! `MovementStrategy` — the pluggable rule that produces the next sample.
//!
//! The pattern engine owns caching, bounds and write-back; a strategy only
//! answers "given the previous sample, where is the node one interval later?".
//! Implement it once per motion model (random walk, waypoints, trace replay,
//! …) and hand it to [`MobilityPattern::new`][crate::MobilityPattern::new].

use uw_core::{EntityId, SimDuration, SimTime};

use crate::{LocationSample, MobilityError, MobilityResult};

/// Inputs for generating one sample.
#[derive(Clone, Copy, Debug)]
pub struct GenerationContext<'a> {
    pub entity:   EntityId,
    /// The newest sample already in the cache (post-reflection).
    pub previous: &'a LocationSample,
    /// The time the generated sample will be stored under.
    pub at:       SimTime,
    /// Spacing between `previous` and the new sample.
    pub interval: SimDuration,
}

pub trait MovementStrategy {
    /// Called by `MobilityPattern::start` after the cache is seeded with the
    /// node's current state.  A restart calls it again.
    fn init(&mut self, _entity: EntityId, _seed: &LocationSample, _at: SimTime) {}

    /// Produce the unreflected candidate for `ctx.at`.  The engine reflects it
    /// into the deployment box before caching.
    fn next_sample(&mut self, ctx: &GenerationContext<'_>) -> MobilityResult<LocationSample>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

impl<S: MovementStrategy + ?Sized> MovementStrategy for Box<S> {
    fn init(&mut self, entity: EntityId, seed: &LocationSample, at: SimTime) {
        (**self).init(entity, seed, at)
    }

    fn next_sample(&mut self, ctx: &GenerationContext<'_>) -> MobilityResult<LocationSample> {
        (**self).next_sample(ctx)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

// ── Unconfigured ──────────────────────────────────────────────────────────────

/// Placeholder for a pattern that was never given a motion model.  Any
/// generation attempt is a wiring error.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unconfigured;

impl MovementStrategy for Unconfigured {
    fn next_sample(&mut self, ctx: &GenerationContext<'_>) -> MobilityResult<LocationSample> {
        Err(MobilityError::InvariantViolation(format!(
            "{} has no movement strategy configured (asked for {})",
            ctx.entity, ctx.at
        )))
    }

    fn name(&self) -> &'static str {
        "unconfigured"
    }
}

// ── ConstantVelocity ──────────────────────────────────────────────────────────

/// Coast at the previous sample's velocity.
///
/// Velocity reversals from boundary reflection carry over, so a node seeded
/// with a non-zero velocity ping-pongs inside the box indefinitely.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantVelocity;

impl MovementStrategy for ConstantVelocity {
    fn next_sample(&mut self, ctx: &GenerationContext<'_>) -> MobilityResult<LocationSample> {
        Ok(ctx.previous.advanced(ctx.interval))
    }

    fn name(&self) -> &'static str {
        "constant-velocity"
    }
}
