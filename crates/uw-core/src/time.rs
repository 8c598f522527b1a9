//! Simulation time model.
//!
//! # Design
//!
//! Simulated time is an integer count of nanoseconds since the start of the
//! run.  Two newtypes keep instants and spans apart:
//!
//! - [`SimTime`] — an absolute instant on the simulation clock.
//! - [`SimDuration`] — a non-negative span between two instants.
//!
//! Using integers as the canonical unit means trajectory arithmetic is exact:
//! `first + i * interval` and `(t - first) / interval` never drift, so a 5 s
//! cache sampled every 0.001 s has exactly 5 001 slots.  Conversions from
//! floating-point seconds round to the nearest nanosecond and happen only at
//! the configuration boundary.

use std::fmt;
use std::ops::{Add, Mul, Sub};

const NANOS_PER_SEC: u64 = 1_000_000_000;

// ── SimDuration ───────────────────────────────────────────────────────────────

/// A span of simulated time, in nanoseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimDuration(pub u64);

impl SimDuration {
    pub const ZERO: SimDuration = SimDuration(0);

    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        SimDuration(nanos)
    }

    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        SimDuration(micros * 1_000)
    }

    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        SimDuration(millis * 1_000_000)
    }

    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        SimDuration(secs * NANOS_PER_SEC)
    }

    /// Convert fractional seconds, rounding to the nearest nanosecond.
    ///
    /// Negative and NaN inputs saturate to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        SimDuration((secs * NANOS_PER_SEC as f64).round() as u64)
    }

    #[inline]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC as f64
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Number of whole `step`s that fit in `self` (rounds down).
    ///
    /// # Panics
    /// Panics if `step` is zero.
    #[inline]
    pub fn steps_of(self, step: SimDuration) -> u64 {
        self.0 / step.0
    }

    /// Number of `step`s needed to cover `self` (rounds up).
    ///
    /// # Panics
    /// Panics if `step` is zero.
    #[inline]
    pub fn div_ceil(self, step: SimDuration) -> u64 {
        self.0.div_ceil(step.0)
    }
}

impl Add for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimDuration {
        SimDuration(self.0 + rhs.0)
    }
}

impl Mul<u64> for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn mul(self, rhs: u64) -> SimDuration {
        SimDuration(self.0 * rhs)
    }
}

impl fmt::Display for SimDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}s", self.as_secs_f64())
    }
}

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute instant on the simulation clock, in nanoseconds since start.
///
/// Stored as `u64`: at nanosecond resolution that is ~584 years of simulated
/// time, far longer than any acoustic network run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        SimTime(nanos)
    }

    /// Convert fractional seconds since start, rounding to the nearest
    /// nanosecond.  Negative inputs saturate to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        SimTime(SimDuration::from_secs_f64(secs).0)
    }

    #[inline]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC as f64
    }

    /// Time elapsed from `earlier` to `self`, or `None` if `earlier` is later.
    #[inline]
    pub fn checked_since(self, earlier: SimTime) -> Option<SimDuration> {
        self.0.checked_sub(earlier.0).map(SimDuration)
    }

    /// Time elapsed from `earlier` to `self`, clamped at zero.
    #[inline]
    pub fn saturating_since(self, earlier: SimTime) -> SimDuration {
        SimDuration(self.0.saturating_sub(earlier.0))
    }
}

impl Add<SimDuration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl Sub for SimTime {
    type Output = SimDuration;

    /// # Panics
    /// Panics in debug mode if `rhs > self`.
    #[inline]
    fn sub(self, rhs: SimTime) -> SimDuration {
        SimDuration(self.0 - rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.6}s", self.as_secs_f64())
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The current simulated instant.
///
/// The clock only moves forward; the event loop advances it to the time of
/// each event it dispatches.  Every mobility operation takes `now` explicitly,
/// so components never read a global clock.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `t`.  Earlier instants are ignored so the
    /// clock stays monotonic.
    #[inline]
    pub fn advance_to(&mut self, t: SimTime) {
        debug_assert!(t >= self.now, "clock moved backwards: {t} < {}", self.now);
        self.now = self.now.max(t);
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.now, f)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Instant at which the run stops (inclusive: events due exactly at
    /// `stop_time` still fire).
    pub stop_time: SimTime,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new()
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            stop_time: SimTime::from_nanos(SimDuration::from_secs(600).as_nanos()),
            seed:      0,
        }
    }
}
