use thiserror::Error;
use uw_core::{SimTime, UwError};

#[derive(Debug, Error)]
pub enum MobilityError {
    /// The requested time is older than the oldest retained sample or beyond
    /// the furthest time the cache can reach.  Expected in normal operation,
    /// since trajectory depth is bounded.
    #[error("time {requested} is outside the retrievable window (oldest {oldest}, horizon {horizon})")]
    OutOfRange {
        requested: SimTime,
        oldest:    SimTime,
        horizon:   SimTime,
    },

    /// A programming or wiring error: unstarted pattern, wrong entity, a
    /// strategy that was never configured, a non-finite position.
    #[error("mobility invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Config(#[from] UwError),

    #[error("trace parse error: {0}")]
    Trace(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MobilityError {
    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, MobilityError::OutOfRange { .. })
    }

    #[inline]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, MobilityError::InvariantViolation(_))
    }
}

pub type MobilityResult<T> = Result<T, MobilityError>;
