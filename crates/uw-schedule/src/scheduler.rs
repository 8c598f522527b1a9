//! The `Scheduler` trait consumed by periodic drivers.

use uw_core::{SimDuration, SimTime};

use crate::EventHandle;

/// Anything that can hold future events carrying a `T` payload.
///
/// Components that schedule themselves (such as the mobility update driver)
/// depend on this trait rather than on a concrete queue, so tests can hand
/// them a bare [`EventQueue`][crate::EventQueue].
pub trait Scheduler<T> {
    /// Schedule `payload` to fire at absolute time `at`.
    fn schedule_at(&mut self, at: SimTime, payload: T) -> EventHandle;

    /// Schedule `payload` to fire `delay` after `now`.
    fn schedule_after(&mut self, now: SimTime, delay: SimDuration, payload: T) -> EventHandle {
        self.schedule_at(now + delay, payload)
    }

    /// Deregister a pending event.  Returns its payload, or `None` if the
    /// event already fired or was cancelled.
    fn cancel(&mut self, handle: EventHandle) -> Option<T>;
}
