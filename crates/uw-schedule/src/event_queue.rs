//! `EventQueue` — time-ordered future events with O(log n) cancellation.
//!
//! Keyed by `(SimTime, seq)`: events at the same instant pop in insertion
//! order, and `cancel` removes the entry directly by its handle.

use std::collections::BTreeMap;

use tracing::trace;
use uw_core::SimTime;

use crate::Scheduler;

/// Opaque, cancellable reference to a scheduled event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EventHandle {
    at:  SimTime,
    seq: u64,
}

impl EventHandle {
    /// The instant the event is (or was) due.
    #[inline]
    pub fn time(self) -> SimTime {
        self.at
    }
}

/// A priority queue mapping `(time, seq)` → payload.
#[derive(Debug)]
pub struct EventQueue<T> {
    inner:    BTreeMap<(SimTime, u64), T>,
    next_seq: u64,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), next_seq: 0 }
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the earliest event, if any.
    pub fn pop_next(&mut self) -> Option<(EventHandle, T)> {
        let ((at, seq), payload) = self.inner.pop_first()?;
        Some((EventHandle { at, seq }, payload))
    }

    /// Remove and return the earliest event only if it is due at or before
    /// `limit`.
    pub fn pop_due(&mut self, limit: SimTime) -> Option<(EventHandle, T)> {
        match self.next_time() {
            Some(t) if t <= limit => self.pop_next(),
            _ => None,
        }
    }

    /// The earliest pending event time, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|&(t, _)| t)
    }

    /// `true` if `handle` is still pending.
    pub fn is_pending(&self, handle: EventHandle) -> bool {
        self.inner.contains_key(&(handle.at, handle.seq))
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<T> Scheduler<T> for EventQueue<T> {
    fn schedule_at(&mut self, at: SimTime, payload: T) -> EventHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.inner.insert((at, seq), payload);
        trace!(%at, seq, "event scheduled");
        EventHandle { at, seq }
    }

    fn cancel(&mut self, handle: EventHandle) -> Option<T> {
        let removed = self.inner.remove(&(handle.at, handle.seq));
        if removed.is_some() {
            trace!(at = %handle.at, seq = handle.seq, "event cancelled");
        }
        removed
    }
}
