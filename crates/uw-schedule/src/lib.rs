//! `uw-schedule` — the discrete-event scheduler seam.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`event_queue`] | `EventQueue<T>` (`BTreeMap<(SimTime, seq), T>`), `EventHandle` |
//! | [`scheduler`]   | `Scheduler<T>` trait                                       |
//!
//! # Ordering model
//!
//! Events fire in non-decreasing simulated time.  Events scheduled for the
//! same instant fire in the order they were scheduled (a monotonically
//! increasing sequence number breaks ties), so runs are reproducible.

pub mod event_queue;
pub mod scheduler;


pub use event_queue::{EventHandle, EventQueue};
pub use scheduler::Scheduler;
