//! `uw-sim` — discrete-event runner for mobile underwater nodes.
//!
//! # Event loop
//!
//! ```text
//! start:   for each node → MobilityPattern::start(now) → arm driver (now + interval)
//! loop:    pop earliest (time, seq) event ≤ stop_time
//!            advance clock to event time
//!            PeriodicUpdateDriver::fire → handle_location_update → re-arm
//!            observer.on_position_update
//! end:     clock = stop_time, observer.on_sim_end
//! ```
//!
//! Events at the same instant fire in the order they were scheduled, so a
//! run is fully determined by its configuration and seed.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use uw_core::{BoundaryBox, SimConfig, Vec3};
//! use uw_mobility::ConstantVelocity;
//! use uw_sim::{NoopObserver, SimBuilder};
//! use uw_spatial::XSortedIndex;
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), BoundaryBox::cube(1000.0)?, XSortedIndex::new())
//!     .node(Vec3::new(100.0, 100.0, 50.0), Vec3::new(0.5, 0.0, 0.0), Box::new(ConstantVelocity))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
