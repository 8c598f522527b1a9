//! `uw-mobility` — time-indexed trajectories for underwater nodes.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`sample`]      | `LocationSample` — position + velocity at one instant           |
//! | [`cache`]       | `TrajectoryCache` — fixed-capacity ring indexed by time         |
//! | [`bounds`]      | `reflect`, `restrict_to_bounds` — bounce off box faces          |
//! | [`entity`]      | `MobileEntity` trait, `NodeKinematics`                          |
//! | [`strategy`]    | `MovementStrategy` trait, `Unconfigured`, `ConstantVelocity`    |
//! | [`random_walk`] | `RandomWalk`                                                    |
//! | [`waypoint`]    | `WaypointPath`                                                  |
//! | [`trace`]       | `TraceReplay`, `load_trace_csv`, `load_trace_reader`            |
//! | [`pattern`]     | `MobilityPattern<S>` — lazy generation, write-back, time queries|
//! | [`driver`]      | `PeriodicUpdateDriver` — self-rescheduling tick                 |
//! | [`config`]      | `MobilityConfig`                                                |
//! | [`error`]       | `MobilityError`, `MobilityResult<T>`                            |
//!
//! # Movement model
//!
//! A pattern keeps the last `cache_duration` of its node's trajectory as
//! samples spaced exactly `update_interval` apart:
//!
//! 1. `MobilityPattern::start` seeds the cache with the node's current
//!    position and velocity and runs the first tick.
//! 2. Each tick (driven by `PeriodicUpdateDriver`) asks the strategy for new
//!    samples until the cache reaches `now`, reflects each one back inside the
//!    deployment box, and writes the sample for `now` onto the node.
//! 3. `MobilityPattern::location_at` answers past and near-future queries from
//!    the same cache, generating ahead when a query lands beyond the newest
//!    sample.  Evicted or unreachable times fail with
//!    [`MobilityError::OutOfRange`].

pub mod bounds;
pub mod cache;
pub mod config;
pub mod driver;
pub mod entity;
pub mod error;
pub mod pattern;
pub mod random_walk;
pub mod sample;
pub mod strategy;
pub mod trace;
pub mod waypoint;


pub use bounds::{reflect, restrict_to_bounds};
pub use cache::{TrajectoryCache, MAX_CACHE_SLOTS};
pub use config::MobilityConfig;
pub use driver::PeriodicUpdateDriver;
pub use entity::{MobileEntity, NodeKinematics};
pub use error::{MobilityError, MobilityResult};
pub use pattern::{MobilityPattern, PatternState};
pub use random_walk::RandomWalk;
pub use sample::LocationSample;
pub use strategy::{ConstantVelocity, GenerationContext, MovementStrategy, Unconfigured};
pub use trace::{load_trace_csv, load_trace_reader, TraceReplay};
pub use waypoint::WaypointPath;
