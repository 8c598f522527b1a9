//! `uw-core` — foundational types for the `rust_uwsim` mobility framework.
//!
//! This crate is a dependency of every other `uw-*` crate.  It intentionally
//! has no `uw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`ids`]    | `EntityId`                                            |
//! | [`geo`]    | `Vec3`, `BoundaryBox`                                 |
//! | [`time`]   | `SimTime`, `SimDuration`, `SimClock`, `SimConfig`     |
//! | [`rng`]    | `EntityRng` (per-entity deterministic RNG)            |
//! | [`error`]  | `UwError`, `UwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{UwError, UwResult};
pub use geo::{Axis, BoundaryBox, Vec3};
pub use ids::EntityId;
pub use rng::EntityRng;
pub use time::{SimClock, SimConfig, SimDuration, SimTime};
