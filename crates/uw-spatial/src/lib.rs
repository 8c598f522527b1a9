//! `uw-spatial` — spatial indexes over mobile entities.
//!
//! The mobility engine does not own any spatial structure.  After each
//! position update it tells the index that an entity moved, and the index
//! re-buckets it.  Channel models then ask the index "who is near here?".
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`index`]   | `SpatialIndex` trait, `NoopIndex`                              |
//! | [`sorted`]  | `XSortedIndex` — entities ordered by x for window queries      |
//! | [`rtree`]   | `RTreeIndex` — 3-D R-tree (via `rstar`) for radius queries     |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                       |
//! |-----------|--------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for entity → position maps.        |

pub mod error;
pub mod index;
pub mod rtree;
pub mod sorted;


pub use error::{SpatialError, SpatialResult};
pub use index::{NoopIndex, SpatialIndex};
pub use rtree::RTreeIndex;
pub use sorted::XSortedIndex;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type EntityMap<V> = std::collections::HashMap<uw_core::EntityId, V>;

#[cfg(feature = "fx-hash")]
pub(crate) type EntityMap<V> = rustc_hash::FxHashMap<uw_core::EntityId, V>;
