//! Node identifiers.
//!
//! An `EntityId` doubles as the node's slot in every per-node `Vec` the
//! simulator keeps (nodes, patterns, drivers), so ids are dense and start at 0.

use std::fmt;

/// Index of a mobile entity (an underwater node) in the simulation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Sentinel for "no node".
    pub const INVALID: EntityId = EntityId(u32::MAX);

    /// Slot in per-node storage.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for EntityId {
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl TryFrom<usize> for EntityId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        u32::try_from(n).map(EntityId)
    }
}
