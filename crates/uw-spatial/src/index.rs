//! The `SpatialIndex` trait — the collaborator the mobility engine notifies.

use uw_core::{EntityId, Vec3};

use crate::SpatialResult;

/// Pluggable spatial index over entity positions.
///
/// The mobility engine calls [`notify_position_changed`](Self::notify_position_changed)
/// after a tick whenever an entity's x-coordinate changed.  Indexes keyed on x
/// use `previous_x` to locate the stale entry; other indexes may ignore it.
///
/// An entity that moves only along y or z produces no notification, so
/// indexes that key on more than x must tolerate y/z staleness until the next
/// x change.
pub trait SpatialIndex {
    /// Register `entity` at `position`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::DuplicateEntity`][crate::SpatialError::DuplicateEntity]
    /// if the entity is already indexed.
    fn insert(&mut self, entity: EntityId, position: Vec3) -> SpatialResult<()>;

    /// Drop `entity` from the index.
    fn remove(&mut self, entity: EntityId) -> SpatialResult<()>;

    /// Re-bucket `entity`, which was at x = `previous_x` and is now at
    /// `position`.  An unknown entity is inserted.
    fn notify_position_changed(&mut self, entity: EntityId, previous_x: f64, position: Vec3);

    /// Number of indexed entities.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`SpatialIndex`] that tracks nothing.  Useful when no channel model
/// needs neighbour queries.
#[derive(Debug, Default)]
pub struct NoopIndex;

impl SpatialIndex for NoopIndex {
    fn insert(&mut self, _entity: EntityId, _position: Vec3) -> SpatialResult<()> {
        Ok(())
    }

    fn remove(&mut self, _entity: EntityId) -> SpatialResult<()> {
        Ok(())
    }

    fn notify_position_changed(&mut self, _entity: EntityId, _previous_x: f64, _position: Vec3) {}

    fn len(&self) -> usize {
        0
    }
}

impl<I: SpatialIndex + ?Sized> SpatialIndex for &mut I {
    fn insert(&mut self, entity: EntityId, position: Vec3) -> SpatialResult<()> {
        (**self).insert(entity, position)
    }

    fn remove(&mut self, entity: EntityId) -> SpatialResult<()> {
        (**self).remove(entity)
    }

    fn notify_position_changed(&mut self, entity: EntityId, previous_x: f64, position: Vec3) {
        (**self).notify_position_changed(entity, previous_x, position)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
