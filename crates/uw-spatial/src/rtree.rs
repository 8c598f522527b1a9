//! `RTreeIndex` — a 3-D R-tree over entity positions (via `rstar`).

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use uw_core::{EntityId, Vec3};

use crate::{EntityMap, SpatialError, SpatialIndex, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 3-D `[x, y, z]` point with its entity.
#[derive(Clone, Debug, PartialEq)]
struct EntityEntry {
    point: [f64; 3],
    id:    EntityId,
}

impl RTreeObject for EntityEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for EntityEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// Entities in an R-tree, answering radius and k-nearest queries in
/// O(log N + k).
///
/// A move is a remove + insert.  The stored point, not `previous_x`, is used
/// to find the stale entry, so this index is exact even when only y or z
/// changed between notifications.
#[derive(Default)]
pub struct RTreeIndex {
    tree:   RTree<EntityEntry>,
    points: EntityMap<[f64; 3]>,
}

impl RTreeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load from `(entity, position)` pairs — O(N log N), faster than N
    /// inserts.  Later duplicates of the same entity replace earlier ones.
    pub fn bulk_load(entries: impl IntoIterator<Item = (EntityId, Vec3)>) -> Self {
        let mut points = EntityMap::default();
        for (id, pos) in entries {
            points.insert(id, pos.to_array());
        }
        let tree = RTree::bulk_load(
            points
                .iter()
                .map(|(&id, &point)| EntityEntry { point, id })
                .collect(),
        );
        Self { tree, points }
    }

    /// Entities within Euclidean distance `radius` of `center`.
    pub fn within_radius(&self, center: Vec3, radius: f64) -> Vec<EntityId> {
        self.tree
            .locate_within_distance(center.to_array(), radius * radius)
            .map(|e| e.id)
            .collect()
    }

    /// Up to `k` entities nearest to `center`, sorted by ascending distance.
    pub fn k_nearest(&self, center: Vec3, k: usize) -> Vec<EntityId> {
        self.tree
            .nearest_neighbor_iter(&center.to_array())
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    /// Last known position of `entity`.
    pub fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.points.get(&entity).map(|&p| Vec3::from(p))
    }
}

impl SpatialIndex for RTreeIndex {
    fn insert(&mut self, entity: EntityId, position: Vec3) -> SpatialResult<()> {
        if self.points.contains_key(&entity) {
            return Err(SpatialError::DuplicateEntity(entity));
        }
        let point = position.to_array();
        self.points.insert(entity, point);
        self.tree.insert(EntityEntry { point, id: entity });
        Ok(())
    }

    fn remove(&mut self, entity: EntityId) -> SpatialResult<()> {
        let point = self
            .points
            .remove(&entity)
            .ok_or(SpatialError::EntityNotFound(entity))?;
        self.tree.remove(&EntityEntry { point, id: entity });
        Ok(())
    }

    fn notify_position_changed(&mut self, entity: EntityId, _previous_x: f64, position: Vec3) {
        let point = position.to_array();
        if let Some(old) = self.points.insert(entity, point) {
            self.tree.remove(&EntityEntry { point: old, id: entity });
        }
        self.tree.insert(EntityEntry { point, id: entity });
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
