//! `XSortedIndex` — entities kept in ascending x order.
//!
//! # Layout
//!
//! A single `Vec<(x, EntityId)>` sorted by `(x, id)`, plus a map of full
//! positions.  A move is one binary search to find the stale entry (keyed by
//! `previous_x`), one removal and one sorted insertion.  Underwater nodes
//! drift millimetres per update, so the entry usually lands within a slot or
//! two of where it left and the `Vec` shift is short.
//!
//! Range queries along x (the typical "who could hear this transmission"
//! pre-filter) are two binary searches and a contiguous slice scan.

use std::cmp::Ordering;

use uw_core::{EntityId, Vec3};

use crate::{EntityMap, SpatialError, SpatialIndex, SpatialResult};

/// Entities sorted by x-coordinate.
#[derive(Debug, Default)]
pub struct XSortedIndex {
    order:     Vec<(f64, EntityId)>,
    positions: EntityMap<Vec3>,
}

fn cmp_key(a: &(f64, EntityId), b: &(f64, EntityId)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

impl XSortedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known position of `entity`.
    pub fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.positions.get(&entity).copied()
    }

    /// All entities in ascending x order.
    pub fn ordered(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().map(|&(_, id)| id)
    }

    /// Entities whose x lies in the closed window `[lo, hi]`, in x order.
    pub fn x_window(&self, lo: f64, hi: f64) -> &[(f64, EntityId)] {
        if hi < lo {
            return &[];
        }
        let start = self.order.partition_point(|&(x, _)| x < lo);
        let end   = self.order.partition_point(|&(x, _)| x <= hi);
        &self.order[start..end]
    }

    /// Entities within Euclidean distance `radius` of `center`.
    ///
    /// Uses the x window as a pre-filter, then checks full 3-D distance
    /// against the last notified positions.
    pub fn within_radius(&self, center: Vec3, radius: f64) -> Vec<EntityId> {
        self.x_window(center.x - radius, center.x + radius)
            .iter()
            .filter(|(_, id)| {
                self.positions
                    .get(id)
                    .is_some_and(|p| p.distance(center) <= radius)
            })
            .map(|&(_, id)| id)
            .collect()
    }

    fn insert_sorted(&mut self, entity: EntityId, x: f64) {
        let key = (x, entity);
        let at = self
            .order
            .binary_search_by(|probe| cmp_key(probe, &key))
            .unwrap_or_else(|i| i);
        self.order.insert(at, key);
    }

    /// Remove the order entry for `entity`, trying `x_hint` first.
    fn remove_sorted(&mut self, entity: EntityId, x_hint: f64) -> bool {
        let key = (x_hint, entity);
        if let Ok(i) = self.order.binary_search_by(|probe| cmp_key(probe, &key)) {
            self.order.remove(i);
            return true;
        }
        // The caller's previous x disagreed with ours; fall back to a scan.
        match self.order.iter().position(|&(_, id)| id == entity) {
            Some(i) => {
                self.order.remove(i);
                true
            }
            None => false,
        }
    }
}

impl SpatialIndex for XSortedIndex {
    fn insert(&mut self, entity: EntityId, position: Vec3) -> SpatialResult<()> {
        if self.positions.contains_key(&entity) {
            return Err(SpatialError::DuplicateEntity(entity));
        }
        self.positions.insert(entity, position);
        self.insert_sorted(entity, position.x);
        Ok(())
    }

    fn remove(&mut self, entity: EntityId) -> SpatialResult<()> {
        let pos = self
            .positions
            .remove(&entity)
            .ok_or(SpatialError::EntityNotFound(entity))?;
        self.remove_sorted(entity, pos.x);
        Ok(())
    }

    fn notify_position_changed(&mut self, entity: EntityId, previous_x: f64, position: Vec3) {
        self.remove_sorted(entity, previous_x);
        self.positions.insert(entity, position);
        self.insert_sorted(entity, position.x);
    }

    fn len(&self) -> usize {
        self.positions.len()
    }
}
