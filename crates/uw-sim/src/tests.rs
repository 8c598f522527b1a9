//! Integration tests for uw-sim.

use uw_core::{BoundaryBox, EntityId, SimConfig, SimDuration, SimTime, Vec3};
use uw_mobility::{ConstantVelocity, LocationSample, MobilityConfig, NodeKinematics, PatternState};
use uw_spatial::{SpatialIndex, XSortedIndex};

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ms(n: u64) -> SimTime {
    SimTime::ZERO + SimDuration::from_millis(n)
}

fn config(stop_ms: u64) -> SimConfig {
    SimConfig { stop_time: ms(stop_ms), seed: 42 }
}

/// 1 ms ticks, 3 ms of history (capacity 4).
fn short_cache() -> MobilityConfig {
    MobilityConfig {
        update_interval: SimDuration::from_millis(1),
        cache_duration:  SimDuration::from_millis(3),
    }
}

fn sea() -> BoundaryBox {
    BoundaryBox::cube(1000.0).unwrap()
}

/// Two nodes drifting +x at 1 m/s and 2 m/s.
fn two_drifters(stop_ms: u64) -> Sim<XSortedIndex> {
    SimBuilder::new(config(stop_ms), sea(), XSortedIndex::new())
        .mobility(short_cache())
        .node(Vec3::new(100.0, 100.0, 50.0), Vec3::new(1.0, 0.0, 0.0), Box::new(ConstantVelocity))
        .node(Vec3::new(200.0, 100.0, 50.0), Vec3::new(2.0, 0.0, 0.0), Box::new(ConstantVelocity))
        .build()
        .unwrap()
}

#[derive(Default)]
struct Recorder {
    started: usize,
    updates: Vec<(SimTime, EntityId)>,
    ended:   Option<SimTime>,
}

impl SimObserver for Recorder {
    fn on_start(&mut self, _now: SimTime, nodes: &[NodeKinematics]) {
        self.started = nodes.len();
    }

    fn on_position_update(&mut self, now: SimTime, entity: EntityId, _sample: &LocationSample) {
        self.updates.push((now, entity));
    }

    fn on_sim_end(&mut self, end: SimTime, _nodes: &[NodeKinematics]) {
        self.ended = Some(end);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_and_indexes_nodes() {
        let sim = two_drifters(10);
        assert_eq!(sim.nodes.len(), 2);
        assert_eq!(sim.index.len(), 2);
        assert_eq!(sim.pending_events(), 0);
        assert_eq!(sim.pattern(EntityId(1)).unwrap().state(), PatternState::Inert);
    }

    #[test]
    fn node_outside_bounds_errors() {
        let result = SimBuilder::new(config(10), sea(), XSortedIndex::new())
            .anchored(Vec3::new(2000.0, 0.0, 0.0))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_interval_errors() {
        let bad = MobilityConfig { update_interval: SimDuration::ZERO, ..MobilityConfig::default() };
        let result = SimBuilder::new(config(10), sea(), XSortedIndex::new())
            .mobility(bad)
            .anchored(Vec3::new(1.0, 1.0, 1.0))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn oversized_cache_errors_instead_of_allocating() {
        let huge = MobilityConfig {
            update_interval: SimDuration::from_nanos(1),
            cache_duration:  SimDuration::from_secs(3_600_000),
        };
        let result = SimBuilder::new(config(10), sea(), XSortedIndex::new())
            .mobility(huge)
            .anchored(Vec3::new(1.0, 1.0, 1.0))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn ids_are_sequential() {
        let b = SimBuilder::new(config(10), sea(), XSortedIndex::new());
        assert_eq!(b.next_id(), EntityId(0));
        let b = b.anchored(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(b.next_id(), EntityId(1));
    }
}

// ── Event loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_ticks_every_node_each_interval() {
        let mut sim = two_drifters(10);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.started, 2);
        assert_eq!(rec.updates.len(), 20); // 2 nodes × ticks at 1..=10 ms
        assert_eq!(rec.ended, Some(ms(10)));
        assert_eq!(sim.now(), ms(10));
        assert_eq!(sim.node(EntityId(0)).unwrap().position_update_time, ms(10));
        assert!((sim.nodes[0].position.x - 100.01).abs() < 1e-9);
        assert!((sim.nodes[1].position.x - 200.02).abs() < 1e-9);
        // one armed tick per node stays queued past the stop time
        assert_eq!(sim.pending_events(), 2);
    }

    #[test]
    fn ties_fire_in_node_order() {
        let mut sim = two_drifters(3);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let expected: Vec<_> = (1..=3)
            .flat_map(|t| [(ms(t), EntityId(0)), (ms(t), EntityId(1))])
            .collect();
        assert_eq!(rec.updates, expected);
    }

    #[test]
    fn index_tracks_moving_nodes() {
        let mut sim = SimBuilder::new(config(1000), sea(), XSortedIndex::new())
            .node(Vec3::new(100.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Box::new(ConstantVelocity))
            .anchored(Vec3::new(100.5, 0.0, 0.0))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        // node 0 overtook the anchored node
        let order: Vec<EntityId> = sim.index.ordered().collect();
        assert_eq!(order, vec![EntityId(1), EntityId(0)]);
        assert_eq!(sim.index.position(EntityId(0)), Some(sim.nodes[0].position));
    }

    #[test]
    fn step_dispatches_one_event() {
        let mut sim = two_drifters(2);
        sim.start(&mut NoopObserver).unwrap();
        assert_eq!(sim.step(&mut NoopObserver).unwrap(), Some(ms(1)));
        assert_eq!(sim.nodes[0].position_update_time, ms(1));
        assert_eq!(sim.nodes[1].position_update_time, SimTime::ZERO);
        assert_eq!(sim.step(&mut NoopObserver).unwrap(), Some(ms(1)));
        assert_eq!(sim.step(&mut NoopObserver).unwrap(), Some(ms(2)));
        assert_eq!(sim.step(&mut NoopObserver).unwrap(), Some(ms(2)));
        assert_eq!(sim.step(&mut NoopObserver).unwrap(), None);
    }

    #[test]
    fn location_queries_use_current_clock() {
        let mut sim = two_drifters(10);
        sim.run(&mut NoopObserver).unwrap();

        let past = sim.location_at(EntityId(0), ms(8)).unwrap();
        assert!((past.position.x - 100.008).abs() < 1e-9);
        let ahead = sim.location_at(EntityId(0), ms(12)).unwrap();
        assert!((ahead.position.x - 100.012).abs() < 1e-9);

        let evicted = sim.location_at(EntityId(0), ms(2)).unwrap_err();
        assert!(matches!(evicted, SimError::Mobility(ref e) if e.is_out_of_range()));
        assert!(matches!(sim.location_at(EntityId(9), ms(10)), Err(SimError::UnknownEntity(_))));
    }
}

// ── Teardown / restart ────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn teardown_stops_ticks_and_unindexes() {
        let mut sim = two_drifters(10);
        let mut rec = Recorder::default();
        sim.start(&mut rec).unwrap();
        sim.run_until(ms(5), &mut rec).unwrap();

        sim.teardown(EntityId(0)).unwrap();
        assert_eq!(sim.pending_events(), 1);
        assert_eq!(sim.index.len(), 1);
        assert!(sim.pattern(EntityId(0)).unwrap().cache().is_none());
        let frozen = sim.nodes[0].position;

        sim.run_until(ms(10), &mut rec).unwrap();
        assert_eq!(sim.nodes[0].position, frozen);
        assert_eq!(sim.nodes[0].position_update_time, ms(5));
        assert!(rec.updates.iter().all(|&(t, e)| e != EntityId(0) || t <= ms(5)));
        assert!(sim.location_at(EntityId(0), ms(10)).is_err());

        // second teardown is harmless
        sim.teardown(EntityId(0)).unwrap();
    }

    #[test]
    fn restart_resumes_from_frozen_position() {
        let mut sim = two_drifters(20);
        sim.start(&mut NoopObserver).unwrap();
        sim.run_until(ms(5), &mut NoopObserver).unwrap();
        sim.teardown(EntityId(0)).unwrap();
        sim.run_until(ms(10), &mut NoopObserver).unwrap();

        let applied = sim.restart(EntityId(0)).unwrap();
        assert_eq!(applied.position, sim.nodes[0].position);
        assert_eq!(sim.index.len(), 2);
        let cache = sim.pattern(EntityId(0)).unwrap().cache().unwrap();
        assert_eq!(cache.first_update_time(), ms(10));
        assert_eq!(cache.len(), 1);

        sim.run(&mut NoopObserver).unwrap();
        assert!((sim.nodes[0].position.x - 100.015).abs() < 1e-9);
        assert_eq!(sim.nodes[0].position_update_time, ms(20));
    }

    #[test]
    fn restart_of_active_node_keeps_one_pending_tick() {
        let mut sim = two_drifters(20);
        sim.start(&mut NoopObserver).unwrap();
        sim.run_until(ms(3), &mut NoopObserver).unwrap();
        sim.restart(EntityId(1)).unwrap();
        assert_eq!(sim.pending_events(), 2);
        assert_eq!(sim.index.len(), 2);
    }

    #[test]
    fn unknown_entity_errors() {
        let mut sim = two_drifters(10);
        assert!(matches!(sim.teardown(EntityId(5)), Err(SimError::UnknownEntity(_))));
        assert!(matches!(sim.restart(EntityId(5)), Err(SimError::UnknownEntity(_))));
    }
}
