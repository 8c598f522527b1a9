//! reef — small scenario for the rust_uwsim mobility framework.
//!
//! Runs five nodes (a moored sink, a drifter, a waypoint glider, a random-walk
//! AUV and a trace replay) inside a 1 km reef box and prints where each one
//! ended up, how far it travelled, and who its x-neighbours are.
//!
//! ```text
//! cargo run -p reef                   # embedded reef.toml
//! cargo run -p reef -- scenario.toml  # your own scenario
//! RUST_LOG=uw_mobility=debug cargo run -p reef
//! ```

mod config;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use uw_core::{EntityId, SimDuration, SimTime, Vec3};
use uw_mobility::{LocationSample, NodeKinematics};
use uw_sim::SimObserver;

use config::ReefConfig;

const DEFAULT_SCENARIO: &str = include_str!("../reef.toml");

/// Neighbour search half-width along x, metres.
const X_WINDOW: f64 = 250.0;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Per-node odometer fed by every position update.
#[derive(Default)]
struct Odometer {
    last:      Vec<Vec3>,
    travelled: Vec<f64>,
    updates:   u64,
}

impl SimObserver for Odometer {
    fn on_start(&mut self, _now: SimTime, nodes: &[NodeKinematics]) {
        self.last = nodes.iter().map(|n| n.position).collect();
        self.travelled = vec![0.0; nodes.len()];
    }

    fn on_position_update(&mut self, _now: SimTime, entity: EntityId, sample: &LocationSample) {
        let i = entity.index();
        self.travelled[i] += self.last[i].distance(sample.position);
        self.last[i] = sample.position;
        self.updates += 1;
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => ReefConfig::from_file(Path::new(&path))?,
        None => ReefConfig::from_toml(DEFAULT_SCENARIO)?,
    };
    let mut sim = scenario.build_sim()?;
    let start_positions: Vec<Vec3> = sim.nodes.iter().map(|n| n.position).collect();

    let mut odometer = Odometer::default();
    let wall = Instant::now();
    sim.run(&mut odometer)?;
    info!(
        updates = odometer.updates,
        elapsed_ms = wall.elapsed().as_millis() as u64,
        "run complete"
    );

    // ── Summary ───────────────────────────────────────────────────────────
    let now = sim.now();
    let one_second_ago = SimTime(now.0.saturating_sub(SimDuration::from_secs(1).0));
    println!("\n{:<12} {:>28} {:>28} {:>10}  neighbours (|dx| ≤ {X_WINDOW} m)", "node", "start", "end", "travelled");
    for i in 0..sim.nodes.len() {
        let node = &sim.nodes[i];
        let neighbours: Vec<String> = sim
            .index
            .x_window(node.position.x - X_WINDOW, node.position.x + X_WINDOW)
            .iter()
            .filter(|&&(_, id)| id != node.id)
            .map(|&(_, id)| id.to_string())
            .collect();
        println!(
            "{:<12} {:>28} {:>28} {:>9.2}m  {}",
            node.id.to_string(),
            start_positions[i].to_string(),
            node.position.to_string(),
            odometer.travelled[i],
            neighbours.join(", ")
        );
    }

    // Trajectory look-back through the cache.
    let id = EntityId(1);
    match sim.location_at(id, one_second_ago) {
        Ok(sample) => println!("\n{id} one second before the end: {} at {:.3} m/s", sample.position, sample.speed()),
        Err(e) => println!("\n{id} history unavailable: {e}"),
    }
    Ok(())
}
