//! TOML scenario file → `Sim`.
//!
//! Human-facing values are plain seconds and `[x, y, z]` arrays; conversion
//! to nanosecond time and `Vec3` happens here, once.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use uw_core::{BoundaryBox, SimConfig, SimDuration, SimTime, Vec3};
use uw_mobility::{
    ConstantVelocity, MobilityConfig, MovementStrategy, RandomWalk, WaypointPath, load_trace_csv, load_trace_reader,
};
use uw_sim::{Sim, SimBuilder};
use uw_spatial::XSortedIndex;

/// Eight rows of a slow descent at 0.5 m/s, one per millisecond.
const DESCENT_CSV: &str = "\
x,y,z,dx,dy,dz\n\
300.0,800.0,19.9995,0.0,0.0,-0.5\n\
300.0,800.0,19.9990,0.0,0.0,-0.5\n\
300.0,800.0,19.9985,0.0,0.0,-0.5\n\
300.0,800.0,19.9980,0.0,0.0,-0.5\n\
300.0,800.0,19.9975,0.0,0.0,-0.5\n\
300.0,800.0,19.9970,0.0,0.0,-0.5\n\
300.0,800.0,19.9965,0.0,0.0,-0.5\n\
300.0,800.0,19.9960,0.0,0.0,-0.5\n\
";

// ── File schema ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReefConfig {
    pub sim:      SimSection,
    #[serde(default)]
    pub mobility: MobilitySection,
    pub bounds:   BoundsSection,
    #[serde(default)]
    pub nodes:    Vec<NodeSection>,
}

#[derive(Debug, Deserialize)]
pub struct SimSection {
    pub stop_secs: f64,
    #[serde(default)]
    pub seed:      u64,
}

#[derive(Debug, Deserialize)]
pub struct MobilitySection {
    pub update_interval_secs: f64,
    pub cache_duration_secs:  f64,
}

impl Default for MobilitySection {
    fn default() -> Self {
        Self { update_interval_secs: 0.001, cache_duration_secs: 5.0 }
    }
}

#[derive(Debug, Deserialize)]
pub struct BoundsSection {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

#[derive(Debug, Deserialize)]
pub struct NodeSection {
    pub position: [f64; 3],
    #[serde(default)]
    pub velocity: [f64; 3],
    pub strategy: StrategySection,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StrategySection {
    Anchored,
    ConstantVelocity,
    RandomWalk {
        speed_min: f64,
        speed_max: f64,
        #[serde(default)]
        max_pitch: f64,
        leg_steps: u32,
    },
    Waypoint {
        waypoints: Vec<[f64; 3]>,
        speed:     f64,
        #[serde(default)]
        cyclic:    bool,
    },
    Trace {
        path: Option<PathBuf>,
    },
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl ReefConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ReefConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Validate and assemble a ready-to-run simulation.
    pub fn build_sim(&self) -> Result<Sim<XSortedIndex>> {
        if !(self.sim.stop_secs.is_finite() && self.sim.stop_secs >= 0.0) {
            bail!("sim.stop_secs must be a non-negative number, got {}", self.sim.stop_secs);
        }

        let sim_config = SimConfig {
            stop_time: SimTime::from_secs_f64(self.sim.stop_secs),
            seed:      self.sim.seed,
        };
        let mobility = MobilityConfig {
            update_interval: SimDuration::from_secs_f64(self.mobility.update_interval_secs),
            cache_duration:  SimDuration::from_secs_f64(self.mobility.cache_duration_secs),
        };
        let bounds = BoundaryBox::new(self.bounds.min.into(), self.bounds.max.into())?;

        let mut builder = SimBuilder::new(sim_config, bounds, XSortedIndex::new()).mobility(mobility);
        for (i, node) in self.nodes.iter().enumerate() {
            let strategy = node
                .strategy
                .build(self.sim.seed)
                .with_context(|| format!("node {i}"))?;
            let velocity = match node.strategy {
                StrategySection::Anchored => Vec3::ZERO,
                _ => Vec3::from(node.velocity),
            };
            builder = builder.node(Vec3::from(node.position), velocity, strategy);
        }
        Ok(builder.build()?)
    }
}

impl StrategySection {
    fn build(&self, seed: u64) -> Result<Box<dyn MovementStrategy>> {
        let strategy: Box<dyn MovementStrategy> = match self {
            StrategySection::Anchored | StrategySection::ConstantVelocity => Box::new(ConstantVelocity),
            StrategySection::RandomWalk { speed_min, speed_max, max_pitch, leg_steps } => {
                Box::new(RandomWalk::new(*speed_min, *speed_max, *max_pitch, *leg_steps, seed)?)
            }
            StrategySection::Waypoint { waypoints, speed, cyclic } => Box::new(WaypointPath::new(
                waypoints.iter().copied().map(Vec3::from).collect(),
                *speed,
                *cyclic,
            )?),
            StrategySection::Trace { path: Some(path) } => Box::new(
                load_trace_csv(path).with_context(|| format!("loading trace {}", path.display()))?,
            ),
            StrategySection::Trace { path: None } => Box::new(load_trace_reader(Cursor::new(DESCENT_CSV))?),
        };
        Ok(strategy)
    }
}
