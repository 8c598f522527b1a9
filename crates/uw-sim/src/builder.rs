//! Fluent builder for constructing a [`Sim`].

use uw_core::{BoundaryBox, EntityId, SimConfig, Vec3};
use uw_mobility::{
    ConstantVelocity, MobilityConfig, MobilityPattern, MovementStrategy, NodeKinematics, PeriodicUpdateDriver,
};
use uw_schedule::EventQueue;
use uw_spatial::SpatialIndex;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<I>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — stop time and global seed
/// - [`BoundaryBox`] — the deployment volume every node is reflected into
/// - `I: SpatialIndex` — notified whenever a node's x-coordinate changes
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                        |
/// |--------------------|--------------------------------|
/// | `.mobility(c)`     | `MobilityConfig::default()`    |
/// | `.node(..)`        | no nodes                       |
///
/// Nodes get sequential ids in the order they are added, starting at
/// `EntityId(0)`.
pub struct SimBuilder<I: SpatialIndex> {
    config:   SimConfig,
    mobility: MobilityConfig,
    bounds:   BoundaryBox,
    index:    I,
    nodes:    Vec<(Vec3, Vec3, Box<dyn MovementStrategy>)>,
}

impl<I: SpatialIndex> SimBuilder<I> {
    pub fn new(config: SimConfig, bounds: BoundaryBox, index: I) -> Self {
        Self {
            config,
            mobility: MobilityConfig::default(),
            bounds,
            index,
            nodes: Vec::new(),
        }
    }

    /// Override the update interval and cache depth shared by every node.
    pub fn mobility(mut self, mobility: MobilityConfig) -> Self {
        self.mobility = mobility;
        self
    }

    /// Add a node at `position` with initial `velocity`, moved by `strategy`.
    pub fn node(mut self, position: Vec3, velocity: Vec3, strategy: Box<dyn MovementStrategy>) -> Self {
        self.nodes.push((position, velocity, strategy));
        self
    }

    /// Add a node that never moves.
    pub fn anchored(self, position: Vec3) -> Self {
        self.node(position, Vec3::ZERO, Box::new(ConstantVelocity))
    }

    /// Id the next `.node(..)` call will receive.
    pub fn next_id(&self) -> EntityId {
        EntityId(self.nodes.len() as u32)
    }

    /// Validate inputs, register every node with the index, and return a
    /// ready-to-run [`Sim`].  No pattern is started yet.
    pub fn build(self) -> SimResult<Sim<I>> {
        self.mobility
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let mut index = self.index;
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut patterns = Vec::with_capacity(self.nodes.len());
        let mut drivers = Vec::with_capacity(self.nodes.len());

        for (i, (position, velocity, strategy)) in self.nodes.into_iter().enumerate() {
            let id = EntityId::try_from(i).map_err(|_| SimError::Config(format!("too many nodes ({i})")))?;
            if !self.bounds.contains(position) {
                return Err(SimError::Config(format!(
                    "{id} starts at {position}, outside {}",
                    self.bounds
                )));
            }
            if !velocity.is_finite() {
                return Err(SimError::Config(format!("{id} has non-finite velocity {velocity}")));
            }

            index.insert(id, position)?;
            let pattern = MobilityPattern::new(id, self.mobility, strategy)?;
            drivers.push(PeriodicUpdateDriver::for_pattern(&pattern));
            patterns.push(pattern);
            nodes.push(NodeKinematics::new(id, position, velocity));
        }

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            bounds:   self.bounds,
            nodes,
            patterns,
            drivers,
            index,
            queue:    EventQueue::new(),
            started:  false,
        })
    }
}
