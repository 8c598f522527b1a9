use thiserror::Error;
use uw_core::EntityId;
use uw_mobility::MobilityError;
use uw_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("no node with id {0}")]
    UnknownEntity(EntityId),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("spatial index error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
