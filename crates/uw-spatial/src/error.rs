//! Spatial-subsystem error type.

use thiserror::Error;

use uw_core::EntityId;

/// Errors produced by `uw-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("entity {0} is not in the index")]
    EntityNotFound(EntityId),

    #[error("entity {0} is already in the index")]
    DuplicateEntity(EntityId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
