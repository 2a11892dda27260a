use crate::temporality::InvalidRangeError;
use crate::types::ResourceId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound {
        entity: &'static str,
        id: ResourceId,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A malformed date range reached the classifier. Always a caller bug.
    #[error(transparent)]
    InvalidRange(#[from] InvalidRangeError),

    #[error("Internal error: {0}")]
    Internal(String),
}
