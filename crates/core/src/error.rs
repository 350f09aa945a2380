use crate::types::DbId;

/// Failures the registry reports to callers, independent of transport.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Field-level input errors, already flattened into one message.
    #[error("{0}")]
    Validation(String),

    /// No usable session on the request.
    #[error("{0}")]
    Unauthorized(String),
}

impl CoreError {
    pub fn project_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Project",
            id,
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        CoreError::Unauthorized(reason.into())
    }
}
