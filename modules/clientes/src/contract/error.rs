use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientesError {
    #[error("Cliente not found: {id}")]
    NotFound { id: i32 },

    #[error("Validation failed: {}", .messages.join(" "))]
    Validation { messages: Vec<String> },

    #[error("Internal error")]
    Internal,
}

impl From<crate::domain::error::DomainError> for ClientesError {
    fn from(e: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError;
        match e {
            DomainError::NotFound { id } => Self::NotFound { id },
            DomainError::Validation(errors) => Self::Validation {
                messages: errors.iter().map(ToString::to_string).collect(),
            },
            DomainError::Database { .. } => Self::Internal,
        }
    }
}
