use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Cliente not found: {id}")]
    NotFound { id: i32 },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("Database error: {message}")]
    Database { message: String },
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl DomainError {
    pub fn not_found(id: i32) -> Self {
        Self::NotFound { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Full error chain of a repository failure, for logs.
    pub fn from_repo(e: anyhow::Error) -> Self {
        Self::database(format!("{e:#}"))
    }
}
