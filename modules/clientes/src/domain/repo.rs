use crate::contract::model::{Cliente, NewCliente};
use async_trait::async_trait;
use thiserror::Error;

/// Returned inside the `anyhow::Error` of [`ClientesRepository::insert`] when
/// the store already holds a record under the same email key.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("email already registered")]
pub struct EmailConflict;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait ClientesRepository: Send + Sync {
    /// All records, newest (highest id) first.
    async fn list_all(&self) -> anyhow::Result<Vec<Cliente>>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Cliente>>;
    /// Lookup by [`crate::domain::validation::email_key`].
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    /// Persist an already validated record; the store assigns the id.
    /// Fails with [`EmailConflict`] if the email key is taken.
    async fn insert(&self, new: NewCliente) -> anyhow::Result<Cliente>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}
