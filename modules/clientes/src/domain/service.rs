use std::sync::Arc;

use crate::contract::model::{Cliente, NewCliente};
use crate::domain::error::DomainError;
use crate::domain::repo::{ClientesRepository, EmailConflict};
use crate::domain::validation::{self, ValidationError};
use tracing::{debug, info, instrument, warn};

/// Domain service with business rules for customer records.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ClientesRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn ClientesRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "clientes.service.list_clientes", skip(self))]
    pub async fn list_clientes(&self) -> Result<Vec<Cliente>, DomainError> {
        let clientes = self.repo.list_all().await.map_err(DomainError::from_repo)?;
        debug!("Listed {} clientes", clientes.len());
        Ok(clientes)
    }

    #[instrument(name = "clientes.service.get_cliente", skip(self), fields(cliente_id = id))]
    pub async fn get_cliente(&self, id: i32) -> Result<Cliente, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(DomainError::from_repo)?
            .ok_or_else(|| DomainError::not_found(id))
    }

    /// Every violated rule, in display order: name, email, phone.
    /// Uniqueness is only looked up for a well-formed email.
    #[instrument(name = "clientes.service.validate", skip_all)]
    pub async fn validate(&self, new: &NewCliente) -> Result<Vec<ValidationError>, DomainError> {
        let mut errors = Vec::new();

        validation::check_nome(&new.nome, &mut errors);

        let email = new.email.as_deref().unwrap_or_default().trim();
        if validation::check_email_syntax(email, &mut errors)
            && self
                .repo
                .email_exists(email)
                .await
                .map_err(DomainError::from_repo)?
        {
            errors.push(ValidationError::EmailTaken);
        }

        validation::check_telefone(new.telefone.as_deref().unwrap_or_default(), &mut errors);

        if !errors.is_empty() {
            debug!(count = errors.len(), "Validation rejected input");
        }
        Ok(errors)
    }

    #[instrument(
        name = "clientes.service.create_cliente",
        skip(self, new),
        fields(nome = %new.nome.trim())
    )]
    pub async fn create_cliente(&self, new: NewCliente) -> Result<Cliente, DomainError> {
        info!("Creating new cliente");

        let new = new.normalized();
        let errors = self.validate(&new).await?;
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        // the lookup in `validate` can race another insert; the store has the final word
        let cliente = match self.repo.insert(new).await {
            Ok(cliente) => cliente,
            Err(e) if e.is::<EmailConflict>() => {
                warn!("Email registered concurrently");
                return Err(DomainError::Validation(vec![ValidationError::EmailTaken]));
            }
            Err(e) => return Err(DomainError::from_repo(e)),
        };

        info!("Successfully created cliente with id={}", cliente.id);
        Ok(cliente)
    }

    #[instrument(name = "clientes.service.delete_cliente", skip(self), fields(cliente_id = id))]
    pub async fn delete_cliente(&self, id: i32) -> Result<(), DomainError> {
        info!("Deleting cliente");

        let deleted = self.repo.delete(id).await.map_err(DomainError::from_repo)?;
        if !deleted {
            return Err(DomainError::not_found(id));
        }

        info!("Successfully deleted cliente");
        Ok(())
    }
}
