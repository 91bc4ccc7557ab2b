use crate::contract::model::{Cliente, NewCliente};
use crate::domain::validation::email_key;
use crate::infra::storage::entity::{ActiveModel, Model};
use sea_orm::{NotSet, Set};

/// Convert a database entity to a contract model
pub fn entity_to_contract(entity: Model) -> Cliente {
    Cliente {
        id: entity.id,
        nome: entity.nome,
        email: entity.email,
        telefone: entity.telefone,
    }
}

/// Insert model; the id is left to the store.
pub fn new_to_active(new: NewCliente) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        email_normalizado: Set(new.email.as_deref().map(email_key)),
        nome: Set(new.nome),
        email: Set(new.email),
        telefone: Set(new.telefone),
    }
}

impl From<Model> for Cliente {
    fn from(entity: Model) -> Self {
        entity_to_contract(entity)
    }
}
