//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, SqlErr,
};

use crate::contract::model::{Cliente, NewCliente};
use crate::domain::repo::{ClientesRepository, EmailConflict};
use crate::domain::validation::email_key;
use crate::infra::storage::entity::{Column, Entity as ClienteEntity};
use crate::infra::storage::mapper::new_to_active;

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmClientesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmClientesRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> ClientesRepository for SeaOrmClientesRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list_all(&self) -> anyhow::Result<Vec<Cliente>> {
        let rows = ClienteEntity::find()
            .order_by_desc(Column::Id)
            .all(&self.conn)
            .await
            .context("list_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Cliente>> {
        let found = ClienteEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let count = ClienteEntity::find()
            .filter(Column::EmailNormalizado.eq(email_key(email)))
            .count(&self.conn)
            .await
            .context("email_exists failed")?;
        Ok(count > 0)
    }

    async fn insert(&self, new: NewCliente) -> anyhow::Result<Cliente> {
        match new_to_active(new).insert(&self.conn).await {
            Ok(model) => Ok(model.into()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(EmailConflict.into())
            }
            Err(e) => Err(anyhow::Error::new(e).context("insert failed")),
        }
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = ClienteEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }
}
