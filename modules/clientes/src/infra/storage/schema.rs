use anyhow::Context;
use sea_orm::{ConnectionTrait, Schema};
use tracing::info;

use crate::infra::storage::entity::Entity;

/// Create the `cliente` table if it does not exist yet.
///
/// The primary key is `AUTOINCREMENT` on SQLite and `serial` on PostgreSQL,
/// so ids of deleted rows are never handed out again. `email_normalizado`
/// carries a UNIQUE constraint; NULLs (no email) never collide.
pub async fn ensure_schema<C>(conn: &C) -> anyhow::Result<()>
where
    C: ConnectionTrait,
{
    let backend = conn.get_database_backend();
    let mut table = Schema::new(backend).create_table_from_entity(Entity);
    table.if_not_exists();

    conn.execute(backend.build(&table))
        .await
        .context("failed to create table 'cliente'")?;

    info!(backend = ?backend, "Schema ready");
    Ok(())
}
