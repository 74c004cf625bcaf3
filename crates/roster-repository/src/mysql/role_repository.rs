//! MySQL role repository implementation.

use crate::{traits::RoleRepository, DatabasePoolInterface};
use async_trait::async_trait;
use roster_core::{Role, RoleId, RosterError, RosterResult};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL role repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = RoleRepository)]
pub struct MySqlRoleRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlRoleRepository {
    /// Creates a new MySQL role repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: i64,
    name: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: RoleId(row.id),
            name: row.name,
        }
    }
}

#[async_trait]
impl RoleRepository for MySqlRoleRepository {
    async fn find_by_id(&self, id: RoleId) -> RosterResult<Option<Role>> {
        debug!("Finding role by id: {}", id);

        let row = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles WHERE id = ?")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Role::from))
    }

    async fn find_all(&self) -> RosterResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn exists(&self, id: RoleId) -> RosterResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles WHERE id = ?")
            .bind(id.into_inner())
            .fetch_one(self.pool.inner())
            .await?;
        Ok(count > 0)
    }

    async fn save(&self, role: &Role) -> RosterResult<Role> {
        debug!("Saving role: {}", role.name);

        let result = sqlx::query("INSERT INTO roles (name) VALUES (?)")
            .bind(&role.name)
            .execute(self.pool.inner())
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| RosterError::internal("Generated role id out of range"))?;

        Ok(role.clone().with_id(RoleId(id)))
    }

    async fn update(&self, role: &Role) -> RosterResult<Role> {
        debug!("Updating role: {}", role.id);

        let result = sqlx::query("UPDATE roles SET name = ? WHERE id = ?")
            .bind(&role.name)
            .bind(role.id.into_inner())
            .execute(self.pool.inner())
            .await?;

        // MySQL reports zero affected rows when the name is unchanged.
        if result.rows_affected() == 0 && !self.exists(role.id).await? {
            return Err(RosterError::not_found("Role", role.id));
        }

        Ok(role.clone())
    }

    async fn delete(&self, id: RoleId) -> RosterResult<bool> {
        debug!("Deleting role: {}", id);

        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
