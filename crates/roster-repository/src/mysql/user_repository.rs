//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use roster_core::{Role, RoleDiff, RoleId, RosterError, RosterResult, User, UserId};
use shaku::Component;
use sqlx::{FromRow, MySql, Transaction};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// MySQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct MySqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

/// Inserts one `user_roles` link. A role deleted since the caller checked it
/// trips the foreign key and surfaces as a missing role.
async fn link_role(
    tx: &mut Transaction<'_, MySql>,
    user_id: i64,
    role_id: RoleId,
) -> RosterResult<()> {
    sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(role_id.into_inner())
        .execute(&mut **tx)
        .await
        .map_err(|err| match RosterError::from(err) {
            RosterError::NotFound { .. } => RosterError::not_found("Role", role_id),
            other => other,
        })?;
    Ok(())
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn roles_of(&self, user_id: UserId) -> RosterResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, UserRoleRow>(
            r#"
            SELECT ur.user_id, r.id AS role_id, r.name AS role_name
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            WHERE ur.user_id = ?
            ORDER BY r.id
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Role::from).collect())
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    age: i32,
    email: String,
    version: i64,
}

impl UserRow {
    fn into_user(self, roles: Vec<Role>) -> User {
        User {
            id: UserId(self.id),
            name: self.name,
            age: self.age,
            email: self.email,
            roles,
            version: self.version,
        }
    }
}

/// A role joined through `user_roles`.
#[derive(Debug, FromRow)]
struct UserRoleRow {
    user_id: i64,
    role_id: i64,
    role_name: String,
}

impl From<UserRoleRow> for Role {
    fn from(row: UserRoleRow) -> Self {
        Role {
            id: RoleId(row.role_id),
            name: row.role_name,
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, age, email, version FROM users WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        match row {
            Some(row) => {
                let roles = self.roles_of(id).await?;
                Ok(Some(row.into_user(roles)))
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        debug!("Loading all users with roles");

        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, age, email, version FROM users ORDER BY id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        let links = sqlx::query_as::<_, UserRoleRow>(
            r#"
            SELECT ur.user_id, r.id AS role_id, r.name AS role_name
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            ORDER BY ur.user_id, r.id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        let mut roles_by_user: HashMap<i64, Vec<Role>> = HashMap::new();
        for link in links {
            roles_by_user.entry(link.user_id).or_default().push(Role::from(link));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let roles = roles_by_user.remove(&row.id).unwrap_or_default();
                row.into_user(roles)
            })
            .collect())
    }

    async fn exists(&self, id: UserId) -> RosterResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id.into_inner())
            .fetch_one(self.pool.inner())
            .await?;
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> RosterResult<bool> {
        debug!("Checking email: {}", email);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(self.pool.inner())
            .await?;
        Ok(count > 0)
    }

    async fn save(&self, user: &User) -> RosterResult<User> {
        debug!("Saving user: {}", user.email);

        let mut tx = self.pool.inner().begin().await?;

        let result = sqlx::query("INSERT INTO users (name, age, email, version) VALUES (?, ?, ?, 1)")
            .bind(&user.name)
            .bind(user.age)
            .bind(&user.email)
            .execute(&mut *tx)
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| RosterError::internal("Generated user id out of range"))?;

        for role_id in user.role_ids() {
            link_role(&mut tx, id, role_id).await?;
        }

        tx.commit().await?;

        self.find_by_id(UserId(id))
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))
    }

    async fn update(&self, user: &User, diff: &RoleDiff) -> RosterResult<User> {
        debug!(
            "Updating user {} at version {} (+{} -{} roles)",
            user.id,
            user.version,
            diff.to_add.len(),
            diff.to_remove.len()
        );

        let mut tx = self.pool.inner().begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, age = ?, email = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&user.name)
        .bind(user.age)
        .bind(&user.email)
        .bind(user.id.into_inner())
        .bind(user.version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            warn!("Stale write for user {} at version {}", user.id, user.version);
            tx.rollback().await?;
            return Err(RosterError::conflict(format!(
                "User {} was modified concurrently",
                user.id
            )));
        }

        for role_id in &diff.to_remove {
            sqlx::query("DELETE FROM user_roles WHERE user_id = ? AND role_id = ?")
                .bind(user.id.into_inner())
                .bind(role_id.into_inner())
                .execute(&mut *tx)
                .await?;
        }

        for role_id in &diff.to_add {
            link_role(&mut tx, user.id.into_inner(), *role_id).await?;
        }

        tx.commit().await?;

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", user.id))
    }

    async fn delete(&self, id: UserId) -> RosterResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RosterResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count.unsigned_abs())
    }
}
