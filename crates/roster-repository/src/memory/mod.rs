//! Process-local entity store.
//!
//! Backs both repository traits with one set of tables behind a single
//! `parking_lot::RwLock`, so every write is atomic with respect to readers.
//! It enforces the same rules as the MySQL schema: unique emails, cascading
//! link deletion, links only to existing rows, and version-checked updates.

use crate::traits::{RoleRepository, UserRepository};
use async_trait::async_trait;
use parking_lot::RwLock;
use roster_core::{Role, RoleDiff, RoleId, RosterError, RosterResult, User, UserId, UserRole};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct UserRecord {
    name: String,
    age: i32,
    email: String,
    version: i64,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, UserRecord>,
    roles: BTreeMap<RoleId, String>,
    links: BTreeSet<UserRole>,
    next_user_id: i64,
    next_role_id: i64,
}

impl Tables {
    fn load_user(&self, id: UserId) -> Option<User> {
        let record = self.users.get(&id)?;
        let roles = self
            .links
            .range(UserRole::new(id, RoleId(i64::MIN))..=UserRole::new(id, RoleId(i64::MAX)))
            .filter_map(|link| {
                self.roles.get(&link.role_id).map(|name| Role {
                    id: link.role_id,
                    name: name.clone(),
                })
            })
            .collect();

        Some(User {
            id,
            name: record.name.clone(),
            age: record.age,
            email: record.email.clone(),
            roles,
            version: record.version,
        })
    }

    fn require_role(&self, id: RoleId) -> RosterResult<()> {
        if self.roles.contains_key(&id) {
            Ok(())
        } else {
            Err(RosterError::not_found("Role", id))
        }
    }
}

/// In-memory implementation of [`UserRepository`] and [`RoleRepository`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Finding user by id: {}", id);
        Ok(self.tables.read().load_user(id))
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        let tables = self.tables.read();
        Ok(tables
            .users
            .keys()
            .filter_map(|id| tables.load_user(*id))
            .collect())
    }

    async fn exists(&self, id: UserId) -> RosterResult<bool> {
        Ok(self.tables.read().users.contains_key(&id))
    }

    async fn exists_by_email(&self, email: &str) -> RosterResult<bool> {
        Ok(self.tables.read().users.values().any(|u| u.email == email))
    }

    async fn save(&self, user: &User) -> RosterResult<User> {
        debug!("Saving user: {}", user.email);
        let mut tables = self.tables.write();

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RosterError::conflict(format!(
                "Email {} is already in use",
                user.email
            )));
        }
        let role_ids = user.role_ids();
        for role_id in &role_ids {
            tables.require_role(*role_id)?;
        }

        tables.next_user_id += 1;
        let id = UserId(tables.next_user_id);
        tables.users.insert(
            id,
            UserRecord {
                name: user.name.clone(),
                age: user.age,
                email: user.email.clone(),
                version: 1,
            },
        );
        tables
            .links
            .extend(role_ids.into_iter().map(|role_id| UserRole::new(id, role_id)));

        tables
            .load_user(id)
            .ok_or_else(|| RosterError::internal("Inserted user vanished"))
    }

    async fn update(&self, user: &User, diff: &RoleDiff) -> RosterResult<User> {
        debug!("Updating user {} at version {}", user.id, user.version);
        let mut tables = self.tables.write();

        match tables.users.get(&user.id) {
            Some(record) if record.version == user.version => {}
            _ => {
                warn!("Stale write for user {} at version {}", user.id, user.version);
                return Err(RosterError::conflict(format!(
                    "User {} was modified concurrently",
                    user.id
                )));
            }
        }
        if tables
            .users
            .iter()
            .any(|(id, u)| *id != user.id && u.email == user.email)
        {
            return Err(RosterError::conflict(format!(
                "Email {} is already in use",
                user.email
            )));
        }
        for role_id in &diff.to_add {
            tables.require_role(*role_id)?;
        }

        if let Some(record) = tables.users.get_mut(&user.id) {
            record.name.clone_from(&user.name);
            record.age = user.age;
            record.email.clone_from(&user.email);
            record.version += 1;
        }
        for role_id in &diff.to_remove {
            tables.links.remove(&UserRole::new(user.id, *role_id));
        }
        for role_id in &diff.to_add {
            tables.links.insert(UserRole::new(user.id, *role_id));
        }

        tables
            .load_user(user.id)
            .ok_or_else(|| RosterError::not_found("User", user.id))
    }

    async fn delete(&self, id: UserId) -> RosterResult<bool> {
        debug!("Deleting user: {}", id);
        let mut tables = self.tables.write();
        let removed = tables.users.remove(&id).is_some();
        tables.links.retain(|link| link.user_id != id);
        Ok(removed)
    }

    async fn count(&self) -> RosterResult<u64> {
        Ok(self.tables.read().users.len() as u64)
    }
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn find_by_id(&self, id: RoleId) -> RosterResult<Option<Role>> {
        debug!("Finding role by id: {}", id);
        Ok(self.tables.read().roles.get(&id).map(|name| Role {
            id,
            name: name.clone(),
        }))
    }

    async fn find_all(&self) -> RosterResult<Vec<Role>> {
        Ok(self
            .tables
            .read()
            .roles
            .iter()
            .map(|(id, name)| Role {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn exists(&self, id: RoleId) -> RosterResult<bool> {
        Ok(self.tables.read().roles.contains_key(&id))
    }

    async fn save(&self, role: &Role) -> RosterResult<Role> {
        debug!("Saving role: {}", role.name);
        let mut tables = self.tables.write();
        tables.next_role_id += 1;
        let id = RoleId(tables.next_role_id);
        tables.roles.insert(id, role.name.clone());
        Ok(role.clone().with_id(id))
    }

    async fn update(&self, role: &Role) -> RosterResult<Role> {
        debug!("Updating role: {}", role.id);
        let mut tables = self.tables.write();
        match tables.roles.get_mut(&role.id) {
            Some(name) => {
                name.clone_from(&role.name);
                Ok(role.clone())
            }
            None => Err(RosterError::not_found("Role", role.id)),
        }
    }

    async fn delete(&self, id: RoleId) -> RosterResult<bool> {
        debug!("Deleting role: {}", id);
        let mut tables = self.tables.write();
        let removed = tables.roles.remove(&id).is_some();
        tables.links.retain(|link| link.role_id != id);
        Ok(removed)
    }
}
