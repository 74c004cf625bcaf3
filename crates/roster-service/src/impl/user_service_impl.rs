//! User service implementation.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{
    reconcile, RoleDiff, RoleId, RosterError, RosterResult, User, UserId, UserQuery, ValidateExt,
};
use roster_repository::{RoleRepository, UserRepository};
use shaku::Component;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User service backed by the user and role repositories.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    role_repository: Arc<dyn RoleRepository>,
}

impl UserServiceComponent {
    /// Creates a new user service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        role_repository: Arc<dyn RoleRepository>,
    ) -> Self {
        Self {
            user_repository,
            role_repository,
        }
    }

    async fn load_user(&self, id: UserId) -> RosterResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))
    }

    /// Fails on the first role id that does not exist.
    async fn require_roles(&self, ids: &BTreeSet<RoleId>) -> RosterResult<()> {
        for id in ids {
            if !self.role_repository.exists(*id).await? {
                return Err(RosterError::not_found("Role", id));
            }
        }
        Ok(())
    }

    /// Persists profile fields and a role diff, mapping a lost race to
    /// `NotFound` when the user is gone and `Conflict` otherwise.
    async fn write(&self, user: &User, diff: &RoleDiff) -> RosterResult<User> {
        match self.user_repository.update(user, diff).await {
            Err(err) if err.is_conflict() => {
                warn!("Concurrent modification of user {}: {}", user.id, err);
                if self.user_repository.exists(user.id).await? {
                    Err(err)
                } else {
                    Err(RosterError::not_found("User", user.id))
                }
            }
            result => result,
        }
    }
}

#[async_trait]
impl UserService for UserServiceComponent {
    async fn list_users(&self, query: UserQuery) -> RosterResult<UserListResponse> {
        debug!(
            page = query.page,
            page_size = query.page_size,
            sort_by = %query.sort_by,
            sort_order = %query.sort_order,
            filter = %query.filter,
            "Listing users"
        );

        let users = self.user_repository.find_all().await?;
        let page = query.apply(users)?;
        Ok(UserListResponse::from(page))
    }

    async fn get_user(&self, id: UserId) -> RosterResult<UserResponse> {
        debug!("Getting user: {}", id);

        let user = self.load_user(id).await?;
        Ok(UserResponse::from(user))
    }

    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;

        if self.user_repository.exists_by_email(&request.email).await? {
            return Err(RosterError::validation(format!(
                "Email '{}' is already in use",
                request.email
            )));
        }

        let role_ids: BTreeSet<RoleId> = request.role_ids.iter().copied().collect();
        let mut roles = Vec::with_capacity(role_ids.len());
        for id in role_ids {
            let role = self
                .role_repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| RosterError::not_found("Role", id))?;
            roles.push(role);
        }

        let user = User::new(request.name, request.age, request.email).with_roles(roles);
        let saved_user = self.user_repository.save(&user).await?;

        info!("User created: {}", saved_user.id);
        Ok(UserResponse::from(saved_user))
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self.load_user(id).await?;
        let diff = reconcile(user.role_ids(), request.role_ids.iter().copied());
        self.require_roles(&diff.to_add).await?;

        user.name = request.name;
        user.age = request.age;
        user.email = request.email;

        let updated_user = self.write(&user, &diff).await?;

        info!(
            added = diff.to_add.len(),
            removed = diff.to_remove.len(),
            "User updated: {}",
            id
        );
        Ok(UserResponse::from(updated_user))
    }

    async fn add_user_role(&self, id: UserId, role_id: RoleId) -> RosterResult<UserResponse> {
        debug!("Adding role {} to user {}", role_id, id);

        let user = self.load_user(id).await?;
        if !self.role_repository.exists(role_id).await? {
            return Err(RosterError::not_found("Role", role_id));
        }
        if user.has_role(role_id) {
            return Err(RosterError::already_assigned(id, role_id));
        }

        let diff = RoleDiff {
            to_add: BTreeSet::from([role_id]),
            to_remove: BTreeSet::new(),
        };
        let updated_user = self.write(&user, &diff).await?;

        info!("Role {} added to user {}", role_id, id);
        Ok(UserResponse::from(updated_user))
    }

    async fn delete_user(&self, id: UserId) -> RosterResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete(id).await? {
            return Err(RosterError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::Role;
    use roster_repository::{InMemoryStore, MockRoleRepository, MockUserRepository};

    struct Fixture {
        service: UserServiceComponent,
        store: Arc<InMemoryStore>,
        roles: Vec<Role>,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let mut roles = Vec::new();
        for name in ["Admin", "Editor", "Viewer", "Auditor"] {
            let role = RoleRepository::save(store.as_ref(), &Role::new(name)).await.unwrap();
            roles.push(role);
        }
        let service = UserServiceComponent::new(store.clone(), store.clone());
        Fixture {
            service,
            store,
            roles,
        }
    }

    fn create_request(name: &str, age: i32, email: &str, role_ids: Vec<RoleId>) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            age,
            email: email.to_string(),
            role_ids,
        }
    }

    fn role_ids(response: &UserResponse) -> Vec<RoleId> {
        response.roles.iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn test_create_user_with_roles() {
        let f = fixture().await;
        let created = f
            .service
            .create_user(create_request("Alice", 30, "alice@x.io", vec![f.roles[1].id, f.roles[0].id]))
            .await
            .unwrap();

        assert_eq!(created.name, "Alice");
        assert_eq!(role_ids(&created), vec![f.roles[0].id, f.roles[1].id]);

        let fetched = f.service.get_user(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_user_rejects_non_positive_age() {
        let f = fixture().await;
        for age in [0, -5] {
            let err = f
                .service
                .create_user(create_request("Bob", age, "bob@x.io", vec![]))
                .await
                .unwrap_err();
            assert!(matches!(err, RosterError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_is_validation_error() {
        let f = fixture().await;
        f.service
            .create_user(create_request("A", 20, "dup@x.io", vec![]))
            .await
            .unwrap();

        let err = f
            .service
            .create_user(create_request("B", 21, "dup@x.io", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Validation(ref m) if m.contains("dup@x.io")));
    }

    #[tokio::test]
    async fn test_create_user_missing_role_persists_nothing() {
        let f = fixture().await;
        let err = f
            .service
            .create_user(create_request("C", 20, "c@x.io", vec![f.roles[0].id, RoleId(77)]))
            .await
            .unwrap_err();

        assert!(matches!(err, RosterError::NotFound { resource_type: "Role", ref id } if id == "77"));
        assert_eq!(UserRepository::count(f.store.as_ref()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_user_blank_name_is_rejected() {
        let f = fixture().await;
        let err = f
            .service
            .create_user(create_request("  ", 20, "c@x.io", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_user_reconciles_roles() {
        let f = fixture().await;
        let r = &f.roles;
        let created = f
            .service
            .create_user(create_request("Dan", 40, "dan@x.io", vec![r[0].id, r[1].id, r[2].id]))
            .await
            .unwrap();

        let updated = f
            .service
            .update_user(
                created.id,
                UpdateUserRequest {
                    name: "Daniel".to_string(),
                    age: 41,
                    email: "daniel@x.io".to_string(),
                    role_ids: vec![r[1].id, r[2].id, r[3].id],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Daniel");
        assert_eq!(updated.age, 41);
        assert_eq!(updated.email, "daniel@x.io");
        assert_eq!(role_ids(&updated), vec![r[1].id, r[2].id, r[3].id]);
    }

    #[tokio::test]
    async fn test_update_user_missing_added_role_is_not_found() {
        let f = fixture().await;
        let created = f
            .service
            .create_user(create_request("Eve", 22, "eve@x.io", vec![f.roles[0].id]))
            .await
            .unwrap();

        let err = f
            .service
            .update_user(
                created.id,
                UpdateUserRequest {
                    name: "Eve".to_string(),
                    age: 22,
                    email: "eve@x.io".to_string(),
                    role_ids: vec![RoleId(500)],
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let unchanged = f.service.get_user(created.id).await.unwrap();
        assert_eq!(role_ids(&unchanged), vec![f.roles[0].id]);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let f = fixture().await;
        let err = f
            .service
            .update_user(
                UserId(9),
                UpdateUserRequest {
                    name: "X".to_string(),
                    age: 1,
                    email: "x@x.io".to_string(),
                    role_ids: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_add_user_role() {
        let f = fixture().await;
        let created = f
            .service
            .create_user(create_request("Fay", 35, "fay@x.io", vec![]))
            .await
            .unwrap();

        let updated = f.service.add_user_role(created.id, f.roles[2].id).await.unwrap();
        assert_eq!(role_ids(&updated), vec![f.roles[2].id]);

        let err = f
            .service
            .add_user_role(created.id, f.roles[2].id)
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::AlreadyAssigned { .. }));

        let err = f.service.add_user_role(created.id, RoleId(404)).await.unwrap_err();
        assert!(err.is_not_found());

        let err = f.service.add_user_role(UserId(404), f.roles[0].id).await.unwrap_err();
        assert!(matches!(err, RosterError::NotFound { resource_type: "User", .. }));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let f = fixture().await;
        let created = f
            .service
            .create_user(create_request("Gus", 60, "gus@x.io", vec![f.roles[0].id]))
            .await
            .unwrap();

        f.service.delete_user(created.id).await.unwrap();
        assert!(f.service.get_user(created.id).await.unwrap_err().is_not_found());
        assert!(f.service.delete_user(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_users_filters_sorts_and_paginates() {
        let f = fixture().await;
        for (name, age) in [("Zoe", 31), ("Adam", 52), ("Mia", 23), ("Liam", 31)] {
            f.service
                .create_user(create_request(name, age, &format!("{}@x.io", name.to_lowercase()), vec![]))
                .await
                .unwrap();
        }

        let query = UserQuery {
            page: 1,
            page_size: 2,
            sort_by: "name".to_string(),
            sort_order: "desc".to_string(),
            filter: "3".to_string(),
        };
        let response = f.service.list_users(query).await.unwrap();
        let names: Vec<&str> = response.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Zoe", "Mia"]);
        assert_eq!(response.total_items, 3);
        assert_eq!(response.total_pages, 2);
    }

    #[tokio::test]
    async fn test_list_users_unknown_sort_field() {
        let f = fixture().await;
        let query = UserQuery {
            sort_by: "Password".to_string(),
            ..UserQuery::default()
        };
        let err = f.service.list_users(query).await.unwrap_err();
        assert!(matches!(err, RosterError::InvalidField(_)));
    }

    fn stored_user() -> User {
        let mut user = User::new("Hal", 29, "hal@x.io");
        user.id = UserId(1);
        user
    }

    #[tokio::test]
    async fn test_update_conflict_on_existing_user_is_reported() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        users
            .expect_update()
            .times(1)
            .returning(|_, _| Err(RosterError::conflict("stale version")));
        users.expect_exists().returning(|_| Ok(true));
        let roles = MockRoleRepository::new();

        let service = UserServiceComponent::new(Arc::new(users), Arc::new(roles));
        let err = service
            .update_user(
                UserId(1),
                UpdateUserRequest {
                    name: "Hal".to_string(),
                    age: 30,
                    email: "hal@x.io".to_string(),
                    role_ids: vec![],
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_update_conflict_on_deleted_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(Some(stored_user())));
        users
            .expect_update()
            .returning(|_, _| Err(RosterError::conflict("row gone")));
        users.expect_exists().returning(|_| Ok(false));
        let mut roles = MockRoleRepository::new();
        roles.expect_exists().returning(|_| Ok(true));

        let service = UserServiceComponent::new(Arc::new(users), Arc::new(roles));
        let err = service.add_user_role(UserId(1), RoleId(5)).await.unwrap_err();
        assert!(matches!(err, RosterError::NotFound { resource_type: "User", .. }));
    }
}
