//! Role service implementation.

use crate::dto::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use crate::role_service::RoleService;
use async_trait::async_trait;
use roster_core::{Role, RoleId, RosterError, RosterResult, ValidateExt};
use roster_repository::RoleRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Role service backed by the role repository.
#[derive(Component)]
#[shaku(interface = RoleService)]
pub struct RoleServiceComponent {
    #[shaku(inject)]
    role_repository: Arc<dyn RoleRepository>,
}

impl RoleServiceComponent {
    /// Creates a new role service.
    pub fn new(role_repository: Arc<dyn RoleRepository>) -> Self {
        Self { role_repository }
    }
}

#[async_trait]
impl RoleService for RoleServiceComponent {
    async fn list_roles(&self) -> RosterResult<Vec<RoleResponse>> {
        debug!("Listing roles");

        let roles = self.role_repository.find_all().await?;
        Ok(roles.into_iter().map(RoleResponse::from).collect())
    }

    async fn get_role(&self, id: RoleId) -> RosterResult<RoleResponse> {
        debug!("Getting role: {}", id);

        self.role_repository
            .find_by_id(id)
            .await?
            .map(RoleResponse::from)
            .ok_or_else(|| RosterError::not_found("Role", id))
    }

    async fn create_role(&self, request: CreateRoleRequest) -> RosterResult<RoleResponse> {
        debug!("Creating role: {}", request.name);

        request.validate_request()?;

        let role = self.role_repository.save(&Role::new(request.name)).await?;

        info!("Role created: {}", role.id);
        Ok(RoleResponse::from(role))
    }

    async fn update_role(&self, id: RoleId, request: UpdateRoleRequest) -> RosterResult<RoleResponse> {
        debug!("Updating role: {}", id);

        if request.id != id {
            warn!("Role id mismatch: path {} body {}", id, request.id);
            return Err(RosterError::validation(format!(
                "Role id {} does not match path id {}",
                request.id, id
            )));
        }
        request.validate_request()?;

        let role = self
            .role_repository
            .update(&Role::new(request.name).with_id(id))
            .await?;

        info!("Role updated: {}", id);
        Ok(RoleResponse::from(role))
    }

    async fn delete_role(&self, id: RoleId) -> RosterResult<()> {
        debug!("Deleting role: {}", id);

        if !self.role_repository.delete(id).await? {
            return Err(RosterError::not_found("Role", id));
        }

        info!("Role deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for RoleServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_repository::{InMemoryStore, MockRoleRepository};

    fn service() -> RoleServiceComponent {
        RoleServiceComponent::new(Arc::new(InMemoryStore::new()))
    }

    fn create(name: &str) -> CreateRoleRequest {
        CreateRoleRequest {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_roles() {
        let service = service();
        let admin = service.create_role(create("Admin")).await.unwrap();
        let viewer = service.create_role(create("Viewer")).await.unwrap();

        assert_eq!(service.list_roles().await.unwrap(), vec![admin.clone(), viewer]);
        assert_eq!(service.get_role(admin.id).await.unwrap(), admin);
    }

    #[tokio::test]
    async fn test_create_role_blank_name() {
        let err = service().create_role(create("")).await.unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_role() {
        let service = service();
        let role = service.create_role(create("Admin")).await.unwrap();

        let updated = service
            .update_role(
                role.id,
                UpdateRoleRequest {
                    id: role.id,
                    name: "Owner".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Owner");
        assert_eq!(service.get_role(role.id).await.unwrap().name, "Owner");
    }

    #[tokio::test]
    async fn test_update_role_id_mismatch() {
        let mut repo = MockRoleRepository::new();
        repo.expect_update().never();
        let service = RoleServiceComponent::new(Arc::new(repo));

        let err = service
            .update_role(
                RoleId(1),
                UpdateRoleRequest {
                    id: RoleId(2),
                    name: "Owner".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_missing_role() {
        let err = service()
            .update_role(
                RoleId(8),
                UpdateRoleRequest {
                    id: RoleId(8),
                    name: "Ghost".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_and_delete_missing_role() {
        let service = service();
        assert!(service.get_role(RoleId(3)).await.unwrap_err().is_not_found());
        assert!(service.delete_role(RoleId(3)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_role() {
        let service = service();
        let role = service.create_role(create("Temp")).await.unwrap();
        service.delete_role(role.id).await.unwrap();
        assert!(service.list_roles().await.unwrap().is_empty());
    }
}
