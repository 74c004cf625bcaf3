//! Dependency injection module using Shaku.
//!
//! The MySQL backend is wired through [`MySqlModule`]. The in-memory backend
//! shares one [`InMemoryStore`] between both repository seats, which a Shaku
//! component cannot express, so it is wired by hand with the same service
//! components.

use roster_config::DatabaseConfig;
use roster_core::RosterResult;
use roster_repository::{
    DatabasePool, DatabasePoolInterface, InMemoryStore, MySqlRoleRepository, MySqlUserRepository,
};
use roster_service::{RoleService, RoleServiceComponent, UserService, UserServiceComponent};
use shaku::{module, HasComponent};
use std::sync::Arc;

module! {
    pub MySqlModule {
        components = [
            DatabasePool,
            MySqlUserRepository,
            MySqlRoleRepository,
            UserServiceComponent,
            RoleServiceComponent,
        ],
        providers = [],
    }
}

/// Connects to MySQL and builds the module around the pool.
pub async fn build_mysql_module(db_config: &DatabaseConfig) -> RosterResult<Arc<MySqlModule>> {
    let db_pool = DatabasePool::connect(db_config).await?;

    let module = MySqlModule::builder()
        .with_component_parameters::<DatabasePool>(db_pool.into_parameters())
        .build();

    Ok(Arc::new(module))
}

/// Services wired against a fresh in-memory store.
#[derive(Clone)]
pub struct MemoryServices {
    pub store: Arc<InMemoryStore>,
    pub user_service: Arc<dyn UserService>,
    pub role_service: Arc<dyn RoleService>,
}

impl MemoryServices {
    /// Creates an empty store and the services over it.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            user_service: Arc::new(UserServiceComponent::new(store.clone(), store.clone())),
            role_service: Arc::new(RoleServiceComponent::new(store.clone())),
            store,
        }
    }
}

impl Default for MemoryServices {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryServices").field("store", &self.store).finish_non_exhaustive()
    }
}

/// Trait for resolving the services from any wiring.
pub trait ServiceResolver {
    /// Resolves the user service.
    fn user_service(&self) -> Arc<dyn UserService>;

    /// Resolves the role service.
    fn role_service(&self) -> Arc<dyn RoleService>;
}

impl ServiceResolver for MySqlModule {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    fn role_service(&self) -> Arc<dyn RoleService> {
        self.resolve()
    }
}

impl ServiceResolver for MemoryServices {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn role_service(&self) -> Arc<dyn RoleService> {
        self.role_service.clone()
    }
}

/// Resolves the database pool from the MySQL module.
pub trait DatabaseResolver {
    /// Resolves the database pool.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for MySqlModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}
