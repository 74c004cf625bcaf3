//! Application state for Axum handlers.

use roster_repository::DatabasePoolInterface;
use roster_service::{RoleService, UserService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub role_service: Arc<dyn RoleService>,
    /// Pinged by `/ready`; absent for the in-memory backend.
    pub database: Option<Arc<dyn DatabasePoolInterface>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>, role_service: Arc<dyn RoleService>) -> Self {
        Self {
            user_service,
            role_service,
            database: None,
        }
    }

    /// Resolves the services and the database pool from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn UserService>
            + HasComponent<dyn RoleService>
            + HasComponent<dyn DatabasePoolInterface>,
    {
        Self {
            user_service: module.resolve(),
            role_service: module.resolve(),
            database: Some(module.resolve()),
        }
    }

    /// Attaches a database pool for readiness checks.
    #[must_use]
    pub fn with_database(mut self, database: Arc<dyn DatabasePoolInterface>) -> Self {
        self.database = Some(database);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("database", &self.database.is_some())
            .finish_non_exhaustive()
    }
}
