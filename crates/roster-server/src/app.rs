//! Application assembly: store backend selection and router construction.

use crate::di::{build_mysql_module, DatabaseResolver, MemoryServices, ServiceResolver};
use axum::Router;
use roster_config::{AppConfig, StoreBackend};
use roster_core::RosterResult;
use roster_repository::DatabasePoolInterface;
use roster_rest::{create_router, AppState};
use std::sync::Arc;
use tracing::info;

/// A ready-to-serve application.
pub struct App {
    pub router: Router,
    /// The MySQL pool, closed on shutdown.
    pub database: Option<Arc<dyn DatabasePoolInterface>>,
}

impl App {
    /// Wires services for the configured backend and builds the router.
    pub async fn build(config: &AppConfig) -> RosterResult<Self> {
        let (state, database) = match config.database.backend {
            StoreBackend::Mysql => {
                info!("Using MySQL store");
                let module = build_mysql_module(&config.database).await?;
                let database = module.database_pool();
                if config.database.run_migrations {
                    database.run_migrations().await?;
                }
                let state = AppState::new(module.user_service(), module.role_service())
                    .with_database(database.clone());
                (state, Some(database))
            }
            StoreBackend::Memory => {
                info!("Using in-memory store");
                let services = MemoryServices::new();
                (AppState::new(services.user_service(), services.role_service()), None)
            }
        };

        Ok(Self {
            router: create_router(state, config),
            database,
        })
    }

    /// Closes the database pool, if any.
    pub async fn close(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("database", &self.database.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_config::DatabaseConfig;

    fn memory_config() -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                backend: StoreBackend::Memory,
                ..DatabaseConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_memory_backend_builds_without_database() {
        let app = App::build(&memory_config()).await.unwrap();
        assert!(app.database.is_none());
        app.close().await;
    }
}
