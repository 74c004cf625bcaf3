//! MySQL-backed entity store.

mod role_repository;
mod user_repository;

pub use role_repository::MySqlRoleRepository;
pub use user_repository::MySqlUserRepository;
