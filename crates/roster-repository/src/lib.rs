//! # Roster Repository
//!
//! Entity store for users, roles, and their links.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn RoleRepository>
//! MySqlUserRepository, MySqlRoleRepository   (SQLx, injected DatabasePool)
//! InMemoryStore                              (parking_lot tables)
//! ```
//!
//! Both implementations eager-load a user's roles and apply role diffs
//! atomically together with the version-checked profile write.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::InMemoryStore;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
