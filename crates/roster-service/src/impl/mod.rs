//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

pub mod role_service_impl;
pub mod user_service_impl;

pub use role_service_impl::RoleServiceComponent;
pub use user_service_impl::UserServiceComponent;
