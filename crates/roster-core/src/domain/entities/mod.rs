//! Domain entities.

mod role;
mod user;

pub use role::Role;
pub use user::{User, UserRole};
