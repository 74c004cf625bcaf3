//! # Roster Service
//!
//! Business logic service layer for Roster.
//! Orchestrates the query engine and role reconciler against the entity store
//! and translates outcomes into `RosterError` kinds.

pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod role_service;
pub mod user_service;

pub use dto::*;
pub use r#impl::{RoleServiceComponent, UserServiceComponent};
pub use role_service::*;
pub use user_service::*;
