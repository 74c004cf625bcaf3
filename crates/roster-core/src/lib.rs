//! # Roster Core
//!
//! Core types and error definitions for the Roster users & roles API.
//! Besides the domain model this crate hosts the pure query engine used by the
//! service layer: substring filtering, dynamic sorting, page windows, and role
//! reconciliation.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod query;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use query::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
