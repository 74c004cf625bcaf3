//! REST API controllers.

pub mod health_controller;
pub mod role_controller;
pub mod user_controller;

pub use health_controller::*;

use crate::responses::AppError;
use roster_core::RosterError;
use std::str::FromStr;

/// Parses a numeric path id, answering 400 for anything else.
pub(crate) fn parse_id<T: FromStr>(kind: &str, raw: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::from(RosterError::validation(format!("Invalid {kind} ID: {raw}"))))
}
