//! # Roster Server Library
//!
//! Dependency injection wiring and startup utilities for the Roster server.
//! The binary picks a store backend from configuration and serves the REST
//! router built here.

pub mod app;
pub mod di;
pub mod startup;
