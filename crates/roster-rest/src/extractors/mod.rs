//! Custom Axum extractors.

mod query;
mod validated;

pub use query::*;
pub use validated::*;
