//! CLI command implementations.

pub mod analyze;
pub mod context;
pub mod quote;
pub mod route;
pub mod snapshot;
pub mod validate;
