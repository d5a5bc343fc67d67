//! Application layer - the registrar and its operations.
//!
//! - `Registrar` - mediator owning the course and student registries
//! - `handlers` - one module per command or query

pub mod handlers;
mod registrar;
mod registry;

pub use handlers::*;
pub use registrar::Registrar;
