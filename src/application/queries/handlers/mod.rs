//! Query Handlers 实现

mod provider_handlers;

pub use provider_handlers::*;
