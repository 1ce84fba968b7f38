//! service-core: Shared infrastructure for the assistant relay.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
