pub mod origin;
pub mod tracing;
