//! HTTP handlers for the assistant relay.

pub mod chat;
pub mod health;
pub mod schedule;
