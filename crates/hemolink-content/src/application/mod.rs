//! Application layer: command and query handlers for content.

pub mod command_handlers;
pub mod query_handlers;
