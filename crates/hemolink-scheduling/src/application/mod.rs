//! Application layer: command and query handlers for scheduling.

pub mod command_handlers;
pub mod query_handlers;
