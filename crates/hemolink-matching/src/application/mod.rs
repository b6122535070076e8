//! Application layer for the Donor Matching context.

pub mod command_handlers;
pub mod query_handlers;
