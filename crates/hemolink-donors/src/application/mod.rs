//! Application layer for the Donor context.

pub mod command_handlers;
pub mod query_handlers;
