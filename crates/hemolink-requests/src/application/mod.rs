//! Application layer for the Blood Request context.

pub mod command_handlers;
pub mod query_handlers;
