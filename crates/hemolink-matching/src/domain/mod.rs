//! Domain model for the Donor Matching context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod repository;
pub mod rules;
