//! Domain model for the Blood Request context.

pub mod address;
pub mod aggregates;
pub mod commands;
pub mod events;
pub mod repository;
pub mod rules;
