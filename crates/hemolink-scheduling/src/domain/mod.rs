//! Domain model for the Appointment Scheduling context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod repository;
pub mod rules;
