//! Domain layer: the Post aggregate, its rules, events, and repository.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod repository;
pub mod rules;
